//! bdist-venv - bundle a Python project as a relocatable virtualenv archive
//!
//! Creates a fresh virtual environment, installs the project and its
//! requirements into it, rewrites it so it can be moved, and packs it into
//! `<dist>/<name>-<version>[.<platform>-py<X.Y>].tar.gz`.

pub mod archive;
pub mod bundle;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod installer;
pub mod logging;
pub mod process;
pub mod progress;
pub mod project;
pub mod provisioner;
