//! Command implementations for the bdist-venv CLI

pub mod build;
pub mod completions;
pub mod helpers;
pub mod outputs;
pub mod version;
