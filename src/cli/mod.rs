//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - build: Build options, shared with outputs
//! - outputs: Outputs command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;
pub mod outputs;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use outputs::OutputsArgs;

/// bdist-venv - bundle a Python project as a relocatable virtualenv archive
#[derive(Parser, Debug)]
#[command(
    name = "bdist-venv",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bundle a Python project and its dependencies as a relocatable virtualenv archive",
    long_about = "bdist-venv creates a fresh virtual environment, installs the project and its \
                  requirements into it, makes it relocatable and packs it into a single \
                  .tar.gz that can be extracted and run anywhere on the same platform.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  bdist-venv build                       \x1b[90m# dist/<name>-<version>.<platform>-py<X.Y>.tar.gz\x1b[0m\n   \
                  bdist-venv build --no-plat-name        \x1b[90m# dist/<name>-<version>.tar.gz\x1b[0m\n   \
                  bdist-venv build --no-archive-root     \x1b[90m# No top-level folder in the archive\x1b[0m\n   \
                  bdist-venv build -r requirements/prod.txt -k\n   \
                  bdist-venv outputs                     \x1b[90m# Print the archive path without building\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "BDIST_VENV_PROJECT")]
    pub project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the virtualenv archive
    Build(BuildArgs),

    /// Print the archive path a build would produce
    Outputs(OutputsArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
