//! Error types and handling for bdist-venv
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Failures coming from the collaborators (filesystem, provisioner, installer,
//! archive writer) are passed through as-is: I/O errors are transparent and
//! subprocess failures report the exact command line and exit status.

use std::process::ExitStatus;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bdist-venv operations
#[derive(Error, Diagnostic, Debug)]
pub enum BdistVenvError {
    // Pass-through errors
    #[error(transparent)]
    #[diagnostic(code(bdist_venv::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(bdist_venv::io::walk))]
    Walk(#[from] walkdir::Error),

    // Subprocess errors
    #[error("Failed to run '{command}': {source}")]
    #[diagnostic(
        code(bdist_venv::process::spawn_failed),
        help("Check that the program exists and is executable")
    )]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Command '{command}' failed: {status}")]
    #[diagnostic(code(bdist_venv::process::failed))]
    CommandFailed { command: String, status: ExitStatus },

    // Interpreter errors
    #[error("No Python interpreter found on PATH")]
    #[diagnostic(
        code(bdist_venv::host::interpreter_not_found),
        help("Install python3 or pass --python (or set BDIST_VENV_PYTHON)")
    )]
    InterpreterNotFound,

    #[error("Failed to probe Python interpreter: {reason}")]
    #[diagnostic(code(bdist_venv::host::probe_failed))]
    ProbeFailed { reason: String },

    // Project metadata errors
    #[error("Project metadata not found in: {path}")]
    #[diagnostic(
        code(bdist_venv::project::metadata_not_found),
        help("Run 'python setup.py egg_info' first or pass --egg-info <DIR>")
    )]
    MetadataNotFound { path: String },

    #[error("Invalid project metadata in {path}: {reason}")]
    #[diagnostic(code(bdist_venv::project::metadata_invalid))]
    MetadataInvalid { path: String, reason: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(bdist_venv::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(
        code(bdist_venv::config::parse_failed),
        help("Option keys use the same names as the command-line flags, e.g. 'dist-dir'")
    )]
    ConfigParseFailed { path: String, reason: String },

    // Archive errors
    #[error("Failed to write archive {path}: {reason}")]
    #[diagnostic(code(bdist_venv::archive::write_failed))]
    ArchiveWriteFailed { path: String, reason: String },

    #[error("Invalid archive root '{root}': it must not contain '..'")]
    #[diagnostic(
        code(bdist_venv::archive::invalid_root),
        help("Use a plain folder name such as 'app', or --no-archive-root")
    )]
    InvalidArchiveRoot { root: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(bdist_venv::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BdistVenvError>;
