//! Host interpreter discovery and probing
//!
//! The platform tag and Python version embedded in archive names both come from
//! the interpreter that provisions the environment, so they are read from it
//! once up front.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{BdistVenvError, Result};
use crate::process;

/// Inline script printing `X.Y` and the build platform on separate lines
const PROBE_SCRIPT: &str =
    "import sys, sysconfig; print('%d.%d' % sys.version_info[:2]); print(sysconfig.get_platform())";

/// Interpreter names tried on PATH, in order
const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Facts about the target interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Interpreter `major.minor` version, e.g. `3.12`
    pub python_version: String,
    /// Build platform identifier, e.g. `linux-x86_64`
    pub platform: String,
}

impl HostInfo {
    /// Run the interpreter once and read its version and platform
    pub fn probe(python: &Path) -> Result<Self> {
        let mut cmd = Command::new(python);
        cmd.arg("-c").arg(PROBE_SCRIPT);
        let output = process::run_captured(&mut cmd)?;
        let info = Self::parse(&String::from_utf8_lossy(&output.stdout))?;
        debug!(python_version = %info.python_version, platform = %info.platform, "probed interpreter");
        Ok(info)
    }

    fn parse(stdout: &str) -> Result<Self> {
        let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());

        let python_version = lines
            .next()
            .ok_or_else(|| BdistVenvError::ProbeFailed {
                reason: "interpreter printed no version".to_string(),
            })?
            .to_string();
        let platform = lines
            .next()
            .ok_or_else(|| BdistVenvError::ProbeFailed {
                reason: "interpreter printed no platform".to_string(),
            })?
            .to_string();

        if !is_major_minor(&python_version) {
            return Err(BdistVenvError::ProbeFailed {
                reason: format!("unexpected version '{}'", python_version),
            });
        }

        Ok(Self {
            python_version,
            platform,
        })
    }
}

fn is_major_minor(version: &str) -> bool {
    match version.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Resolve the interpreter to use: an explicit path or name, else the first
/// candidate found on PATH.
pub fn resolve_interpreter(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(python) = explicit {
        return Ok(python.to_path_buf());
    }

    INTERPRETER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or(BdistVenvError::InterpreterNotFound)
}
