//! Isolated environment provisioning
//!
//! The orchestrator only needs two capabilities from a provisioner: create a
//! fresh environment at a path, and make an existing one relocatable. The
//! default implementation drives Python's `venv` module (or the `virtualenv`
//! package) as a subprocess.

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::process;

pub mod relocate;

/// Creates isolated environments and rewrites them to be relocatable
pub trait Provisioner {
    /// Create a new environment at `env_dir`, without network access
    fn create(&self, env_dir: &Path) -> Result<()>;

    /// Rewrite absolute paths inside `env_dir` so it can be moved or extracted elsewhere
    fn make_relocatable(&self, env_dir: &Path) -> Result<()>;
}

/// Which Python module provisions the environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionerKind {
    /// Standard library `venv`, seeded from the bundled `ensurepip` wheels
    #[default]
    Venv,
    /// The `virtualenv` package, seeded from its embedded wheels
    Virtualenv,
}

/// Provisioner backed by a Python interpreter
#[derive(Debug, Clone)]
pub struct VirtualenvProvisioner {
    python: PathBuf,
    kind: ProvisionerKind,
}

impl VirtualenvProvisioner {
    pub fn new(python: impl Into<PathBuf>, kind: ProvisionerKind) -> Self {
        Self {
            python: python.into(),
            kind,
        }
    }

    fn create_command(&self, env_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.python);
        match self.kind {
            ProvisionerKind::Venv => {
                cmd.args(["-m", "venv"]);
            }
            ProvisionerKind::Virtualenv => {
                cmd.args(["-m", "virtualenv", "--no-download", "--no-periodic-update"]);
            }
        }
        cmd.arg(env_dir);
        cmd
    }
}

impl Provisioner for VirtualenvProvisioner {
    fn create(&self, env_dir: &Path) -> Result<()> {
        info!(env = %env_dir.display(), provisioner = ?self.kind, "creating environment");
        process::run_captured(&mut self.create_command(env_dir))?;
        Ok(())
    }

    fn make_relocatable(&self, env_dir: &Path) -> Result<()> {
        relocate::make_relocatable(env_dir)
    }
}

/// Directory holding the environment's executables
pub fn scripts_dir(env_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        env_dir.join("Scripts")
    } else {
        env_dir.join("bin")
    }
}

/// Path of a named executable inside the environment
pub fn executable(env_dir: &Path, name: &str) -> PathBuf {
    if cfg!(windows) {
        scripts_dir(env_dir).join(format!("{}.exe", name))
    } else {
        scripts_dir(env_dir).join(name)
    }
}
