//! Installing the project into a provisioned environment
//!
//! The project and any pinned requirements go in with a single installer
//! invocation so the resolver sees every constraint at once.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::error::Result;
use crate::process;
use crate::provisioner;

/// Installs a project, plus optional requirements, into an environment
pub trait PackageInstaller {
    fn install(&self, env_dir: &Path, project_dir: &Path, requirements: Option<&Path>)
    -> Result<()>;
}

/// Runs the environment's own `pip`
#[derive(Debug, Clone, Copy, Default)]
pub struct PipInstaller;

impl PipInstaller {
    fn install_command(env_dir: &Path, project_dir: &Path, requirements: Option<&Path>) -> Command {
        let mut cmd = Command::new(provisioner::executable(env_dir, "pip"));
        cmd.arg("install").arg(project_dir);
        if let Some(requirements) = requirements {
            cmd.arg("-r").arg(requirements);
        }
        cmd.current_dir(project_dir);
        cmd
    }
}

impl PackageInstaller for PipInstaller {
    fn install(
        &self,
        env_dir: &Path,
        project_dir: &Path,
        requirements: Option<&Path>,
    ) -> Result<()> {
        info!(project = %project_dir.display(), "installing project");
        // pip's own progress goes straight to the terminal
        process::run_inherited(&mut Self::install_command(env_dir, project_dir, requirements))
    }
}
