//! Bundle orchestration
//!
//! The build is a strict sequence; each step starts only after the previous one
//! finished and the first failure aborts the build as-is:
//! 1. Provision a fresh environment in the bundle directory
//! 2. Install the project (and requirements) into it
//! 3. Copy `PKG-INFO` into the environment root
//! 4. Make the environment relocatable
//! 5. Archive it into the destination directory
//! 6. Register the archive
//! 7. Remove the bundle directory unless asked to keep it
//!
//! Nothing is cleaned up on failure, so a broken environment stays on disk for
//! inspection.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::archive;
use crate::error::Result;
use crate::installer::PackageInstaller;
use crate::progress::StepSpinner;
use crate::project::PKG_INFO;
use crate::provisioner::Provisioner;

pub mod config;
pub mod registry;

pub use config::{BundleConfig, configure};
pub use registry::{Artifact, ArtifactRegistry, COMMAND_NAME};

/// Runs the bundle build against a provisioner and an installer
pub struct BundlePipeline<'a> {
    provisioner: &'a dyn Provisioner,
    installer: &'a dyn PackageInstaller,
    show_progress: bool,
}

impl<'a> BundlePipeline<'a> {
    pub fn new(provisioner: &'a dyn Provisioner, installer: &'a dyn PackageInstaller) -> Self {
        Self {
            provisioner,
            installer,
            show_progress: false,
        }
    }

    /// Show spinners while provisioning and archiving
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Build the archive described by `config` and register it.
    ///
    /// Returns the archive path.
    pub fn build(&self, config: &BundleConfig, registry: &mut ArtifactRegistry) -> Result<PathBuf> {
        let env_dir = config.bundle_dir.as_path();

        if env_dir.exists() {
            info!(env = %env_dir.display(), "removing leftover environment");
            fs::remove_dir_all(env_dir)?;
        }

        let spinner = StepSpinner::start(self.show_progress, "Creating environment");
        self.provisioner.create(env_dir)?;
        spinner.finish();

        self.installer.install(
            env_dir,
            &config.project_dir,
            config.requirements_file.as_deref(),
        )?;

        fs::copy(&config.pkg_info, env_dir.join(PKG_INFO))?;

        self.provisioner.make_relocatable(env_dir)?;

        info!(
            "creating '{}' and adding '{}' to it",
            config.output_path.display(),
            env_dir.display()
        );
        if let Some(parent) = config
            .output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }

        let spinner = StepSpinner::start(self.show_progress, "Writing archive");
        archive::write_archive(env_dir, &config.output_path, &config.archive_root)?;
        spinner.finish();

        registry.register(COMMAND_NAME, &config.python_version, &config.output_path);

        if !config.keep_temp {
            remove_environment(env_dir)?;
        }

        Ok(config.output_path.clone())
    }
}

fn remove_environment(env_dir: &Path) -> Result<()> {
    info!(env = %env_dir.display(), "removing environment");
    fs::remove_dir_all(env_dir)?;
    Ok(())
}
