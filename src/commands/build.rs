//! Build command implementation
//!
//! The build process:
//! 1. Resolve options, project metadata and interpreter facts into a configuration
//! 2. Provision the environment and install the project into it
//! 3. Make it relocatable and archive it into the dist directory
//! 4. Report the produced archive

use std::path::PathBuf;

use console::Style;

use crate::bundle::{ArtifactRegistry, BundlePipeline};
use crate::cli::BuildArgs;
use crate::commands::helpers::resolve_build;
use crate::error::Result;
use crate::installer::PipInstaller;
use crate::provisioner::VirtualenvProvisioner;

/// Run build command
pub fn run(project: Option<PathBuf>, args: BuildArgs) -> Result<()> {
    let resolved = resolve_build(project, &args)?;
    let config = &resolved.config;

    println!(
        "{} {} into {}",
        Style::new().green().bold().apply_to("Bundling"),
        Style::new().bold().apply_to(config.project_dir.display()),
        config.bundle_dir.display()
    );

    let provisioner = VirtualenvProvisioner::new(&resolved.python, resolved.provisioner);
    let installer = PipInstaller;
    let mut registry = ArtifactRegistry::new();

    BundlePipeline::new(&provisioner, &installer)
        .with_progress(console::user_attended_stderr())
        .build(config, &mut registry)?;

    for artifact in registry.artifacts() {
        println!(
            "{} {}",
            Style::new().green().bold().apply_to("Created"),
            Style::new().bold().apply_to(artifact.path.display())
        );
    }

    if config.keep_temp {
        println!(
            "{} {}",
            Style::new().dim().apply_to("Environment kept at"),
            config.bundle_dir.display()
        );
    }

    Ok(())
}
