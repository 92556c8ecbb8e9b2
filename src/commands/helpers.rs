//! Command helper utilities

use std::path::PathBuf;

use tracing::debug;

use crate::bundle::{BundleConfig, configure};
use crate::cli::BuildArgs;
use crate::config;
use crate::error::Result;
use crate::host::{self, HostInfo};
use crate::project::ProjectMetadata;
use crate::provisioner::ProvisionerKind;

/// Configuration plus the collaborator settings a command needs
#[derive(Debug)]
pub struct ResolvedBuild {
    pub config: BundleConfig,
    pub python: PathBuf,
    pub provisioner: ProvisionerKind,
}

/// Resolve project path from optional argument
///
/// If a project path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    let path = match project {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    Ok(dunce::canonicalize(path)?)
}

/// Layer command-line options over the options file and resolve the build configuration
pub fn resolve_build(project: Option<PathBuf>, args: &BuildArgs) -> Result<ResolvedBuild> {
    let project_dir = resolve_project_path(project)?;
    let options = args
        .to_options()
        .or(config::load_options_file(&project_dir)?);

    let python = host::resolve_interpreter(options.python.as_deref())?;
    let host = HostInfo::probe(&python)?;
    let project = ProjectMetadata::discover(&project_dir, options.egg_info.as_deref(), &python)?;

    let config = configure(&options, &project, &host, &project_dir)?;
    debug!(?config, "resolved bundle configuration");

    Ok(ResolvedBuild {
        config,
        python,
        provisioner: options.provisioner.unwrap_or_default(),
    })
}
