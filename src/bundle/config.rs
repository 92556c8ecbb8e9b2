//! Bundle configuration resolution
//!
//! Turns raw user options into a fully populated [`BundleConfig`]. Each field
//! is resolved on its own from the options, the project metadata, the host
//! interpreter and a couple of filesystem probes. The only rejected input is
//! an archive root that would escape the extraction directory, caught here so
//! nothing is provisioned for a build that cannot be archived.

use std::path::{Path, PathBuf};

use crate::archive::{self, CURRENT_DIR_ROOT};
use crate::config::BundleOptions;
use crate::error::Result;
use crate::host::HostInfo;
use crate::project::ProjectMetadata;

/// Requirements file picked up automatically when present in the project root
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Directory receiving archives when no `dist-dir` is given
pub const DEFAULT_DIST_DIR: &str = "dist";

const ARCHIVE_EXTENSION: &str = ".tar.gz";

/// Everything one build needs, resolved up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// Temporary directory the environment is provisioned in
    pub bundle_dir: PathBuf,
    /// Platform segment of the archive name; empty when suppressed
    pub platform_tag: String,
    pub keep_temp: bool,
    pub dist_dir: PathBuf,
    pub requirements_file: Option<PathBuf>,
    /// Top-level directory inside the archive, `"."` for none
    pub archive_root: String,
    pub output_path: PathBuf,
    /// Project source installed into the environment
    pub project_dir: PathBuf,
    /// Metadata descriptor copied into the environment root
    pub pkg_info: PathBuf,
    pub python_version: String,
}

impl BundleConfig {
    /// The files a build of this configuration produces
    pub fn outputs(&self) -> Vec<PathBuf> {
        vec![self.output_path.clone()]
    }
}

/// Resolve user options against project metadata, host facts and the filesystem
pub fn configure(
    options: &BundleOptions,
    project: &ProjectMetadata,
    host: &HostInfo,
    project_dir: &Path,
) -> Result<BundleConfig> {
    let bundle_dir = options
        .bdist_dir
        .as_deref()
        .map(|dir| resolve_path(project_dir, dir))
        .unwrap_or_else(|| default_bundle_dir(project_dir, &host.platform));

    let platform_tag = if options.no_plat_name {
        String::new()
    } else {
        options
            .plat_name
            .clone()
            .unwrap_or_else(|| host.platform.clone())
    };

    let requirements_file = match options.requirements.as_deref() {
        Some(path) => Some(resolve_path(project_dir, path)),
        None => Some(project_dir.join(REQUIREMENTS_FILE)).filter(|path| path.exists()),
    };

    let archive_root = resolve_archive_root(options, project)?;

    let dist_dir = options
        .dist_dir
        .as_deref()
        .map(|dir| resolve_path(project_dir, dir))
        .unwrap_or_else(|| project_dir.join(DEFAULT_DIST_DIR));

    let output_path = dist_dir.join(archive_file_name(
        &project.fullname(),
        &platform_tag,
        &host.python_version,
    ));

    Ok(BundleConfig {
        bundle_dir,
        platform_tag,
        keep_temp: options.keep_temp,
        dist_dir,
        requirements_file,
        archive_root,
        output_path,
        project_dir: project_dir.to_path_buf(),
        pkg_info: project.pkg_info(),
        python_version: host.python_version.clone(),
    })
}

fn resolve_archive_root(options: &BundleOptions, project: &ProjectMetadata) -> Result<String> {
    if options.no_archive_root {
        return Ok(CURRENT_DIR_ROOT.to_string());
    }
    match options.archive_root.as_deref() {
        Some(root) => archive::normalize_root(root),
        None => Ok(project.fullname()),
    }
}

/// `<fullname>[.<platform>-py<version>].tar.gz`
pub fn archive_file_name(fullname: &str, platform_tag: &str, python_version: &str) -> String {
    if platform_tag.is_empty() {
        format!("{}{}", fullname, ARCHIVE_EXTENSION)
    } else {
        format!(
            "{}.{}-py{}{}",
            fullname, platform_tag, python_version, ARCHIVE_EXTENSION
        )
    }
}

/// `build/bdist.<platform>/venv` under the project root
fn default_bundle_dir(project_dir: &Path, platform: &str) -> PathBuf {
    project_dir
        .join("build")
        .join(format!("bdist.{}", platform))
        .join("venv")
}

fn resolve_path(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
