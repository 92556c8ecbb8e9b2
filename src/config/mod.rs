//! User options and the optional `bdist-venv.yaml` options file
//!
//! Options are layered: command-line flags override values from the options
//! file in the project root, and anything still unset falls back to a default
//! computed during configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BdistVenvError, Result};
use crate::provisioner::ProvisionerKind;

/// Options filename, looked up in the project root
pub const OPTIONS_FILE: &str = "bdist-venv.yaml";

/// Raw build options before defaults are resolved.
///
/// Keys in the options file match the command-line flag names.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BundleOptions {
    pub bdist_dir: Option<PathBuf>,
    pub plat_name: Option<String>,
    pub no_plat_name: bool,
    pub keep_temp: bool,
    pub dist_dir: Option<PathBuf>,
    pub requirements: Option<PathBuf>,
    pub archive_root: Option<String>,
    pub no_archive_root: bool,
    pub python: Option<PathBuf>,
    pub provisioner: Option<ProvisionerKind>,
    pub egg_info: Option<PathBuf>,
}

impl BundleOptions {
    /// Layer `self` over `fallback`: set values and enabled flags in `self` win
    pub fn or(self, fallback: BundleOptions) -> BundleOptions {
        BundleOptions {
            bdist_dir: self.bdist_dir.or(fallback.bdist_dir),
            plat_name: self.plat_name.or(fallback.plat_name),
            no_plat_name: self.no_plat_name || fallback.no_plat_name,
            keep_temp: self.keep_temp || fallback.keep_temp,
            dist_dir: self.dist_dir.or(fallback.dist_dir),
            requirements: self.requirements.or(fallback.requirements),
            archive_root: self.archive_root.or(fallback.archive_root),
            no_archive_root: self.no_archive_root || fallback.no_archive_root,
            python: self.python.or(fallback.python),
            provisioner: self.provisioner.or(fallback.provisioner),
            egg_info: self.egg_info.or(fallback.egg_info),
        }
    }

    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| BdistVenvError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Load the options file from the project root.
///
/// Returns empty options if the file does not exist, as it is optional.
pub fn load_options_file(project_dir: &Path) -> Result<BundleOptions> {
    let path = project_dir.join(OPTIONS_FILE);

    if !path.exists() {
        return Ok(BundleOptions::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| BdistVenvError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    BundleOptions::from_yaml(&content, &path)
}
