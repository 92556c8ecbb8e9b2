use clap::Args;
use std::path::PathBuf;

use crate::config::BundleOptions;
use crate::provisioner::ProvisionerKind;

/// Build options, shared by the build and outputs commands
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Temporary directory for creating the distribution
    #[arg(long, short = 'b', value_name = "DIR")]
    pub bdist_dir: Option<PathBuf>,

    /// Platform name to embed in generated filenames (default: the interpreter's build platform)
    #[arg(long, short = 'p', value_name = "NAME")]
    pub plat_name: Option<String>,

    /// Do not include the platform name in the generated filenames
    #[arg(long)]
    pub no_plat_name: bool,

    /// Keep the environment around after creating the distribution archive
    #[arg(long, short = 'k')]
    pub keep_temp: bool,

    /// Directory to put final built distributions in
    #[arg(long, short = 'd', value_name = "DIR")]
    pub dist_dir: Option<PathBuf>,

    /// Pip requirements file to use (default: requirements.txt if present)
    #[arg(long, short = 'r', value_name = "FILE")]
    pub requirements: Option<PathBuf>,

    /// Name of the root folder in the archive (default: <name>-<version>)
    #[arg(long, value_name = "NAME")]
    pub archive_root: Option<String>,

    /// Put the environment's folders at the root of the archive, without a parent directory
    #[arg(long)]
    pub no_archive_root: bool,

    /// Python interpreter used to create the environment (default: python3 on PATH)
    #[arg(long, env = "BDIST_VENV_PYTHON", value_name = "PYTHON")]
    pub python: Option<PathBuf>,

    /// Module that creates the environment
    #[arg(long, value_enum, value_name = "KIND")]
    pub provisioner: Option<ProvisionerKind>,

    /// Project metadata directory (default: the *.egg-info directory in the project)
    #[arg(long, value_name = "DIR")]
    pub egg_info: Option<PathBuf>,
}

impl BuildArgs {
    /// Options given on the command line, before the options file is layered under them
    pub fn to_options(&self) -> BundleOptions {
        BundleOptions {
            bdist_dir: self.bdist_dir.clone(),
            plat_name: self.plat_name.clone(),
            no_plat_name: self.no_plat_name,
            keep_temp: self.keep_temp,
            dist_dir: self.dist_dir.clone(),
            requirements: self.requirements.clone(),
            archive_root: self.archive_root.clone(),
            no_archive_root: self.no_archive_root,
            python: self.python.clone(),
            provisioner: self.provisioner,
            egg_info: self.egg_info.clone(),
        }
    }
}
