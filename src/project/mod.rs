//! Project metadata discovery
//!
//! The project's name and version come from the `PKG-INFO` file setuptools
//! writes into the `<name>.egg-info` build-metadata directory. The same file is
//! later copied into the root of the bundled environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{BdistVenvError, Result};
use crate::process;

/// Metadata descriptor file inside the egg-info directory
pub const PKG_INFO: &str = "PKG-INFO";

/// Suffix of setuptools build-metadata directories
const EGG_INFO_SUFFIX: &str = ".egg-info";

/// Project name and version plus the metadata directory they were read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub name: String,
    pub version: String,
    pub egg_info_dir: PathBuf,
}

impl ProjectMetadata {
    /// `<name>-<version>`, used for the archive filename and default archive root
    pub fn fullname(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// Path of the `PKG-INFO` file
    pub fn pkg_info(&self) -> PathBuf {
        self.egg_info_dir.join(PKG_INFO)
    }

    /// Load metadata from an egg-info directory
    pub fn from_egg_info(egg_info_dir: &Path) -> Result<Self> {
        let pkg_info = egg_info_dir.join(PKG_INFO);
        if !pkg_info.is_file() {
            return Err(BdistVenvError::MetadataNotFound {
                path: egg_info_dir.display().to_string(),
            });
        }

        let content = fs::read_to_string(&pkg_info)?;
        let (name, version) = parse_pkg_info(&content).map_err(|reason| {
            BdistVenvError::MetadataInvalid {
                path: pkg_info.display().to_string(),
                reason,
            }
        })?;

        Ok(Self {
            name,
            version,
            egg_info_dir: egg_info_dir.to_path_buf(),
        })
    }

    /// Locate and load the project's metadata.
    ///
    /// An explicit directory wins. Otherwise `setup.py egg_info` refreshes the
    /// metadata when the project has a `setup.py`, and the project root and
    /// `src/` are searched for the most recently written egg-info directory.
    pub fn discover(project_dir: &Path, egg_info: Option<&Path>, python: &Path) -> Result<Self> {
        if let Some(dir) = egg_info {
            let dir = if dir.is_absolute() {
                dir.to_path_buf()
            } else {
                project_dir.join(dir)
            };
            return Self::from_egg_info(&dir);
        }

        if project_dir.join("setup.py").is_file() {
            info!("generating project metadata with setup.py egg_info");
            let mut cmd = Command::new(python);
            cmd.args(["setup.py", "egg_info"]).current_dir(project_dir);
            process::run_captured(&mut cmd)?;
        }

        match find_egg_info(project_dir) {
            Some(dir) => {
                debug!(egg_info = %dir.display(), "found project metadata");
                Self::from_egg_info(&dir)
            }
            None => Err(BdistVenvError::MetadataNotFound {
                path: project_dir.display().to_string(),
            }),
        }
    }
}

/// Find the egg-info directory whose `PKG-INFO` was written last.
///
/// Stale directories left behind by a rename lose to the freshly generated
/// one; ties go to the first by path.
fn find_egg_info(project_dir: &Path) -> Option<PathBuf> {
    [project_dir.to_path_buf(), project_dir.join("src")]
        .iter()
        .filter_map(|dir| fs::read_dir(dir).ok())
        .flat_map(|entries| entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(EGG_INFO_SUFFIX))
        })
        .filter_map(|path| {
            let modified = fs::metadata(path.join(PKG_INFO))
                .ok()
                .filter(fs::Metadata::is_file)?
                .modified()
                .ok()?;
            Some((modified, path))
        })
        .max_by(|(a_time, a_path), (b_time, b_path)| {
            a_time.cmp(b_time).then_with(|| b_path.cmp(a_path))
        })
        .map(|(_, path)| path)
}

/// Read `Name` and `Version` from the header block of a `PKG-INFO` file
fn parse_pkg_info(content: &str) -> std::result::Result<(String, String), String> {
    let mut name = None;
    let mut version = None;

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        // Folded continuation of the previous header
        if line.starts_with(' ') || line.starts_with('\t') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "Name" if name.is_none() => name = Some(value.trim().to_string()),
            "Version" if version.is_none() => version = Some(value.trim().to_string()),
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| "missing 'Name' header".to_string())?;
    let version = version
        .filter(|v| !v.is_empty())
        .ok_or_else(|| "missing 'Version' header".to_string())?;

    Ok((name, version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DEMO_PKG_INFO: &str = "Metadata-Version: 2.1\n\
                                 Name: demo\n\
                                 Version: 1.0\n\
                                 Summary: Demo project\n\
                                 Description: first line\n        \
                                 Version: not-a-header\n\
                                 \n\
                                 Name: body-text\n";

    fn write_egg_info(root: &Path, dir_name: &str, content: &str) -> PathBuf {
        let dir = root.join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PKG_INFO), content).unwrap();
        dir
    }

    #[test]
    fn test_parse_pkg_info() {
        let (name, version) = parse_pkg_info(DEMO_PKG_INFO).unwrap();
        assert_eq!(name, "demo");
        assert_eq!(version, "1.0");
    }

    #[test]
    fn test_parse_pkg_info_missing_version() {
        let err = parse_pkg_info("Metadata-Version: 2.1\nName: demo\n").unwrap_err();
        assert_eq!(err, "missing 'Version' header");
    }

    #[test]
    fn test_parse_pkg_info_ignores_body() {
        let err = parse_pkg_info("Metadata-Version: 2.1\n\nName: demo\nVersion: 1.0\n").unwrap_err();
        assert_eq!(err, "missing 'Name' header");
    }

    #[test]
    fn test_fullname_and_pkg_info_path() {
        let temp = TempDir::new().unwrap();
        let dir = write_egg_info(temp.path(), "demo.egg-info", DEMO_PKG_INFO);
        let meta = ProjectMetadata::from_egg_info(&dir).unwrap();
        assert_eq!(meta.fullname(), "demo-1.0");
        assert_eq!(meta.pkg_info(), dir.join("PKG-INFO"));
    }

    #[test]
    fn test_discover_in_project_root() {
        let temp = TempDir::new().unwrap();
        write_egg_info(temp.path(), "demo.egg-info", DEMO_PKG_INFO);
        let meta =
            ProjectMetadata::discover(temp.path(), None, Path::new("python3")).unwrap();
        assert_eq!(meta.name, "demo");
        assert_eq!(meta.egg_info_dir, temp.path().join("demo.egg-info"));
    }

    #[test]
    fn test_discover_in_src_layout() {
        let temp = TempDir::new().unwrap();
        write_egg_info(&temp.path().join("src"), "demo.egg-info", DEMO_PKG_INFO);
        let meta =
            ProjectMetadata::discover(temp.path(), None, Path::new("python3")).unwrap();
        assert_eq!(meta.egg_info_dir, temp.path().join("src").join("demo.egg-info"));
    }

    #[test]
    fn test_discover_explicit_relative_egg_info() {
        let temp = TempDir::new().unwrap();
        write_egg_info(
            &temp.path().join("build"),
            "other.egg-info",
            "Name: other\nVersion: 2.0\n",
        );
        let meta = ProjectMetadata::discover(
            temp.path(),
            Some(Path::new("build/other.egg-info")),
            Path::new("python3"),
        )
        .unwrap();
        assert_eq!(meta.fullname(), "other-2.0");
    }

    #[test]
    fn test_discover_without_metadata_or_setup_py() {
        let temp = TempDir::new().unwrap();
        let err =
            ProjectMetadata::discover(temp.path(), None, Path::new("python3")).unwrap_err();
        assert!(matches!(err, BdistVenvError::MetadataNotFound { .. }));
    }

    #[test]
    fn test_egg_info_dir_without_pkg_info_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("empty.egg-info")).unwrap();
        assert!(find_egg_info(temp.path()).is_none());
    }

    #[test]
    fn test_invalid_pkg_info() {
        let temp = TempDir::new().unwrap();
        let dir = write_egg_info(temp.path(), "demo.egg-info", "Name: demo\n");
        let err = ProjectMetadata::from_egg_info(&dir).unwrap_err();
        assert!(matches!(err, BdistVenvError::MetadataInvalid { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_generates_egg_info_with_setup_py() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "from setuptools import setup\nsetup()\n").unwrap();
        let stub = temp.path().join("fake-python");
        fs::write(
            &stub,
            "#!/bin/sh\nmkdir -p demo.egg-info\nprintf 'Name: demo\\nVersion: 0.3\\n' > demo.egg-info/PKG-INFO\n",
        )
        .unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

        let meta = ProjectMetadata::discover(temp.path(), None, &stub).unwrap();
        assert_eq!(meta.fullname(), "demo-0.3");
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_refreshes_stale_egg_info() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write_egg_info(temp.path(), "demo.egg-info", "Name: demo\nVersion: 1.0\n");
        write_egg_info(temp.path(), "aaa-old.egg-info", "Name: aaa-old\nVersion: 0.1\n");
        fs::write(temp.path().join("setup.py"), "setup(name='demo', version='1.1')\n").unwrap();
        let stub = temp.path().join("fake-python");
        fs::write(
            &stub,
            "#!/bin/sh\nsleep 1\nprintf 'Name: demo\\nVersion: 1.1\\n' > demo.egg-info/PKG-INFO\n",
        )
        .unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

        let meta = ProjectMetadata::discover(temp.path(), None, &stub).unwrap();
        assert_eq!(meta.fullname(), "demo-1.1");
        assert_eq!(meta.egg_info_dir, temp.path().join("demo.egg-info"));
    }

    #[test]
    fn test_find_egg_info_prefers_first_by_path_on_tie() {
        let temp = TempDir::new().unwrap();
        let first = write_egg_info(temp.path(), "a.egg-info", "Name: a\nVersion: 1\n");
        let second = write_egg_info(temp.path(), "b.egg-info", "Name: b\nVersion: 1\n");
        let stamp = fs::metadata(first.join(PKG_INFO)).unwrap().modified().unwrap();
        fs::File::options()
            .write(true)
            .open(second.join(PKG_INFO))
            .unwrap()
            .set_modified(stamp)
            .unwrap();

        assert_eq!(find_egg_info(temp.path()), Some(first));
    }
}
