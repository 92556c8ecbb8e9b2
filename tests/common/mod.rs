//! Common test utilities for bdist-venv integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tempfile::TempDir;

/// Stand-in interpreter: answers the host probe, generates egg-info from the
/// name and version in `setup.py` and provisions a small environment whose
/// `pip` records its arguments.
/// `FAKE_PIP_FAIL` makes the environment's `pip` exit with an error.
const FAKE_PYTHON: &str = r#"#!/bin/sh
case "$1" in
  -c)
    echo 3.12
    echo linux-x86_64
    ;;
  -m)
    for env; do :; done
    site="$env/lib/python3.12/site-packages"
    mkdir -p "$env/bin" "$site"
    printf '#!/bin/sh\nexit 0\n' > "$env/bin/python"
    cat > "$env/bin/pip" <<PIP
#!/bin/sh
if [ -n "\$FAKE_PIP_FAIL" ]; then
  echo "pip: installation failed" >&2
  exit 1
fi
echo "\$@" > "$site/installed.txt"
printf '#!%s/bin/python\nimport demo\n' "$env" > "$env/bin/demo"
chmod 755 "$env/bin/demo"
echo "$site/demo_src" > "$site/demo.pth"
PIP
    chmod 755 "$env/bin/python" "$env/bin/pip"
    ;;
  setup.py)
    name=$(sed -n "s/.*name='\([^']*\)'.*/\1/p" setup.py)
    version=$(sed -n "s/.*version='\([^']*\)'.*/\1/p" setup.py)
    mkdir -p "$name.egg-info"
    printf 'Metadata-Version: 2.1\nName: %s\nVersion: %s\n' "$name" "$version" > "$name.egg-info/PKG-INFO"
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 2
    ;;
esac
"#;

/// A throwaway Python project plus a fake interpreter driving it
pub struct TestProject {
    pub temp: TempDir,
    /// Canonical project root
    pub path: PathBuf,
    /// Fake interpreter, outside the project tree
    pub python: PathBuf,
}

impl TestProject {
    /// Project with `demo.egg-info/PKG-INFO` for `demo 1.0` already generated
    pub fn new() -> Self {
        let project = Self::without_metadata();
        project.write_file(
            "demo.egg-info/PKG-INFO",
            "Metadata-Version: 2.1\nName: demo\nVersion: 1.0\nSummary: Demo project\n",
        );
        project
    }

    /// Project with only a `setup.py`; metadata has to be generated
    pub fn without_metadata() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp dir");
        let path = root.join("project");
        std::fs::create_dir_all(&path).expect("Failed to create project directory");

        let python = root.join("python");
        std::fs::write(&python, FAKE_PYTHON).expect("Failed to write fake interpreter");
        make_executable(&python);

        let project = Self { temp, path, python };
        project.write_file(
            "setup.py",
            "from setuptools import setup\nsetup(name='demo', version='1.0')\n",
        );
        project
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Check if a path exists relative to the project root
    pub fn exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// `bdist-venv` command pointed at this project and its fake interpreter
    pub fn cmd(&self) -> assert_cmd::Command {
        #[allow(deprecated)]
        let mut cmd = assert_cmd::Command::cargo_bin("bdist-venv").expect("binary is built");
        cmd.env("BDIST_VENV_PROJECT", &self.path)
            .env("BDIST_VENV_PYTHON", &self.python)
            .env_remove("FAKE_PIP_FAIL")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make file executable");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Read every regular file in a `.tar.gz` into memory, keyed by entry path
pub fn archive_files(archive: &Path) -> BTreeMap<String, String> {
    let file = std::fs::File::open(archive).expect("Failed to open archive");
    let mut tar = tar::Archive::new(GzDecoder::new(file));

    let mut files = BTreeMap::new();
    for entry in tar.entries().expect("Failed to read archive") {
        let mut entry = entry.expect("Failed to read archive entry");
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry
            .path()
            .expect("Entry has a path")
            .to_string_lossy()
            .into_owned();
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .expect("Entry is valid UTF-8");
        files.insert(name, content);
    }
    files
}
