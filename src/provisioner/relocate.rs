//! Make a provisioned environment relocatable
//!
//! Two kinds of files carry the environment's absolute location after pip has
//! run: console scripts, whose shebang names the environment's interpreter,
//! and `.pth` / `.egg-link` files listing import paths. Scripts get a `/bin/sh`
//! trampoline that finds the interpreter next to the script at run time with
//! shell builtins only, and
//! path files get paths relative to their own directory, which `site` resolves
//! against the site-packages directory.
//!
//! Symlinks, binaries and anything not pointing into the environment are left
//! untouched.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::Result;
use crate::provisioner::scripts_dir;

/// Prefix of the second line of pip's long-shebang `/bin/sh` launcher
const SH_EXEC_PREFIX: &str = "'''exec' '";

/// Rewrite the environment at `env_dir` in place
pub fn make_relocatable(env_dir: &Path) -> Result<()> {
    let prefixes = location_prefixes(env_dir)?;

    let scripts = fix_scripts(env_dir, &prefixes)?;
    let path_files = fix_path_files(env_dir, &prefixes)?;

    info!(scripts, path_files, "made environment relocatable");
    Ok(())
}

/// Every spelling of the environment's location that may appear in its files:
/// the absolute path it was created with and its canonical form.
fn location_prefixes(env_dir: &Path) -> Result<Vec<PathBuf>> {
    let absolute = std::path::absolute(env_dir)?;
    let canonical = dunce::canonicalize(env_dir)?;

    let mut prefixes = vec![absolute];
    if !prefixes.contains(&canonical) {
        prefixes.push(canonical);
    }
    Ok(prefixes)
}

/// Map an absolute path inside the environment onto `env_dir`, if it is inside
fn rebase(path: &Path, env_dir: &Path, prefixes: &[PathBuf]) -> Option<PathBuf> {
    prefixes
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix).ok())
        .map(|rest| env_dir.join(rest))
}

fn fix_scripts(env_dir: &Path, prefixes: &[PathBuf]) -> Result<usize> {
    let dir = scripts_dir(env_dir);
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut entries = fs::read_dir(&dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    let mut rewritten = 0;
    for path in entries {
        let file_type = fs::symlink_metadata(&path)?.file_type();
        if !file_type.is_file() {
            continue;
        }
        // Compiled launchers and other binaries
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        if let Some(updated) = rewrite_script(&content, env_dir, &dir, prefixes) {
            debug!(script = %path.display(), "rewriting shebang");
            fs::write(&path, updated)?;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

/// Replace a script's launcher lines when they name an interpreter inside the environment
fn rewrite_script(
    content: &str,
    env_dir: &Path,
    scripts_dir: &Path,
    prefixes: &[PathBuf],
) -> Option<String> {
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    let shebang = first.strip_prefix("#!")?.trim();

    let (interpreter, body) = if shebang == "/bin/sh" {
        // pip falls back to a sh launcher when the shebang would be too long
        let (second, rest) = rest.split_once('\n').unwrap_or((rest, ""));
        let quoted = second.strip_prefix(SH_EXEC_PREFIX)?;
        let (interpreter, _) = quoted.split_once('\'')?;
        let (third, body) = rest.split_once('\n').unwrap_or((rest, ""));
        if third.trim_end() != "' '''" {
            return None;
        }
        (interpreter, body)
    } else {
        (shebang.split_whitespace().next()?, rest)
    };

    let interpreter = rebase(Path::new(interpreter), env_dir, prefixes)?;
    let relative = relative_path(&interpreter, scripts_dir);

    Some(format!(
        "#!/bin/sh\n\
         '''exec' \"$(cd -P -- \"$(dirname -- \"$0\")\" && pwd)\"/'{}' \"$0\" \"$@\"\n\
         ' '''\n{}",
        sh_single_quoted(&relative.display().to_string()),
        body
    ))
}

/// Escape `value` for use between single quotes in a shell word
fn sh_single_quoted(value: &str) -> String {
    value.replace('\'', r"'\''")
}

fn fix_path_files(env_dir: &Path, prefixes: &[PathBuf]) -> Result<usize> {
    let mut rewritten = 0;

    for entry in WalkDir::new(env_dir).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_path_file(entry.path()) {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };
        let base = entry.path().parent().unwrap_or(env_dir);
        if let Some(updated) = rewrite_path_file(&content, env_dir, base, prefixes) {
            debug!(file = %entry.path().display(), "rewriting import paths");
            fs::write(entry.path(), updated)?;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

fn is_path_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("pth" | "egg-link")
    )
}

/// Make absolute entries pointing into the environment relative to `base`
fn rewrite_path_file(
    content: &str,
    env_dir: &Path,
    base: &Path,
    prefixes: &[PathBuf],
) -> Option<String> {
    let mut changed = false;

    let lines: Vec<String> = content
        .lines()
        .map(|line| {
            let entry = line.trim();
            if entry.starts_with('#') || entry.starts_with("import") {
                return line.to_string();
            }
            let path = Path::new(entry);
            if !path.is_absolute() {
                return line.to_string();
            }
            match rebase(path, env_dir, prefixes) {
                Some(target) => {
                    changed = true;
                    relative_path(&target, base).display().to_string()
                }
                None => line.to_string(),
            }
        })
        .collect();

    if !changed {
        return None;
    }

    let mut updated = lines.join("\n");
    if content.ends_with('\n') {
        updated.push('\n');
    }
    Some(updated)
}

/// Path of `target` relative to `base`; both must share the same root
fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target: Vec<Component<'_>> = target.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();

    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
