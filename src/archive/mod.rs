//! Gzip-compressed tar archive writer
//!
//! Entries are written in file-name order with deterministic headers, so two
//! builds of the same tree produce the same entry list. The archive is written
//! next to its destination and renamed into place once complete.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use flate2::{Compression, GzBuilder};
use tar::{Builder, HeaderMode};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BdistVenvError, Result};

/// Archive root that places the tree's contents directly at the top level
pub const CURRENT_DIR_ROOT: &str = ".";

/// Normalize a requested archive root.
///
/// Leading separators are dropped, as tar tools do, and an empty result means
/// no root. A root with a `..` component would escape the extraction
/// directory and is rejected.
pub fn normalize_root(root: &str) -> Result<String> {
    let trimmed = root.trim_start_matches(['/', '\\']);
    if trimmed.is_empty() || trimmed == CURRENT_DIR_ROOT {
        return Ok(CURRENT_DIR_ROOT.to_string());
    }
    if Path::new(trimmed)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(BdistVenvError::InvalidArchiveRoot {
            root: root.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Archive the whole of `src_dir` into `output_path`, nesting every entry
/// under `archive_root` (see [`normalize_root`]) unless it is `"."`.
///
/// The parent directory of `output_path` must already exist.
pub fn write_archive(src_dir: &Path, output_path: &Path, archive_root: &str) -> Result<()> {
    let archive_root = normalize_root(archive_root)?;

    let parent = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let temp = tempfile::Builder::new()
        .prefix(".bdist-venv-")
        .suffix(".tar.gz.part")
        .tempfile_in(parent)?;

    write_gzip_tar(temp.as_file(), src_dir, &archive_root)?;
    temp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644))?;
    }

    temp.persist(output_path)
        .map_err(|e| BdistVenvError::ArchiveWriteFailed {
            path: output_path.display().to_string(),
            reason: e.error.to_string(),
        })?;

    Ok(())
}

fn write_gzip_tar(file: &File, src_dir: &Path, archive_root: &str) -> Result<()> {
    let encoder = GzBuilder::new()
        .mtime(0)
        .write(file, Compression::default());

    let mut tar = Builder::new(encoder);
    tar.mode(HeaderMode::Deterministic);
    tar.follow_symlinks(false);

    let mut entries = 0usize;
    for entry in WalkDir::new(src_dir).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src_dir) else {
            continue;
        };

        if relative.as_os_str().is_empty() {
            if archive_root != CURRENT_DIR_ROOT {
                tar.append_dir(archive_root, src_dir)?;
                entries += 1;
            }
            continue;
        }

        tar.append_path_with_name(entry.path(), entry_name(archive_root, relative))?;
        entries += 1;
    }

    let encoder = tar.into_inner()?;
    encoder.finish()?;

    debug!(entries, root = archive_root, "wrote archive entries");
    Ok(())
}

/// Name of an entry inside the archive for a path relative to the tree root
pub fn entry_name(archive_root: &str, relative: &Path) -> PathBuf {
    if archive_root == CURRENT_DIR_ROOT {
        relative.to_path_buf()
    } else {
        Path::new(archive_root).join(relative)
    }
}
