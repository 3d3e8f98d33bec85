use std::fs;
use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use tracing::info;
use walkdir::WalkDir;

use crate::format::format_bytes;

/// Replace the contents of `target` with the contents of `source`.
///
/// The target directory itself is kept (and created if absent); everything
/// under it is removed first, so target-only entries never survive a mirror.
/// A missing source fails before any side effect on the target.
pub fn replace_directory(source: &Path, target: &Path) -> Result<()> {
    if !source.exists() {
        return Err(eyre!(
            "source directory {} does not exist",
            source.display()
        ));
    }

    if target.exists() {
        info!(path = %target.display(), "clearing target directory");
        clear_directory(target)?;
    } else {
        info!(path = %target.display(), "creating target directory");
        fs::create_dir_all(target)
            .wrap_err_with(|| format!("creating {}", target.display()))?;
    }

    let (entries, bytes) = copy_tree(source, target)?;
    info!(entries, total = %format_bytes(bytes), "directory replacement finished");
    Ok(())
}

fn clear_directory(dir: &Path) -> Result<()> {
    let listing =
        fs::read_dir(dir).wrap_err_with(|| format!("reading {}", dir.display()))?;
    for entry in listing {
        let entry = entry.wrap_err_with(|| format!("reading {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)
                .wrap_err_with(|| format!("removing {}", path.display()))?;
        } else {
            // Covers regular files and symlinks, including links to directories.
            fs::remove_file(&path)
                .wrap_err_with(|| format!("removing {}", path.display()))?;
        }
    }
    Ok(())
}

fn copy_tree(source: &Path, target: &Path) -> Result<(usize, u64)> {
    let mut entries = 0usize;
    let mut bytes = 0u64;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.wrap_err("walking source directory")?;
        let dest = target.join(entry.path().strip_prefix(source)?);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .wrap_err_with(|| format!("creating {}", dest.display()))?;
        } else {
            bytes += fs::copy(entry.path(), &dest)
                .wrap_err_with(|| format!("copying {}", entry.path().display()))?;
        }
        entries += 1;
    }
    Ok((entries, bytes))
}
