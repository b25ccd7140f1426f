//! File system helpers for write-back.

use std::fs;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;

/// Replace `path` with `contents` through a temp file in the same directory.
///
/// Readers see either the old or the new file, never a partial write. An
/// existing file keeps its permissions. A symlink is followed and its
/// target is replaced, so the link itself survives.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let target = resolve_symlink(path)?;
    let path = target.as_path();

    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file().set_permissions(metadata.permissions())?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn resolve_symlink(path: &Utf8Path) -> io::Result<Utf8PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => path.canonicalize_utf8(),
        _ => Ok(path.to_path_buf()),
    }
}
