//! Small filesystem helpers shared by the store and the shell block manager.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Reads a UTF-8 text file, returning `None` when it does not exist.
///
/// # Errors
///
/// Any IO error other than `NotFound`.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Follows a symlink so the rename lands on the link target, not the link.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Replaces `path` with `contents` via a temporary file in the same
/// directory followed by a rename.
///
/// An existing file keeps its permissions. A new file gets `new_file_mode`
/// on Unix.
///
/// # Errors
///
/// Any IO error while creating, writing, syncing or renaming the temporary
/// file. On failure the original file is untouched.
pub fn write_atomic(path: &Path, contents: &str, new_file_mode: u32) -> io::Result<()> {
    let target = resolve_target(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let mut tmp = tempfile::Builder::new()
        .prefix(".sshgo-")
        .suffix(".tmp")
        .tempfile_in(&dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;

    let permissions = match existing {
        Some(permissions) => Some(permissions),
        None => new_file_permissions(new_file_mode),
    };
    if let Some(permissions) = permissions {
        fs::set_permissions(tmp.path(), permissions)?;
    }

    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions(mode: u32) -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn new_file_permissions(_mode: u32) -> Option<fs::Permissions> {
    None
}
