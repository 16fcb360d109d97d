//! Applies block operations to rc files on disk.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::block::{self, BlockSpec, BlockState};
use crate::error::{ShellError, ShellResult};
use crate::fs_util;

/// Suffix appended to an rc file name for the pre-uninstall copy
pub const BACKUP_SUFFIX: &str = ".sshgo-backup";

/// Mode used if an rc file has to be created from scratch (never by install)
const RC_FILE_MODE: u32 = 0o644;

/// What an operation did to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// The file does not exist and was left alone
    Missing,
    /// Nothing to do
    Unchanged,
    /// The file was rewritten
    Updated,
}

/// Result of the best-effort backup taken before an uninstall
#[derive(Debug)]
pub enum BackupStatus {
    /// No rewrite happened, so no backup was taken
    NotNeeded,
    /// Backup written to this path
    Written(PathBuf),
    /// Backup failed; the uninstall went ahead anyway
    Failed {
        /// Intended backup path
        path: PathBuf,
        /// Why the copy failed
        error: io::Error,
    },
}

/// Outcome of [`uninstall_file`]
#[derive(Debug)]
pub struct UninstallOutcome {
    /// Effect on the rc file
    pub change: FileChange,
    /// Effect on the backup copy
    pub backup: BackupStatus,
}

fn access(path: &Path) -> impl FnOnce(io::Error) -> ShellError + '_ {
    move |source| ShellError::FileAccess {
        path: path.to_path_buf(),
        source,
    }
}

/// `<path>.sshgo-backup`
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// State of the block in `path`, or `None` when the file does not exist.
///
/// # Errors
///
/// [`ShellError::FileAccess`] when the file exists but cannot be read.
pub fn detect_file(path: &Path, spec: &BlockSpec) -> ShellResult<Option<BlockState>> {
    let content = fs_util::read_optional(path).map_err(access(path))?;
    Ok(content.map(|c| block::detect(&c, spec)))
}

/// Appends the block to an existing file unless it is already there.
///
/// # Errors
///
/// [`ShellError::FileAccess`] when reading or rewriting fails.
pub fn install_file(path: &Path, spec: &BlockSpec) -> ShellResult<FileChange> {
    let Some(content) = fs_util::read_optional(path).map_err(access(path))? else {
        return Ok(FileChange::Missing);
    };
    match block::install(&content, spec) {
        Some(updated) => {
            fs_util::write_atomic(path, &updated, RC_FILE_MODE).map_err(access(path))?;
            Ok(FileChange::Updated)
        }
        None => Ok(FileChange::Unchanged),
    }
}

/// Removes the block and stray lines, copying the file (with its
/// permissions) to [`backup_path`] first.
///
/// # Errors
///
/// [`ShellError::FileAccess`] when reading or rewriting fails. A failed
/// backup is reported in [`UninstallOutcome::backup`] instead.
pub fn uninstall_file(path: &Path, spec: &BlockSpec) -> ShellResult<UninstallOutcome> {
    let Some(content) = fs_util::read_optional(path).map_err(access(path))? else {
        return Ok(UninstallOutcome {
            change: FileChange::Missing,
            backup: BackupStatus::NotNeeded,
        });
    };
    let Some(updated) = block::uninstall(&content, spec) else {
        return Ok(UninstallOutcome {
            change: FileChange::Unchanged,
            backup: BackupStatus::NotNeeded,
        });
    };

    let backup = backup_path(path);
    let backup = match fs::copy(path, &backup) {
        Ok(_) => BackupStatus::Written(backup),
        Err(error) => BackupStatus::Failed {
            path: backup,
            error,
        },
    };

    fs_util::write_atomic(path, &updated, RC_FILE_MODE).map_err(access(path))?;
    Ok(UninstallOutcome {
        change: FileChange::Updated,
        backup,
    })
}
