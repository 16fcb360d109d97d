//! Shell integration: idempotent marker blocks in rc files.
//!
//! - [`block`] - pure detect/install/uninstall over file content
//! - [`targets`] - rc file locations, dialects and block contents
//! - [`files`] - the same operations applied to files on disk

pub mod block;
pub mod files;
pub mod targets;

pub use block::{BlockSpec, BlockState, detect, install, uninstall};
pub use files::{
    BACKUP_SUFFIX, BackupStatus, FileChange, UninstallOutcome, backup_path, detect_file,
    install_file, uninstall_file,
};
pub use targets::{
    BlockKind, Scope, ShellDialect, ShellTarget, block_spec, select_targets, standard_targets,
};
