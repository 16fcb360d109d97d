//! `sshgo` Core Library
//!
//! Connection registry and shell integration for the `sshgo` connection
//! manager.
//!
//! # Crate Structure
//!
//! - [`models`] - Connection records and protocols
//! - [`store`] - Record codec and the file-backed connection registry
//! - [`completion`] - Profile name export and the Bash completion script
//! - [`shell`] - Idempotent marker blocks in shell rc files
//! - [`protocol`] - Launch dispatcher for ssh, sshpass and RDP clients
//! - [`config`] - Store location and optional settings
//! - [`tracing`] - Subscriber setup for the binary

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod completion;
pub mod config;
pub mod error;
mod fs_util;
pub mod models;
pub mod protocol;
pub mod shell;
pub mod store;
pub mod tracing;

pub use error::{
    ConfigError, LaunchError, RecordError, ShellError, StoreError,
};
pub use models::{ConnectionRecord, Protocol, Secret};
pub use store::{ConnectionStore, StoreDocument};
