//! Error types for `sshgo`
//!
//! Each layer has its own error enum.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Field-level failures while decoding or validating a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line did not split into exactly seven fields.
    #[error("expected {expected} fields separated by '|', found {found}")]
    FieldCount {
        /// Required number of fields
        expected: usize,
        /// Number of fields actually present
        found: usize,
    },

    /// The port field is neither empty nor a number in 1..=65535.
    #[error("invalid port '{0}' (must be 1-65535 or empty)")]
    InvalidPort(String),

    /// The name field is empty or whitespace only.
    #[error("name must not be empty")]
    EmptyName,

    /// The name starts with `#` and would read back as a comment.
    #[error("name must not start with '#'")]
    CommentName,

    /// The host field is empty.
    #[error("host must not be empty")]
    EmptyHost,

    /// A field contains the delimiter or a line break.
    #[error("field '{field}' must not contain '|' or line breaks")]
    ForbiddenCharacter {
        /// Name of the offending field
        field: &'static str,
    },

    /// The protocol is not one of the supported ones.
    #[error("unsupported protocol '{0}' (supported: ssh, rdp)")]
    UnsupportedProtocol(String),
}

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors raised by the connection store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A non-comment line of the store could not be decoded.
    #[error("malformed record on line {line}: {source}")]
    MalformedRecord {
        /// 1-based line number in the store file
        line: usize,
        /// Underlying decode failure
        #[source]
        source: RecordError,
    },

    /// A record passed to add/edit failed validation.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    /// `add` (or a rename through `edit`) collided with an existing name.
    #[error("a connection named '{0}' already exists")]
    DuplicateName(String),

    /// No record with the requested name.
    #[error("connection not found: {0}")]
    NotFound(String),

    /// Reading or writing the store failed.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while editing shell startup files.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading or writing an rc file (or the completion script) failed.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Result type for shell integration operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Errors raised while building or running a client invocation.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The record's protocol has no launcher.
    #[error("unsupported protocol '{0}' (supported: ssh, rdp)")]
    UnsupportedProtocol(String),

    /// No usable client binary was found on this system.
    #[error("no {0} client found in PATH")]
    ClientNotFound(&'static str),

    /// The external program could not be started.
    #[error("failed to start {program}: {source}")]
    ExternalProcess {
        /// Program that failed to start
        program: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Result type for launch operations
pub type LaunchResult<T> = Result<T, LaunchError>;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Settings file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid TOML for [`crate::config::Settings`].
    #[error("invalid settings in {}: {message}", path.display())]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// No configuration directory could be determined.
    #[error("unable to determine the configuration directory")]
    NoConfigDir,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
