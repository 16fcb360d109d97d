//! CLI error types and exit codes.

use sshgo_core::error::{ConfigError, LaunchError, RecordError, ShellError, StoreError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other non-connection errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - unknown connection or the client could not be
    /// started
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connection not found
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// More than one connection matches a prefix
    #[error("Ambiguous connection name '{name}'. Matches: {matches}")]
    Ambiguous {
        /// What the user typed
        name: String,
        /// Comma-separated candidates
        matches: String,
    },

    /// Record rejected by validation
    #[error("Invalid connection: {0}")]
    Invalid(#[from] RecordError),

    /// Store error other than a missing name
    #[error("{0}")]
    Store(StoreError),

    /// Shell rc file error
    #[error("{0}")]
    Shell(#[from] ShellError),

    /// Launch failure
    #[error("Connection error: {0}")]
    Launch(#[from] LaunchError),

    /// The launched client exited unsuccessfully
    #[cfg_attr(unix, allow(dead_code))]
    #[error("{program} exited with status {code}")]
    ProcessExit {
        /// Client program
        program: String,
        /// Its exit status
        code: i32,
    },

    /// Bad command-line input
    #[error("{0}")]
    Usage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => Self::ConnectionNotFound(name),
            other => Self::Store(other),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, validation, store, rc files, IO)
    /// - 2: Connection failure (unknown connection, client not started)
    /// - anything else: the launched client's own status
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionNotFound(_) | Self::Launch(_) => exit_codes::CONNECTION_FAILURE,
            Self::ProcessExit { code, .. } => *code,
            Self::Config(_)
            | Self::Ambiguous { .. }
            | Self::Invalid(_)
            | Self::Store(_)
            | Self::Shell(_)
            | Self::Usage(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// False when the failure was already visible to the user
    #[must_use]
    pub const fn should_report(&self) -> bool {
        !matches!(self, Self::ProcessExit { .. })
    }
}
