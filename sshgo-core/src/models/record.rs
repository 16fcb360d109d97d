//! The connection record stored on each line of the store.

use std::fmt;

use super::protocol::Protocol;
use crate::error::{RecordError, RecordResult};

/// Credential material kept exactly as entered.
///
/// The value is stored in plain text in the (owner-only) store file. The
/// wrapper exists so that `Debug` output never leaks it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true when no secret is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(<empty>)")
        } else {
            f.write_str("Secret(****)")
        }
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One managed endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    /// Unique key within a store
    pub name: String,
    /// Connection protocol
    pub protocol: Protocol,
    /// Target hostname or IP address
    pub host: String,
    /// Explicit port; `None` means the protocol default
    pub port: Option<u16>,
    /// Login name; empty lets the client prompt
    pub username: String,
    /// Password, empty for key-based or interactive auth
    pub secret: Secret,
    /// Free-form arguments handed to the client
    pub extra_params: String,
}

impl ConnectionRecord {
    /// Creates a record with empty optional fields
    #[must_use]
    pub fn new(name: impl Into<String>, protocol: Protocol, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocol,
            host: host.into(),
            port: None,
            username: String::new(),
            secret: Secret::default(),
            extra_params: String::new(),
        }
    }

    /// Sets an explicit port
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the secret
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<Secret>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Sets the extra client parameters
    #[must_use]
    pub fn with_extra_params(mut self, extra: impl Into<String>) -> Self {
        self.extra_params = extra.into();
        self
    }

    /// Port used at launch time: the stored port or the protocol default
    #[must_use]
    pub fn effective_port(&self) -> Option<u16> {
        self.port.or_else(|| self.protocol.default_port())
    }

    /// `user@host`, or just `host` when no username is stored
    #[must_use]
    pub fn destination(&self) -> String {
        if self.username.is_empty() {
            self.host.clone()
        } else {
            format!("{}@{}", self.username, self.host)
        }
    }

    /// Checks the invariants required before a record is written.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`RecordError`].
    pub fn validate(&self) -> RecordResult<()> {
        if self.name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if self.name.trim_start().starts_with('#') {
            return Err(RecordError::CommentName);
        }
        if self.host.trim().is_empty() {
            return Err(RecordError::EmptyHost);
        }
        if !self.protocol.is_supported() {
            return Err(RecordError::UnsupportedProtocol(
                self.protocol.as_str().to_string(),
            ));
        }
        if self.port == Some(0) {
            return Err(RecordError::InvalidPort("0".to_string()));
        }

        let fields: [(&'static str, &str); 5] = [
            ("name", &self.name),
            ("host", &self.host),
            ("username", &self.username),
            ("secret", self.secret.expose()),
            ("extra_params", &self.extra_params),
        ];
        for (field, value) in fields {
            if value.contains(['|', '\n', '\r']) {
                return Err(RecordError::ForbiddenCharacter { field });
            }
        }
        Ok(())
    }
}
