//! Protocol identifiers for stored connections.

use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Protocol of a stored connection
///
/// Only [`Protocol::Ssh`] and [`Protocol::Rdp`] can be launched. Any other
/// token found in a hand-edited store is kept verbatim as
/// [`Protocol::Other`] so the rest of the store stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Protocol {
    /// SSH protocol
    #[default]
    Ssh,
    /// RDP protocol
    Rdp,
    /// Unrecognised protocol token
    Other(String),
}

impl Protocol {
    /// Returns the protocol identifier as written to the store
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ssh => "ssh",
            Self::Rdp => "rdp",
            Self::Other(token) => token,
        }
    }

    /// Returns the default port for this protocol, if it has one
    #[must_use]
    pub const fn default_port(&self) -> Option<u16> {
        match self {
            Self::Ssh => Some(22),
            Self::Rdp => Some(3389),
            Self::Other(_) => None,
        }
    }

    /// Returns true for protocols that can be launched
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Ssh | Self::Rdp)
    }

    /// Parses a store token. Matching is case-insensitive and an empty
    /// token means SSH.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.is_empty() || token.eq_ignore_ascii_case("ssh") {
            Self::Ssh
        } else if token.eq_ignore_ascii_case("rdp") {
            Self::Rdp
        } else {
            Self::Other(token.to_string())
        }
    }
}

impl FromStr for Protocol {
    type Err = RecordError;

    /// Strict parse used for user input: only supported protocols are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_token(s.trim()) {
            Self::Other(token) => Err(RecordError::UnsupportedProtocol(token)),
            _ if s.trim().is_empty() => Err(RecordError::UnsupportedProtocol(String::new())),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh => write!(f, "SSH"),
            Self::Rdp => write!(f, "RDP"),
            Self::Other(token) => write!(f, "{token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_case_insensitive() {
        assert_eq!(Protocol::from_token("SSH"), Protocol::Ssh);
        assert_eq!(Protocol::from_token("Rdp"), Protocol::Rdp);
        assert_eq!(Protocol::from_token(""), Protocol::Ssh);
        assert_eq!(
            Protocol::from_token("vnc"),
            Protocol::Other("vnc".to_string())
        );
    }

    #[test]
    fn default_ports() {
        assert_eq!(Protocol::Ssh.default_port(), Some(22));
        assert_eq!(Protocol::Rdp.default_port(), Some(3389));
        assert_eq!(Protocol::Other("x".into()).default_port(), None);
    }

    #[test]
    fn strict_parse_rejects_unknown_and_empty() {
        assert_eq!("rdp".parse::<Protocol>(), Ok(Protocol::Rdp));
        assert_eq!(
            "telnet".parse::<Protocol>(),
            Err(RecordError::UnsupportedProtocol("telnet".into()))
        );
        assert!("".parse::<Protocol>().is_err());
    }

    #[test]
    fn unknown_token_is_kept_verbatim() {
        assert_eq!(Protocol::from_token("Telnet").as_str(), "Telnet");
    }
}
