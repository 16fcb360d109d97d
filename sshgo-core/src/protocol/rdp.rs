//! RDP launcher for xfreerdp and rdesktop

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Invocation, Launcher, split_extra_params};
use crate::error::{LaunchError, LaunchResult};
use crate::models::ConnectionRecord;

/// Default RDP port
const DEFAULT_RDP_PORT: u16 = 3389;

/// Which RDP client the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdpClientPreference {
    /// First available of xfreerdp3, xfreerdp, rdesktop
    #[default]
    Auto,
    /// FreeRDP (xfreerdp3 or xfreerdp)
    Xfreerdp,
    /// rdesktop
    Rdesktop,
}

/// Argument convention of an RDP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdpClientKind {
    /// FreeRDP `/flag:value` style
    FreeRdp,
    /// rdesktop `-flag value host:port` style
    Rdesktop,
}

impl fmt::Display for RdpClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeRdp => write!(f, "FreeRDP"),
            Self::Rdesktop => write!(f, "rdesktop"),
        }
    }
}

/// A resolved RDP client binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdpClient {
    /// Argument convention
    pub kind: RdpClientKind,
    /// Binary name or path
    pub program: String,
}

impl RdpClient {
    /// Creates a client description
    #[must_use]
    pub fn new(kind: RdpClientKind, program: impl Into<String>) -> Self {
        Self {
            kind,
            program: program.into(),
        }
    }
}

/// Default arguments for FreeRDP when a record has no extra parameters
#[must_use]
pub fn default_freerdp_args() -> Vec<String> {
    vec!["/cert:ignore".to_string(), "/dynamic-resolution".to_string()]
}

/// Builds RDP invocations
#[derive(Debug, Clone, Default)]
pub struct RdpLauncher {
    /// Resolved client, `None` when no client is installed
    pub client: Option<RdpClient>,
    /// FreeRDP arguments used when the record has no extra parameters
    pub default_args: Vec<String>,
}

impl RdpLauncher {
    /// Creates a launcher for `client`
    #[must_use]
    pub fn new(client: Option<RdpClient>) -> Self {
        Self {
            client,
            default_args: default_freerdp_args(),
        }
    }

    /// Replaces the FreeRDP default arguments
    #[must_use]
    pub fn with_default_args(mut self, args: Vec<String>) -> Self {
        self.default_args = args;
        self
    }
}

/// `/v:host:port [/u:user] [/p:secret] extra-or-defaults`
#[must_use]
pub fn build_freerdp_args(record: &ConnectionRecord, default_args: &[String]) -> Vec<String> {
    let port = record.effective_port().unwrap_or(DEFAULT_RDP_PORT);

    let mut args = vec![format!("/v:{}:{port}", record.host)];
    if !record.username.is_empty() {
        args.push(format!("/u:{}", record.username));
    }
    if !record.secret.is_empty() {
        args.push(format!("/p:{}", record.secret.expose()));
    }

    let extra = split_extra_params(&record.extra_params);
    if extra.is_empty() {
        args.extend(default_args.iter().cloned());
    } else {
        args.extend(extra);
    }
    args
}

/// `[-u user] [-p secret] [extra] host:port`
#[must_use]
pub fn build_rdesktop_args(record: &ConnectionRecord) -> Vec<String> {
    let port = record.effective_port().unwrap_or(DEFAULT_RDP_PORT);

    let mut args = Vec::new();
    if !record.username.is_empty() {
        args.push("-u".to_string());
        args.push(record.username.clone());
    }
    if !record.secret.is_empty() {
        args.push("-p".to_string());
        args.push(record.secret.expose().to_string());
    }
    args.extend(split_extra_params(&record.extra_params));
    args.push(format!("{}:{port}", record.host));
    args
}

impl Launcher for RdpLauncher {
    fn build_invocation(&self, record: &ConnectionRecord) -> LaunchResult<Invocation> {
        let client = self
            .client
            .as_ref()
            .ok_or(LaunchError::ClientNotFound("RDP"))?;
        let args = match client.kind {
            RdpClientKind::FreeRdp => build_freerdp_args(record, &self.default_args),
            RdpClientKind::Rdesktop => build_rdesktop_args(record),
        };
        Ok(Invocation::new(client.program.clone(), args))
    }
}
