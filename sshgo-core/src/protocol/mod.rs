//! Launch dispatcher
//!
//! Turns a [`ConnectionRecord`] into the external program invocation that
//! opens the session. Building is pure; running the invocation is left to
//! the caller.

mod detection;
mod rdp;
mod ssh;

pub use detection::{detect_rdp_client_with, which_binary};
pub use rdp::{
    RdpClient, RdpClientKind, RdpClientPreference, RdpLauncher, build_freerdp_args,
    build_rdesktop_args, default_freerdp_args,
};
pub use ssh::{SSHPASS_ENV, SshLauncher, build_ssh_args};

use std::borrow::Cow;
use std::process::Command;

use crate::error::{LaunchError, LaunchResult};
use crate::models::{ConnectionRecord, Protocol};

/// Placeholder shown instead of secret values
const MASK: &str = "****";

/// A fully built external command
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to run
    pub program: String,
    /// Command-line arguments
    pub args: Vec<String>,
    /// Extra environment variables
    pub env: Vec<(String, String)>,
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field(
                "env",
                &self.env.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Invocation {
    /// Creates an invocation without extra environment
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: Vec::new(),
        }
    }

    /// Adds an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Builds the [`Command`] for this invocation
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Shell-quoted command line with `secret` and environment values masked
    #[must_use]
    pub fn display_masked(&self, secret: &str) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(key, _)| format!("{key}={MASK}"))
            .collect();
        parts.push(quote_word(&self.program).into_owned());
        parts.extend(self.args.iter().map(|arg| {
            if is_sensitive_arg(arg, secret) {
                mask_arg(arg)
            } else {
                quote_word(arg).into_owned()
            }
        }));
        parts.join(" ")
    }
}

/// Leaves plain words such as `user@host` or `/v:host:3389` bare and
/// shell-quotes everything else.
fn quote_word(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=/,.+:@%".contains(c));
    if plain {
        Cow::Borrowed(word)
    } else {
        shell_words::quote(word)
    }
}

/// Returns true if the argument carries a secret that must not be echoed.
fn is_sensitive_arg(arg: &str, secret: &str) -> bool {
    let lower = arg.to_lowercase();
    (!secret.is_empty() && arg == secret)
        || lower.starts_with("/p:")
        || lower.contains("password=")
}

/// Masks the value part of a sensitive argument, keeping its key prefix.
fn mask_arg(arg: &str) -> String {
    if arg.to_lowercase().starts_with("/p:") {
        return format!("/p:{MASK}");
    }
    if let Some(pos) = arg.find('=') {
        return format!("{}{MASK}", &arg[..=pos]);
    }
    MASK.to_string()
}

/// Splits `extra_params` with POSIX shell rules, falling back to plain
/// whitespace splitting when the quoting is unbalanced.
#[must_use]
pub fn split_extra_params(extra: &str) -> Vec<String> {
    if extra.trim().is_empty() {
        return Vec::new();
    }
    shell_words::split(extra)
        .unwrap_or_else(|_| extra.split_whitespace().map(str::to_string).collect())
}

/// Builds invocations for one protocol
pub trait Launcher {
    /// Builds the invocation for `record`
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when the record cannot be launched.
    fn build_invocation(&self, record: &ConnectionRecord) -> LaunchResult<Invocation>;
}

/// Launchers for every supported protocol
#[derive(Debug, Clone, Default)]
pub struct LaunchSettings {
    /// SSH launcher
    pub ssh: SshLauncher,
    /// RDP launcher
    pub rdp: RdpLauncher,
}

impl LaunchSettings {
    /// Picks the launcher for `protocol`
    #[must_use]
    pub fn launcher_for(&self, protocol: &Protocol) -> Option<&dyn Launcher> {
        match protocol {
            Protocol::Ssh => Some(&self.ssh),
            Protocol::Rdp => Some(&self.rdp),
            Protocol::Other(_) => None,
        }
    }
}

/// Builds the invocation for `record`.
///
/// # Errors
///
/// [`LaunchError::UnsupportedProtocol`] for protocols other than ssh and
/// rdp, [`LaunchError::ClientNotFound`] when no RDP client is available.
pub fn build_invocation(
    record: &ConnectionRecord,
    settings: &LaunchSettings,
) -> LaunchResult<Invocation> {
    settings
        .launcher_for(&record.protocol)
        .ok_or_else(|| LaunchError::UnsupportedProtocol(record.protocol.as_str().to_string()))?
        .build_invocation(record)
}
