//! SSH launcher, optionally wrapped in a password helper.

use super::{Invocation, Launcher, split_extra_params};
use crate::error::LaunchResult;
use crate::models::ConnectionRecord;

/// Environment variable `sshpass -e` reads the password from
pub const SSHPASS_ENV: &str = "SSHPASS";

/// Default SSH port
const DEFAULT_SSH_PORT: u16 = 22;

/// Builds ssh (or `sshpass -e ssh`) invocations
#[derive(Debug, Clone)]
pub struct SshLauncher {
    /// ssh client binary
    pub program: String,
    /// Arguments placed before `-p`
    pub options: Vec<String>,
    /// Password helper, `None` when it is not installed
    pub password_helper: Option<String>,
}

impl Default for SshLauncher {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            options: Vec::new(),
            password_helper: Some("sshpass".to_string()),
        }
    }
}

impl SshLauncher {
    /// Creates a launcher for the given ssh binary
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Sets options inserted before the port
    #[must_use]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Sets (or clears) the password helper
    #[must_use]
    pub fn with_password_helper(mut self, helper: Option<String>) -> Self {
        self.password_helper = helper;
        self
    }
}

/// `[options] -p PORT [extra] user@host`
///
/// Extra parameters go before the destination; anything after it would be
/// run as a remote command.
#[must_use]
pub fn build_ssh_args(record: &ConnectionRecord, options: &[String]) -> Vec<String> {
    let port = record.effective_port().unwrap_or(DEFAULT_SSH_PORT);

    let mut args = options.to_vec();
    args.push("-p".to_string());
    args.push(port.to_string());
    args.extend(split_extra_params(&record.extra_params));
    args.push(record.destination());
    args
}

impl Launcher for SshLauncher {
    fn build_invocation(&self, record: &ConnectionRecord) -> LaunchResult<Invocation> {
        let ssh_args = build_ssh_args(record, &self.options);

        match (&self.password_helper, record.secret.is_empty()) {
            (Some(helper), false) => {
                let mut args = Vec::with_capacity(ssh_args.len() + 2);
                args.push("-e".to_string());
                args.push(self.program.clone());
                args.extend(ssh_args);
                Ok(Invocation::new(helper.clone(), args)
                    .with_env(SSHPASS_ENV, record.secret.expose()))
            }
            _ => Ok(Invocation::new(self.program.clone(), ssh_args)),
        }
    }
}
