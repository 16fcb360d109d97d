//! Optional `settings.toml` next to the store

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::expand_path;
use crate::completion::user_script_path;
use crate::error::{ConfigError, ConfigResult};
use crate::fs_util;
use crate::protocol::{
    LaunchSettings, RdpClientPreference, RdpLauncher, SshLauncher, default_freerdp_args,
    detect_rdp_client_with,
};

/// User-tunable launch and installation settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ssh client binary
    pub ssh_program: String,
    /// Password helper binary
    pub sshpass_program: String,
    /// Arguments added to every ssh invocation
    pub ssh_options: Vec<String>,
    /// RDP client selection
    pub rdp_client: RdpClientPreference,
    /// FreeRDP arguments used when a record has no extra parameters
    pub rdp_default_args: Vec<String>,
    /// Where the per-user completion script is written
    pub completion_script: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ssh_program: "ssh".to_string(),
            sshpass_program: "sshpass".to_string(),
            ssh_options: Vec::new(),
            rdp_client: RdpClientPreference::Auto,
            rdp_default_args: default_freerdp_args(),
            completion_script: None,
        }
    }
}

impl Settings {
    /// Parses settings from TOML text
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] naming `path` when the text is not valid.
    pub fn from_toml_str(text: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        match fs_util::read_optional(path) {
            Ok(Some(text)) => Self::from_toml_str(&text, path),
            Ok(None) => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Per-user completion script path, honouring `completion_script`
    #[must_use]
    pub fn user_completion_script(&self, home: &Path) -> PathBuf {
        self.completion_script
            .as_deref()
            .map_or_else(|| user_script_path(home), expand_path)
    }

    /// Launchers resolved against the installed programs
    #[must_use]
    pub fn launch_settings(&self) -> LaunchSettings {
        self.launch_settings_with(|program| crate::protocol::which_binary(program).is_some())
    }

    /// Launchers resolved with `installed` deciding which programs exist
    pub fn launch_settings_with<F>(&self, installed: F) -> LaunchSettings
    where
        F: Fn(&str) -> bool,
    {
        let helper = installed(self.sshpass_program.as_str())
            .then(|| self.sshpass_program.clone());
        let ssh = SshLauncher::new(self.ssh_program.clone())
            .with_options(self.ssh_options.clone())
            .with_password_helper(helper);
        let rdp = RdpLauncher::new(detect_rdp_client_with(self.rdp_client, &installed))
            .with_default_args(self.rdp_default_args.clone());
        LaunchSettings { ssh, rdp }
    }
}
