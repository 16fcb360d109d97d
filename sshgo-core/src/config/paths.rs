//! Store and settings file locations

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding the store location
pub const STORE_ENV: &str = "SSH_CONFIG_FILE";

/// Directory under the user config dir
pub const APP_DIR_NAME: &str = "sshgo";

/// File name of the store
pub const STORE_FILE_NAME: &str = "connections.conf";

/// File name of the optional settings file, next to the store
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Expands `~` and `$VAR` references. Unknown variables leave the input
/// untouched apart from tilde expansion.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw)
        .map_or_else(|_| shellexpand::tilde(raw).into_owned(), |s| s.into_owned());
    PathBuf::from(expanded)
}

/// `<config dir>/sshgo/connections.conf`
///
/// # Errors
///
/// [`ConfigError::NoConfigDir`] when the platform has no config directory.
pub fn default_store_path() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(STORE_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Picks the store path: explicit flag, then the environment value, then
/// the default location. An empty environment value counts as unset.
///
/// # Errors
///
/// See [`default_store_path`].
pub fn resolve_store_path(cli: Option<&Path>, env_value: Option<&str>) -> ConfigResult<PathBuf> {
    if let Some(path) = cli {
        return Ok(path.to_path_buf());
    }
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Ok(expand_path(value)),
        None => default_store_path(),
    }
}

/// Settings file belonging to `store`
#[must_use]
pub fn settings_path_for(store: &Path) -> PathBuf {
    store
        .parent()
        .map_or_else(|| PathBuf::from(SETTINGS_FILE_NAME), |dir| dir.join(SETTINGS_FILE_NAME))
}

/// The user's home directory
///
/// # Errors
///
/// [`ConfigError::NoConfigDir`] when it cannot be determined.
pub fn home_dir() -> ConfigResult<PathBuf> {
    dirs::home_dir().ok_or(ConfigError::NoConfigDir)
}
