//! Shared utility functions used across command modules.

use std::io::{self, BufRead, Write};
use std::path::Path;

use sshgo_core::config::{STORE_ENV, Settings, resolve_store_path, settings_path_for};
use sshgo_core::models::{ConnectionRecord, Secret};
use sshgo_core::store::ConnectionStore;

use crate::cli::SecretArgs;
use crate::error::CliError;

/// Opens the store named by `--config`, `SSH_CONFIG_FILE` or the default
/// location.
pub fn open_store(config_path: Option<&Path>) -> Result<ConnectionStore, CliError> {
    let env_value = std::env::var(STORE_ENV).ok();
    let path = resolve_store_path(config_path, env_value.as_deref())?;
    tracing::debug!(path = %path.display(), "using connection store");
    Ok(ConnectionStore::new(path))
}

/// Like [`open_store`], writing the commented template on first use.
pub fn open_store_seeded(config_path: Option<&Path>) -> Result<ConnectionStore, CliError> {
    let store = open_store(config_path)?;
    if store.ensure_exists()? {
        tracing::info!(path = %store.path().display(), "created connection store");
    }
    Ok(store)
}

/// Loads `settings.toml` next to the store.
pub fn load_settings(store: &ConnectionStore) -> Result<Settings, CliError> {
    let path = settings_path_for(store.path());
    Ok(Settings::load(&path)?)
}

/// Find a connection by exact name, then case-insensitively, then by
/// unique prefix
pub fn find_connection<'a>(
    connections: &'a [ConnectionRecord],
    name: &str,
) -> Result<&'a ConnectionRecord, CliError> {
    if let Some(conn) = connections.iter().find(|c| c.name == name) {
        return Ok(conn);
    }

    if let Some(conn) = connections
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
    {
        return Ok(conn);
    }

    let lower = name.to_lowercase();
    let matches: Vec<_> = connections
        .iter()
        .filter(|c| c.name.to_lowercase().starts_with(&lower))
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::ConnectionNotFound(name.to_string())),
        [only] => Ok(*only),
        _ => {
            let names: Vec<_> = matches.iter().map(|c| c.name.as_str()).collect();
            Err(CliError::Ambiguous {
                name: name.to_string(),
                matches: names.join(", "),
            })
        }
    }
}

/// Secret from `--password`, or prompted with `--ask-password`
pub fn read_secret(args: &SecretArgs) -> Result<Option<Secret>, CliError> {
    if let Some(ref password) = args.password {
        return Ok(Some(Secret::new(password.as_str())));
    }
    if args.ask_password {
        let password = rpassword::prompt_password("Password: ")?;
        return Ok(Some(Secret::new(password)));
    }
    Ok(None)
}

/// Asks a yes/no question on stdin; EOF counts as no.
pub fn confirm(question: &str) -> Result<bool, CliError> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
