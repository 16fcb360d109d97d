//! Edit connection command.

use std::path::Path;

use sshgo_core::models::{Protocol, Secret};

use crate::cli::SecretArgs;
use crate::error::CliError;
use crate::util::{find_connection, open_store, read_secret};

/// Fields to change; `None` keeps the current value
pub struct EditParams<'a> {
    pub new_name: Option<&'a str>,
    pub host: Option<&'a str>,
    pub protocol: Option<&'a str>,
    pub port: Option<u16>,
    pub user: Option<&'a str>,
    pub secret: &'a SecretArgs,
    pub clear_password: bool,
    pub extra: Option<&'a str>,
}

impl EditParams<'_> {
    fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.host.is_none()
            && self.protocol.is_none()
            && self.port.is_none()
            && self.user.is_none()
            && self.secret.password.is_none()
            && !self.secret.ask_password
            && !self.clear_password
            && self.extra.is_none()
    }
}

/// Edit connection command handler
pub fn cmd_edit(
    config_path: Option<&Path>,
    name: &str,
    params: &EditParams<'_>,
) -> Result<(), CliError> {
    if params.is_empty() {
        return Err(CliError::Usage(
            "nothing to change; pass at least one field option".to_string(),
        ));
    }

    let protocol: Option<Protocol> = params.protocol.map(str::parse::<Protocol>).transpose()?;

    let store = open_store(config_path)?;
    let connections = store.list()?;
    let target = find_connection(&connections, name)?.name.clone();

    let secret = if params.clear_password {
        Some(Secret::default())
    } else {
        read_secret(params.secret)?
    };

    let updated = store.edit(&target, |record| {
        if let Some(new_name) = params.new_name {
            record.name = new_name.trim().to_string();
        }
        if let Some(host) = params.host {
            record.host = host.trim().to_string();
        }
        if let Some(protocol) = protocol {
            record.protocol = protocol;
        }
        if let Some(port) = params.port {
            record.port = Some(port);
        }
        if let Some(user) = params.user {
            record.username = user.trim().to_string();
        }
        if let Some(secret) = secret {
            record.secret = secret;
        }
        if let Some(extra) = params.extra {
            record.extra_params = extra.to_string();
        }
    })?;
    tracing::info!(name = %target, new_name = %updated.name, "connection updated");

    if updated.name == target {
        println!("Updated connection '{target}'");
    } else {
        println!("Updated connection '{target}' (now '{}')", updated.name);
    }
    Ok(())
}
