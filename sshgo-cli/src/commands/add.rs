//! Add connection command.

use std::path::Path;

use sshgo_core::models::{ConnectionRecord, Protocol};

use crate::cli::SecretArgs;
use crate::error::CliError;
use crate::util::{open_store_seeded, read_secret};

/// Parameters for the add command
pub struct AddParams<'a> {
    pub name: &'a str,
    pub host: &'a str,
    pub protocol: &'a str,
    pub port: Option<u16>,
    pub user: Option<&'a str>,
    pub secret: &'a SecretArgs,
    pub extra: Option<&'a str>,
}

/// Add connection command handler
pub fn cmd_add(config_path: Option<&Path>, params: &AddParams<'_>) -> Result<(), CliError> {
    let protocol: Protocol = params.protocol.parse()?;

    let mut record = ConnectionRecord::new(params.name.trim(), protocol, params.host.trim());
    record.port = params.port;
    if let Some(user) = params.user {
        record.username = user.trim().to_string();
    }
    if let Some(secret) = read_secret(params.secret)? {
        record.secret = secret;
    }
    if let Some(extra) = params.extra {
        record.extra_params = extra.to_string();
    }
    record.validate()?;

    let store = open_store_seeded(config_path)?;
    store.add(record)?;
    tracing::info!(name = params.name.trim(), path = %store.path().display(), "connection added");

    println!("Added connection '{}'", params.name.trim());
    Ok(())
}
