//! Show connection details command.

use std::path::Path;

use crate::error::CliError;
use crate::format::port_label;
use crate::util::{find_connection, open_store};

/// Show connection details command handler
pub fn cmd_show(config_path: Option<&Path>, name: &str) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    let connections = store.list()?;
    let connection = find_connection(&connections, name)?;

    println!("Connection Details:");
    println!("  Name:     {}", connection.name);
    println!("  Protocol: {}", connection.protocol);
    println!("  Host:     {}", connection.host);
    println!(
        "  Port:     {}",
        port_label(connection.port, connection.effective_port())
    );
    if !connection.username.is_empty() {
        println!("  Username: {}", connection.username);
    }
    println!(
        "  Password: {}",
        if connection.secret.is_empty() {
            "not set"
        } else {
            "set"
        }
    );
    if !connection.extra_params.trim().is_empty() {
        println!("  Extra:    {}", connection.extra_params.trim());
    }

    Ok(())
}
