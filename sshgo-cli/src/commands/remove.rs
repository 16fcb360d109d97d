//! Remove connection command.

use std::path::Path;

use crate::error::CliError;
use crate::util::{confirm, find_connection, open_store};

/// Remove connection command handler
pub fn cmd_remove(config_path: Option<&Path>, name: &str, yes: bool) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    let connections = store.list()?;
    let target = find_connection(&connections, name)?.name.clone();

    if yes && target != name {
        return Err(CliError::Usage(format!(
            "'{name}' matches connection '{target}'; --yes requires the exact name"
        )));
    }

    if !yes && !confirm(&format!("Remove connection '{target}'?"))? {
        println!("Aborted.");
        return Ok(());
    }

    let removed = store.remove(&target)?;
    tracing::info!(name = %removed.name, path = %store.path().display(), "connection removed");

    println!("Removed connection '{}'", removed.name);
    Ok(())
}
