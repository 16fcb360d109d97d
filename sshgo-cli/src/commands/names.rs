//! Names command - the completion exporter's output.

use std::path::Path;

use sshgo_core::completion::format_names;

use crate::error::CliError;
use crate::util::open_store;

/// Prints every connection name on one line, separated by spaces.
///
/// A missing store prints nothing; a corrupt store is an error so the
/// completion function gets no candidates instead of wrong ones.
pub fn cmd_names(config_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    let document = store.load()?;
    let names = format_names(&document);
    if !names.is_empty() {
        println!("{names}");
    }
    Ok(())
}
