//! Profile names for shell completion.

use crate::error::StoreResult;
use crate::store::{ConnectionStore, StoreDocument};

/// Names of all records in file order.
///
/// Comments and blank lines are skipped. A corrupt store surfaces as
/// [`crate::error::StoreError::MalformedRecord`] so an empty answer always
/// means "no connections yet".
///
/// # Errors
///
/// Any error from [`ConnectionStore::load`].
pub fn export_names(store: &ConnectionStore) -> StoreResult<Vec<String>> {
    Ok(store.load()?.names())
}

/// Whitespace-joined names, ready for `compgen -W`.
#[must_use]
pub fn format_names(document: &StoreDocument) -> String {
    document.names().join(" ")
}
