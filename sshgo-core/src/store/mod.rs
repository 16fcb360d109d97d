//! Connection registry backed by the pipe-delimited store file.
//!
//! The file is the only persistent owner. Every operation loads it fresh,
//! and mutations go through load, transform, atomic rewrite.

mod codec;
mod document;

pub use codec::{COMMENT_PREFIX, FIELD_COUNT, FIELD_DELIMITER, Line, decode, encode};
pub use document::{StoreDocument, StoreEntry};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::fs_util;
use crate::models::ConnectionRecord;

/// Mode for store files created by this crate
pub const STORE_FILE_MODE: u32 = 0o600;

/// Header written when the store is seeded on first run
pub const STORE_TEMPLATE: &str = "\
# sshgo connections
#
# One connection per line:
#   name|protocol|host|port|username|password|extra_params
#
# protocol is ssh or rdp. Leave port empty for the default (22 / 3389).
# Empty fields must still be separated by '|'. Lines starting with '#'
# are comments.
#
# Examples:
#   web|ssh|192.168.1.10|22|deploy||-A
#   win|rdp|192.168.1.20|3389|Administrator|secret|
";

/// Registry over one store file
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    path: PathBuf,
}

impl ConnectionStore {
    /// Creates a registry for `path`; nothing is read until an operation runs
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn access_error(&self, source: std::io::Error) -> StoreError {
        StoreError::FileAccess {
            path: self.path.clone(),
            source,
        }
    }

    /// Loads the store. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// [`StoreError::FileAccess`] when the file cannot be read and
    /// [`StoreError::MalformedRecord`] when a line does not decode.
    pub fn load(&self) -> StoreResult<StoreDocument> {
        match fs_util::read_optional(&self.path).map_err(|e| self.access_error(e))? {
            Some(contents) => StoreDocument::parse(&contents),
            None => Ok(StoreDocument::new()),
        }
    }

    /// Atomically replaces the store with `document`.
    ///
    /// # Errors
    ///
    /// [`StoreError::FileAccess`] if the rewrite fails; the previous file is
    /// left as it was.
    pub fn save(&self, document: &StoreDocument) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.access_error(e))?;
        }
        fs_util::write_atomic(&self.path, &document.render(), STORE_FILE_MODE)
            .map_err(|e| self.access_error(e))
    }

    /// Records in file order.
    ///
    /// # Errors
    ///
    /// See [`ConnectionStore::load`].
    pub fn list(&self) -> StoreResult<Vec<ConnectionRecord>> {
        Ok(self.load()?.records().cloned().collect())
    }

    /// Records sorted by name (case-insensitive, then exact).
    ///
    /// # Errors
    ///
    /// See [`ConnectionStore::load`].
    pub fn list_sorted(&self) -> StoreResult<Vec<ConnectionRecord>> {
        let mut records = self.list()?;
        records.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(records)
    }

    /// Looks a record up by exact name.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when absent, or any load error.
    pub fn find(&self, name: &str) -> StoreResult<ConnectionRecord> {
        self.load()?
            .find(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Returns true when a record with this name exists.
    ///
    /// # Errors
    ///
    /// See [`ConnectionStore::load`].
    pub fn contains(&self, name: &str) -> StoreResult<bool> {
        Ok(self.load()?.contains(name))
    }

    /// Record names in file order.
    ///
    /// # Errors
    ///
    /// See [`ConnectionStore::load`].
    pub fn names(&self) -> StoreResult<Vec<String>> {
        Ok(self.load()?.names())
    }

    /// Appends a new record.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateName`], [`StoreError::InvalidRecord`] or any
    /// load/save error. The file is not touched on failure.
    pub fn add(&self, record: ConnectionRecord) -> StoreResult<()> {
        let mut document = self.load()?;
        document.insert(record)?;
        self.save(&document)
    }

    /// Applies `mutate` to the named record and rewrites the store.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`], [`StoreError::DuplicateName`] on a
    /// colliding rename, [`StoreError::InvalidRecord`], or any load/save
    /// error.
    pub fn edit<F>(&self, name: &str, mutate: F) -> StoreResult<ConnectionRecord>
    where
        F: FnOnce(&mut ConnectionRecord),
    {
        let mut document = self.load()?;
        let updated = document.update(name, mutate)?;
        self.save(&document)?;
        Ok(updated)
    }

    /// Removes the named record and rewrites the store.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] or any load/save error.
    pub fn remove(&self, name: &str) -> StoreResult<ConnectionRecord> {
        let mut document = self.load()?;
        let removed = document.remove(name)?;
        self.save(&document)?;
        Ok(removed)
    }

    /// Seeds the store with [`STORE_TEMPLATE`] (mode 0600) when it does not
    /// exist yet. Returns true if the file was created.
    ///
    /// # Errors
    ///
    /// [`StoreError::FileAccess`] if the directory or file cannot be created.
    pub fn ensure_exists(&self) -> StoreResult<bool> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => return Ok(false),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.access_error(e)),
        }
        let template = StoreDocument::parse(STORE_TEMPLATE)?;
        self.save(&template)?;
        Ok(true)
    }
}
