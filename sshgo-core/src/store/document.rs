//! In-memory mirror of a store file.
//!
//! Every line is kept verbatim so a rewrite only touches the record that
//! was actually changed.

use super::codec::{self, Line};
use crate::error::{StoreError, StoreResult};
use crate::models::ConnectionRecord;

/// One line of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEntry {
    /// Comment line, kept as read
    Comment(String),
    /// Blank or whitespace-only line, kept as read
    Blank(String),
    /// Record line with its original text
    Record {
        /// Text as read (or as last encoded)
        raw: String,
        /// Decoded record
        record: ConnectionRecord,
    },
}

impl StoreEntry {
    fn raw(&self) -> &str {
        match self {
            Self::Comment(raw) | Self::Blank(raw) | Self::Record { raw, .. } => raw,
        }
    }

    /// Returns the record if this line holds one
    #[must_use]
    pub const fn record(&self) -> Option<&ConnectionRecord> {
        match self {
            Self::Record { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// Parsed store contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreDocument {
    entries: Vec<StoreEntry>,
    trailing_newline: bool,
    crlf: bool,
}

impl StoreDocument {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the full text of a store file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedRecord`] with the 1-based line number
    /// of the first line that is neither a comment, blank nor a valid record.
    pub fn parse(contents: &str) -> StoreResult<Self> {
        if contents.is_empty() {
            return Ok(Self::new());
        }

        let trailing_newline = contents.ends_with('\n');
        let body = contents.strip_suffix('\n').unwrap_or(contents);

        let mut entries = Vec::new();
        for (idx, raw) in body.split('\n').enumerate() {
            let entry = match codec::decode(raw) {
                Ok(Line::Comment(_)) => StoreEntry::Comment(raw.to_string()),
                Ok(Line::Blank) => StoreEntry::Blank(raw.to_string()),
                Ok(Line::Record(record)) => StoreEntry::Record {
                    raw: raw.to_string(),
                    record,
                },
                Err(source) => {
                    return Err(StoreError::MalformedRecord {
                        line: idx + 1,
                        source,
                    });
                }
            };
            entries.push(entry);
        }

        Ok(Self {
            entries,
            trailing_newline,
            crlf: contents.contains("\r\n"),
        })
    }

    /// Encodes `record` with the line ending the file already uses
    fn encode_line(&self, record: &ConnectionRecord) -> String {
        let mut raw = codec::encode(record);
        if self.crlf {
            raw.push('\r');
        }
        raw
    }

    /// Serializes the document back to text
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self
            .entries
            .iter()
            .map(StoreEntry::raw)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline && !self.entries.is_empty() {
            out.push('\n');
        }
        out
    }

    /// All lines in file order
    #[must_use]
    pub fn entries(&self) -> &[StoreEntry] {
        &self.entries
    }

    /// Records in file order
    pub fn records(&self) -> impl Iterator<Item = &ConnectionRecord> {
        self.entries.iter().filter_map(StoreEntry::record)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records().count()
    }

    /// Returns true when the document holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().next().is_none()
    }

    /// Record names in file order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.records().map(|r| r.name.clone()).collect()
    }

    /// First record with exactly this name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ConnectionRecord> {
        self.records().find(|r| r.name == name)
    }

    /// Returns true if a record with this name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Appends a record at the end of the document.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidRecord`] if validation fails and
    /// [`StoreError::DuplicateName`] if the name is taken.
    pub fn insert(&mut self, record: ConnectionRecord) -> StoreResult<()> {
        record.validate()?;
        if self.contains(&record.name) {
            return Err(StoreError::DuplicateName(record.name));
        }
        if self.crlf
            && let Some(last) = self.entries.last_mut()
        {
            terminate_crlf(last);
        }
        let raw = self.encode_line(&record);
        self.entries.push(StoreEntry::Record { raw, record });
        self.trailing_newline = true;
        Ok(())
    }

    /// Applies `mutate` to the record named `name` and re-encodes only that
    /// line. Returns the updated record.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if there is no such record,
    /// [`StoreError::InvalidRecord`] if the result fails validation and
    /// [`StoreError::DuplicateName`] if it was renamed onto another record.
    pub fn update<F>(&mut self, name: &str, mutate: F) -> StoreResult<ConnectionRecord>
    where
        F: FnOnce(&mut ConnectionRecord),
    {
        let idx = self
            .entries
            .iter()
            .position(|e| e.record().is_some_and(|r| r.name == name))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let mut updated = self.entries[idx]
            .record()
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        mutate(&mut updated);
        updated.validate()?;

        if updated.name != name && self.contains(&updated.name) {
            return Err(StoreError::DuplicateName(updated.name));
        }

        let unchanged = self.entries[idx].record() == Some(&updated);
        if !unchanged {
            let is_last = idx + 1 == self.entries.len();
            let mut raw = self.encode_line(&updated);
            if is_last && !self.trailing_newline {
                raw = raw.trim_end_matches('\r').to_string();
            }
            self.entries[idx] = StoreEntry::Record {
                raw,
                record: updated.clone(),
            };
        }
        Ok(updated)
    }

    /// Removes every record named `name` and returns the first one.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if there is no such record.
    pub fn remove(&mut self, name: &str) -> StoreResult<ConnectionRecord> {
        let removed = self
            .find(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        self.entries
            .retain(|e| e.record().is_none_or(|r| r.name != name));
        Ok(removed)
    }
}

/// Gives a line read without its final `\n` the `\r` its siblings carry
fn terminate_crlf(entry: &mut StoreEntry) {
    let (StoreEntry::Comment(raw) | StoreEntry::Blank(raw) | StoreEntry::Record { raw, .. }) = entry;
    if !raw.ends_with('\r') {
        raw.push('\r');
    }
}
