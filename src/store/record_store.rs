//! The canonical submission record list and its durable cache.
//!
//! Records are append-only; the full list is rewritten to the durable
//! store after every append. The durable store is a session cache, not
//! the system of record, so unreadable state falls back to the seed
//! dataset instead of surfacing an error.

use crate::models::SubmissionRecord;
use crate::store::seed;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Opaque durable slot holding one serialized record list.
///
/// Mirrors the get/set semantics of a key-value store: the caller never
/// sees partial writes, only the whole payload or nothing.
pub trait DurableStore {
    /// Read the raw payload, if any.
    fn get(&self) -> Result<Option<String>>;

    /// Overwrite the raw payload.
    fn set(&self, raw: &str) -> Result<()>;
}

/// File-backed durable store: one JSON document per store file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[allow(dead_code)] // Utility accessor
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DurableStore for FileStore {
    fn get(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store file: {}", self.path.display()))?;
        Ok(Some(raw))
    }

    fn set(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create store directory: {}", parent.display())
                })?;
            }
        }

        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write store file: {}", self.path.display()))
    }
}

/// Owns the in-memory record list for the running session.
///
/// Single-writer, single-reader within one process; mutations happen only
/// on discrete submit events, so no locking is needed.
pub struct RecordStore<S: DurableStore> {
    backend: S,
    records: Vec<SubmissionRecord>,
}

impl<S: DurableStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            records: Vec::new(),
        }
    }

    /// Load the record list from the durable store.
    ///
    /// A missing payload yields the seed dataset. A payload that exists
    /// but fails to parse also yields the seed dataset: corruption is
    /// logged and never propagated, since a broken cache must not block
    /// the user. A valid payload is returned as parsed, even when empty.
    pub fn load(&mut self) -> &[SubmissionRecord] {
        self.records = match self.backend.get() {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Stored records are unreadable ({}), using seed data", e);
                    seed::seed_records()
                }
            },
            Ok(None) => {
                debug!("No stored records found, using seed data");
                seed::seed_records()
            }
            Err(e) => {
                warn!("Failed to read record store ({}), using seed data", e);
                seed::seed_records()
            }
        };

        &self.records
    }

    /// All records, most recent first.
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    /// Prepend a record and persist the full post-append list.
    ///
    /// Returns the new full list. The record at the head is the one just
    /// appended; the prior order of the rest is preserved.
    pub fn append(&mut self, record: SubmissionRecord) -> Result<&[SubmissionRecord]> {
        debug!("Appending record {}", record.id);
        self.records.insert(0, record);
        self.persist()?;
        Ok(&self.records)
    }

    /// Serialize the full list and write it to the durable store.
    ///
    /// An empty list is never written, so a transient empty state cannot
    /// wipe previously persisted records.
    pub fn persist(&self) -> Result<()> {
        if self.records.is_empty() {
            debug!("Skipping persist of empty record list");
            return Ok(());
        }

        let raw =
            serde_json::to_string(&self.records).context("Failed to serialize record list")?;
        self.backend.set(&raw)
    }
}
