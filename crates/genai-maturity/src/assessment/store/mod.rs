//! Append-only persistence for assessment submissions and the simulated email log.
//!
//! Both collections only ever grow: there is no update or delete path. Listing
//! always returns the full collection ordered newest first, with records that
//! share a timestamp kept in insertion order.

mod jsonl;
mod memory;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::domain::{AssessmentRecord, EmailRecord, NewAssessment, NewEmail};

pub use jsonl::JsonLinesStore;
pub use memory::InMemoryRecordStore;

/// Storage abstraction so the service can be exercised against any backend.
pub trait RecordStore: Send + Sync {
    /// Assign an id and timestamp, persist, and return the stored record.
    fn append_assessment(&self, assessment: NewAssessment)
        -> Result<AssessmentRecord, StorageError>;
    fn list_assessments(&self) -> Result<Vec<AssessmentRecord>, StorageError>;
    fn append_email(&self, email: NewEmail) -> Result<EmailRecord, StorageError>;
    fn list_emails(&self) -> Result<Vec<EmailRecord>, StorageError>;
}

/// Failure of the underlying medium. "No records yet" is never an error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt record at {path}:{line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Records that carry a creation instant used for listing order.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for AssessmentRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for EmailRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Sort newest first; `sort_by` is stable so equal timestamps keep insertion order.
pub(crate) fn newest_first<T: Timestamped>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    records
}
