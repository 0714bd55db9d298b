use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{newest_first, RecordStore, StorageError, Timestamped};
use crate::assessment::domain::{
    AssessmentRecord, EmailRecord, NewAssessment, NewEmail, RecordId,
};

const ASSESSMENTS_FILE: &str = "assessments.jsonl";
const EMAILS_FILE: &str = "emails.jsonl";

const LOCK_RETRIES: usize = 50;
const LOCK_RETRY_SLEEP: Duration = Duration::from_millis(20);

/// File-backed store keeping one JSON-lines log per collection under a data directory.
///
/// Appends write a single line in append mode while holding the in-process
/// collection mutex and an exclusive advisory lock on the log file; loads hold
/// a shared lock. Writers in this process and in other processes using the
/// same directory (the server next to `assess --save`, say) never interleave
/// or lose appends.
pub struct JsonLinesStore {
    root: PathBuf,
    assessments: JsonLinesLog<AssessmentRecord>,
    emails: JsonLinesLog<EmailRecord>,
}

impl JsonLinesStore {
    /// Nothing touches the disk until the first append.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            assessments: JsonLinesLog::new(root.join(ASSESSMENTS_FILE)),
            emails: JsonLinesLog::new(root.join(EMAILS_FILE)),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RecordStore for JsonLinesStore {
    fn append_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, StorageError> {
        let record = AssessmentRecord::from_new(RecordId::generate(), Utc::now(), assessment);
        self.assessments.append(&record)?;
        debug!(id = %record.id, "assessment appended");
        Ok(record)
    }

    fn list_assessments(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        self.assessments.load()
    }

    fn append_email(&self, email: NewEmail) -> Result<EmailRecord, StorageError> {
        let record = EmailRecord::from_new(RecordId::generate(), Utc::now(), email);
        self.emails.append(&record)?;
        debug!(id = %record.id, "email log entry appended");
        Ok(record)
    }

    fn list_emails(&self) -> Result<Vec<EmailRecord>, StorageError> {
        self.emails.load()
    }
}

struct JsonLinesLog<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonLinesLog<T>
where
    T: Serialize + DeserializeOwned + Timestamped,
{
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    fn append(&self, record: &T) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::Unavailable("log lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        acquire(&file, LockMode::Exclusive).map_err(|source| self.io_error(source))?;
        let written = write_line(&mut file, line.as_bytes());
        let _ = FileExt::unlock(&file);
        written.map_err(|source| self.io_error(source))
    }

    fn load(&self) -> Result<Vec<T>, StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::Unavailable("log lock poisoned".to_string()))?;

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        acquire(&file, LockMode::Shared).map_err(|source| self.io_error(source))?;
        let mut contents = String::new();
        let read = file.read_to_string(&mut contents);
        let _ = FileExt::unlock(&file);
        read.map_err(|source| self.io_error(source))?;

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                line: index + 1,
                source,
            })?;
            records.push(record);
        }

        debug!(path = %self.path.display(), count = records.len(), "log loaded");
        Ok(newest_first(records))
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[derive(Clone, Copy)]
enum LockMode {
    Shared,
    Exclusive,
}

/// Take an advisory lock, retrying while another handle holds a conflicting one.
fn acquire(file: &File, mode: LockMode) -> std::io::Result<()> {
    for _ in 0..LOCK_RETRIES {
        let attempt = match mode {
            LockMode::Shared => FileExt::try_lock_shared(file),
            LockMode::Exclusive => FileExt::try_lock_exclusive(file),
        };
        match attempt {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == fs2::lock_contended_error().kind() => {
                std::thread::sleep(LOCK_RETRY_SLEEP);
            }
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        ErrorKind::WouldBlock,
        "could not acquire lock on record log",
    ))
}

/// Append one line, first terminating an unterminated last line. A failed
/// write truncates the file back to its previous length.
fn write_line(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    let original_len = file.metadata()?.len();

    let mut buffer = Vec::with_capacity(line.len() + 1);
    if original_len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            buffer.push(b'\n');
        }
    }
    buffer.extend_from_slice(line);

    if let Err(err) = file.write_all(&buffer).and_then(|_| file.flush()) {
        if let Err(truncate_err) = file.set_len(original_len) {
            warn!(error = %truncate_err, "failed to roll back partial record");
        }
        return Err(err);
    }
    Ok(())
}
