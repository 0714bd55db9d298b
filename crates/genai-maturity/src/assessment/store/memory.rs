use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::{newest_first, RecordStore, StorageError};
use crate::assessment::domain::{
    AssessmentRecord, EmailRecord, NewAssessment, NewEmail, RecordId,
};

/// Process-lifetime store; contents vanish with the process.
#[derive(Default)]
pub struct InMemoryRecordStore {
    assessments: Mutex<Vec<AssessmentRecord>>,
    emails: Mutex<Vec<EmailRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<Vec<T>>) -> Result<MutexGuard<'_, Vec<T>>, StorageError> {
    mutex
        .lock()
        .map_err(|_| StorageError::Unavailable("in-memory store mutex poisoned".to_string()))
}

impl RecordStore for InMemoryRecordStore {
    fn append_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, StorageError> {
        let record = AssessmentRecord::from_new(RecordId::generate(), Utc::now(), assessment);
        lock(&self.assessments)?.push(record.clone());
        Ok(record)
    }

    fn list_assessments(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        Ok(newest_first(lock(&self.assessments)?.clone()))
    }

    fn append_email(&self, email: NewEmail) -> Result<EmailRecord, StorageError> {
        let record = EmailRecord::from_new(RecordId::generate(), Utc::now(), email);
        lock(&self.emails)?.push(record.clone());
        Ok(record)
    }

    fn list_emails(&self) -> Result<Vec<EmailRecord>, StorageError> {
        Ok(newest_first(lock(&self.emails)?.clone()))
    }
}
