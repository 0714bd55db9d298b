use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    AssessmentRecord, AssessmentSubmission, EmailRecord, NewAssessment, NewEmail,
};
use crate::assessment::scoring::{classify, score, Rating, Responses};
use crate::assessment::store::{InMemoryRecordStore, RecordStore, StorageError};
use crate::assessment::{assessment_router, AssessmentService};

pub(super) fn raw_responses(values: &[(&str, i64)]) -> BTreeMap<String, i64> {
    values
        .iter()
        .map(|(id, value)| (id.to_string(), *value))
        .collect()
}

pub(super) fn ratings(values: &[(&str, u8)]) -> Responses {
    values
        .iter()
        .map(|(id, value)| {
            (
                id.to_string(),
                Rating::new(i64::from(*value)).expect("rating in range"),
            )
        })
        .collect()
}

pub(super) fn submission(email: Option<&str>) -> AssessmentSubmission {
    AssessmentSubmission {
        responses: raw_responses(&[("q1", 2), ("q2", 3), ("q3", 1), ("q4", 4)]),
        email: email.map(str::to_string),
    }
}

pub(super) fn new_assessment(values: &[(&str, u8)], email: Option<&str>) -> NewAssessment {
    let responses = ratings(values);
    let score = score(&responses).expect("non-empty responses");
    NewAssessment {
        responses,
        email: email.map(str::to_string),
        score,
        maturity_level: classify(score),
        user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_string()),
    }
}

pub(super) fn build_service() -> (AssessmentService<InMemoryRecordStore>, Arc<InMemoryRecordStore>) {
    let store = Arc::new(InMemoryRecordStore::new());
    let service = AssessmentService::new(store.clone());
    (service, store)
}

pub(super) fn router_with_service(
    service: AssessmentService<InMemoryRecordStore>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Store whose medium is permanently offline.
pub(super) struct UnavailableStore;

impl RecordStore for UnavailableStore {
    fn append_assessment(&self, _: NewAssessment) -> Result<AssessmentRecord, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }

    fn list_assessments(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }

    fn append_email(&self, _: NewEmail) -> Result<EmailRecord, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }

    fn list_emails(&self) -> Result<Vec<EmailRecord>, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }
}

/// Accepts assessments but cannot write the email log.
#[derive(Default)]
pub(super) struct EmailLogOfflineStore {
    pub(super) inner: InMemoryRecordStore,
}

impl RecordStore for EmailLogOfflineStore {
    fn append_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, StorageError> {
        self.inner.append_assessment(assessment)
    }

    fn list_assessments(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        self.inner.list_assessments()
    }

    fn append_email(&self, _: NewEmail) -> Result<EmailRecord, StorageError> {
        Err(StorageError::Unavailable("mail log offline".to_string()))
    }

    fn list_emails(&self) -> Result<Vec<EmailRecord>, StorageError> {
        self.inner.list_emails()
    }
}
