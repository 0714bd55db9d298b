use genai_maturity::assessment::{
    AssessmentRecord, EmailRecord, InMemoryRecordStore, JsonLinesStore, NewAssessment, NewEmail,
    RecordStore, StorageError,
};
use genai_maturity::config::{StorageBackend, StorageConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Record store selected by `APP_STORAGE`.
pub(crate) enum ConfiguredStore {
    File(JsonLinesStore),
    Memory(InMemoryRecordStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(config: &StorageConfig) -> Self {
        match config.backend {
            StorageBackend::File => {
                info!(data_dir = %config.data_dir.display(), "using json-lines record store");
                Self::File(JsonLinesStore::open(&config.data_dir))
            }
            StorageBackend::Memory => {
                info!("using in-memory record store; records are lost on restart");
                Self::Memory(InMemoryRecordStore::new())
            }
        }
    }
}

impl RecordStore for ConfiguredStore {
    fn append_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, StorageError> {
        match self {
            Self::File(store) => store.append_assessment(assessment),
            Self::Memory(store) => store.append_assessment(assessment),
        }
    }

    fn list_assessments(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        match self {
            Self::File(store) => store.list_assessments(),
            Self::Memory(store) => store.list_assessments(),
        }
    }

    fn append_email(&self, email: NewEmail) -> Result<EmailRecord, StorageError> {
        match self {
            Self::File(store) => store.append_email(email),
            Self::Memory(store) => store.append_email(email),
        }
    }

    fn list_emails(&self) -> Result<Vec<EmailRecord>, StorageError> {
        match self {
            Self::File(store) => store.list_emails(),
            Self::Memory(store) => store.list_emails(),
        }
    }
}

/// Parse a `question=rating` pair from the command line.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, i64), String> {
    let (question, rating) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=RATING, got '{raw}'"))?;
    let question = question.trim();
    if question.is_empty() {
        return Err(format!("missing question id in '{raw}'"));
    }
    let rating = rating
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("failed to parse rating in '{raw}' ({err})"))?;
    Ok((question.to_string(), rating))
}

pub(crate) fn answers_to_map(answers: Vec<(String, i64)>) -> BTreeMap<String, i64> {
    answers.into_iter().collect()
}
