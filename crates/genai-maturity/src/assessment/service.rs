use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    AssessmentRecord, AssessmentSubmission, EmailRecord, NewAssessment, NewEmail, RecordId,
};
use super::export::{assessments_to_csv, ExportError};
use super::questionnaire::Questionnaire;
use super::scoring::{self, MaturityLevel, Responses};
use super::store::{RecordStore, StorageError};
use super::summary::{summarize, SubmissionSummary};
use super::validation::{normalize_email, responses_from_raw, ValidationError};

/// Facade composing questionnaire validation, scoring, the record store, and the email log.
pub struct AssessmentService<S> {
    store: Arc<S>,
    questionnaire: Questionnaire,
}

impl<S> AssessmentService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_questionnaire(store, Questionnaire::standard())
    }

    pub fn with_questionnaire(store: Arc<S>, questionnaire: Questionnaire) -> Self {
        Self {
            store,
            questionnaire,
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Score answers without persisting anything.
    pub fn preview(
        &self,
        responses: &BTreeMap<String, i64>,
    ) -> Result<AssessmentResult, AssessmentServiceError> {
        let responses = responses_from_raw(&self.questionnaire, responses)?;
        Ok(AssessmentResult::from_responses(&responses)?)
    }

    /// Validate, score, and store a submission, then log the results email if an address was given.
    ///
    /// Failing to log the email is reported but does not fail the submission.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
        user_agent: Option<String>,
    ) -> Result<SubmissionReceipt, AssessmentServiceError> {
        let AssessmentSubmission { responses, email } = submission;
        let responses = responses_from_raw(&self.questionnaire, &responses)?;
        let result = AssessmentResult::from_responses(&responses)?;
        let email = normalize_email(email);
        let wants_email = email.is_some();

        let record = self.store.append_assessment(NewAssessment {
            responses,
            email,
            score: result.score,
            maturity_level: result.maturity_level,
            user_agent,
        })?;
        info!(id = %record.id, level = %record.maturity_level, score = record.score, "assessment stored");

        if let Err(err) = self.send_results_email(&record) {
            warn!(id = %record.id, error = %err, "results email could not be logged");
        }

        let message = if wants_email {
            "Assessment submitted successfully! Check your email for results."
        } else {
            "Assessment submitted successfully!"
        };

        Ok(SubmissionReceipt {
            id: record.id,
            message: message.to_string(),
            result,
        })
    }

    /// Every stored submission, newest first, with aggregates over the same snapshot.
    pub fn list_submissions(&self) -> Result<SubmissionListing, AssessmentServiceError> {
        let assessments = self.store.list_assessments()?;
        let summary = summarize(&assessments);
        Ok(SubmissionListing {
            assessments,
            summary,
        })
    }

    pub fn list_email_log(&self) -> Result<Vec<EmailRecord>, AssessmentServiceError> {
        Ok(self.store.list_emails()?)
    }

    pub fn export_csv(&self) -> Result<String, AssessmentServiceError> {
        let assessments = self.store.list_assessments()?;
        Ok(assessments_to_csv(&assessments, &self.questionnaire)?)
    }

    fn send_results_email(
        &self,
        record: &AssessmentRecord,
    ) -> Result<Option<EmailRecord>, StorageError> {
        let Some(email) = NewEmail::results_summary(record, &self.questionnaire) else {
            return Ok(None);
        };
        info!(to = %email.to, subject = %email.subject, "results email sent (simulated)");
        self.store.append_email(email).map(Some)
    }
}

/// Score, tier, and advice for one set of answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub score: f64,
    pub maturity_level: MaturityLevel,
    pub recommendations: Vec<String>,
}

impl AssessmentResult {
    pub fn from_responses(responses: &Responses) -> Result<Self, ValidationError> {
        let score = scoring::score(responses).ok_or(ValidationError::EmptyResponses)?;
        let maturity_level = scoring::classify(score);
        Ok(Self {
            score,
            maturity_level,
            recommendations: scoring::recommendations(maturity_level)
                .iter()
                .map(|item| item.to_string())
                .collect(),
        })
    }
}

/// Returned to the caller after a submission is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: RecordId,
    pub message: String,
    #[serde(flatten)]
    pub result: AssessmentResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionListing {
    pub assessments: Vec<AssessmentRecord>,
    pub summary: SubmissionSummary,
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
