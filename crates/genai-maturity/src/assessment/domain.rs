use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::questionnaire::Questionnaire;
use super::scoring::{MaturityLevel, Responses};

/// Opaque, URL-safe record identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw answers as they arrive from a respondent, before range and presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    #[serde(default)]
    pub responses: BTreeMap<String, i64>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Fully scored assessment waiting for the store to assign identity and time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub responses: Responses,
    pub email: Option<String>,
    pub score: f64,
    pub maturity_level: MaturityLevel,
    pub user_agent: Option<String>,
}

/// Persisted assessment submission. Never updated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: RecordId,
    pub responses: Responses,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub score: f64,
    pub maturity_level: MaturityLevel,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl AssessmentRecord {
    pub fn from_new(id: RecordId, timestamp: DateTime<Utc>, new: NewAssessment) -> Self {
        let NewAssessment {
            responses,
            email,
            score,
            maturity_level,
            user_agent,
        } = new;

        Self {
            id,
            responses,
            email,
            score,
            maturity_level,
            timestamp,
            user_agent,
        }
    }
}

/// Email content derived from an assessment, not yet logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmail {
    pub to: String,
    pub subject: String,
    pub message: String,
}

impl NewEmail {
    /// Results summary for the record's respondent. `None` when no address was given.
    pub fn results_summary(record: &AssessmentRecord, questionnaire: &Questionnaire) -> Option<Self> {
        let to = record.email.clone()?;
        let level = record.maturity_level.label();

        let mut message = String::new();
        message.push_str("Hi there!\n\n");
        message.push_str("Your GenAI Maturity Assessment is complete.\n\n");
        message.push_str("Results:\n");
        message.push_str(&format!("- Maturity Level: {level}\n"));
        message.push_str(&format!("- Score: {:.2}/4.0\n", record.score));
        message.push_str(&format!(
            "- Assessment Date: {}\n\n",
            record.timestamp.format("%Y-%m-%d")
        ));
        message.push_str("Individual Responses:\n");
        for question in questionnaire.questions() {
            let rating = record
                .responses
                .get(question.id)
                .map(|rating| rating.to_string())
                .unwrap_or_else(|| "-".to_string());
            message.push_str(&format!("- {}: {}/4\n", question.title, rating));
        }
        message.push_str("\nThank you for using our GenAI Maturity Assessment Tool!\n");

        Some(Self {
            to,
            subject: format!("Your GenAI Maturity Assessment Results - {level}"),
            message,
        })
    }
}

/// Historical log entry for a simulated email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub to: String,
    pub subject: String,
    pub message: String,
}

impl EmailRecord {
    pub const KIND: &'static str = "email";

    pub fn from_new(id: RecordId, timestamp: DateTime<Utc>, new: NewEmail) -> Self {
        Self {
            id,
            kind: Self::KIND.to_string(),
            timestamp,
            to: new.to,
            subject: new.subject,
            message: new.message,
        }
    }
}
