//! GenAI maturity assessment: questionnaire, scoring, persistence, and the HTTP surface.

pub mod domain;
pub mod export;
pub mod questionnaire;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod summary;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentRecord, AssessmentSubmission, EmailRecord, NewAssessment, NewEmail, RecordId,
};
pub use export::{assessments_to_csv, ExportError};
pub use questionnaire::{Question, Questionnaire, Section};
pub use router::assessment_router;
pub use scoring::{
    classify, recommendations, recommendations_for_label, score, MaturityLevel, Rating, Responses,
};
pub use service::{
    AssessmentResult, AssessmentService, AssessmentServiceError, SubmissionListing,
    SubmissionReceipt,
};
pub use store::{InMemoryRecordStore, JsonLinesStore, RecordStore, StorageError};
pub use summary::{summarize, SubmissionSummary};
pub use validation::ValidationError;
