use std::collections::BTreeMap;

use super::questionnaire::Questionnaire;
use super::scoring::{Rating, Responses};

/// Rejections raised before anything is scored or stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("responses are required")]
    EmptyResponses,
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("question '{0}' has not been answered")]
    MissingResponse(String),
    #[error("rating {value} for question '{question}' must be between 1 and 4")]
    RatingOutOfRange { question: String, value: i64 },
}

/// Turns raw answers into ratings, requiring exactly the configured question set.
pub(crate) fn responses_from_raw(
    questionnaire: &Questionnaire,
    raw: &BTreeMap<String, i64>,
) -> Result<Responses, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyResponses);
    }

    let mut responses = Responses::new();
    for (question, value) in raw {
        if questionnaire.question(question).is_none() {
            return Err(ValidationError::UnknownQuestion(question.clone()));
        }
        let rating = Rating::new(*value).ok_or_else(|| ValidationError::RatingOutOfRange {
            question: question.clone(),
            value: *value,
        })?;
        responses.insert(question.clone(), rating);
    }

    if let Some(missing) = questionnaire
        .question_ids()
        .into_iter()
        .find(|id| !responses.contains_key(*id))
    {
        return Err(ValidationError::MissingResponse(missing.to_string()));
    }

    Ok(responses)
}

/// Blank addresses count as "no email".
pub(crate) fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
