use csv::{QuoteStyle, WriterBuilder};

use super::domain::AssessmentRecord;
use super::questionnaire::Questionnaire;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Flush(String),
    #[error("csv output was not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render every record as a fully quoted CSV document, one row per record in the given order.
///
/// Columns: ID, Timestamp, Email, Score, Maturity Level, one column per configured
/// question, User Agent.
pub fn assessments_to_csv(
    records: &[AssessmentRecord],
    questionnaire: &Questionnaire,
) -> Result<String, ExportError> {
    let question_ids = questionnaire.question_ids();
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    let mut header = vec![
        "ID".to_string(),
        "Timestamp".to_string(),
        "Email".to_string(),
        "Score".to_string(),
        "Maturity Level".to_string(),
    ];
    header.extend(question_ids.iter().map(|id| id.to_ascii_uppercase()));
    header.push("User Agent".to_string());
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.id.to_string(),
            record.timestamp.to_rfc3339(),
            record.email.clone().unwrap_or_default(),
            format!("{:.2}", record.score),
            record.maturity_level.label().to_string(),
        ];
        row.extend(question_ids.iter().map(|id| {
            record
                .responses
                .get(*id)
                .map(|rating| rating.to_string())
                .unwrap_or_default()
        }));
        row.push(record.user_agent.clone().unwrap_or_default());
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
