use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::AssessmentRecord;

/// Aggregate statistics recomputed on every listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub total: usize,
    /// Only labels that were actually observed appear here.
    pub maturity_breakdown: BTreeMap<String, usize>,
    /// Zero when `total` is zero; read that pair as "no data".
    pub average_score: f64,
    pub emails_collected: usize,
}

pub fn summarize(records: &[AssessmentRecord]) -> SubmissionSummary {
    let total = records.len();

    let mut maturity_breakdown = BTreeMap::new();
    for record in records {
        *maturity_breakdown
            .entry(record.maturity_level.label().to_string())
            .or_insert(0) += 1;
    }

    let average_score = if total == 0 {
        0.0
    } else {
        records.iter().map(|record| record.score).sum::<f64>() / total as f64
    };

    let emails_collected = records
        .iter()
        .filter(|record| {
            record
                .email
                .as_deref()
                .is_some_and(|email| !email.trim().is_empty())
        })
        .count();

    SubmissionSummary {
        total,
        maturity_breakdown,
        average_score,
        emails_collected,
    }
}
