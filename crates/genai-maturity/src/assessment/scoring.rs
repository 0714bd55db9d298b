//! Score averaging, maturity bracketing, and the recommendation table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Answer weight for a single question, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(i64::from(value))
            .ok_or_else(|| format!("rating {value} outside {}..={}", Rating::MIN, Rating::MAX))
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ratings keyed by question id.
pub type Responses = BTreeMap<String, Rating>;

/// Ordered maturity tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaturityLevel {
    Nascent,
    Emerging,
    Established,
    Advanced,
    Elite,
}

impl MaturityLevel {
    pub fn ordered() -> [MaturityLevel; 5] {
        [
            MaturityLevel::Nascent,
            MaturityLevel::Emerging,
            MaturityLevel::Established,
            MaturityLevel::Advanced,
            MaturityLevel::Elite,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            MaturityLevel::Nascent => "Nascent",
            MaturityLevel::Emerging => "Emerging",
            MaturityLevel::Established => "Established",
            MaturityLevel::Advanced => "Advanced",
            MaturityLevel::Elite => "Elite",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds (exclusive) of every bracket below `Elite`, ascending.
const BRACKETS: [(f64, MaturityLevel); 4] = [
    (1.5, MaturityLevel::Nascent),
    (2.5, MaturityLevel::Emerging),
    (3.0, MaturityLevel::Established),
    (3.5, MaturityLevel::Advanced),
];

/// Arithmetic mean of every rating. `None` when nothing was answered.
pub fn score(responses: &Responses) -> Option<f64> {
    if responses.is_empty() {
        return None;
    }
    let total: u32 = responses.values().map(|rating| u32::from(rating.value())).sum();
    Some(f64::from(total) / responses.len() as f64)
}

/// Picks the first bracket whose threshold is strictly greater than `score`.
///
/// A score sitting exactly on a threshold belongs to the next bracket up, so
/// `1.5` is `Emerging` and `3.5` is `Elite`.
pub fn classify(score: f64) -> MaturityLevel {
    BRACKETS
        .iter()
        .find(|(threshold, _)| score < *threshold)
        .map(|(_, level)| *level)
        .unwrap_or(MaturityLevel::Elite)
}

pub fn recommendations(level: MaturityLevel) -> [&'static str; 4] {
    match level {
        MaturityLevel::Nascent => [
            "Establish basic GenAI governance and processes",
            "Invest in foundational AI literacy training",
            "Start with pilot projects to gain experience",
            "Create a dedicated AI team or center of excellence",
        ],
        MaturityLevel::Emerging => [
            "Implement systematic model evaluation processes",
            "Develop automated testing frameworks",
            "Establish monitoring and alerting systems",
            "Create standardized deployment practices",
        ],
        MaturityLevel::Established => [
            "Advance to automated model retraining pipelines",
            "Implement comprehensive MLOps infrastructure",
            "Develop advanced prompt optimization techniques",
            "Scale AI operations across more business units",
        ],
        MaturityLevel::Advanced => [
            "Focus on continuous improvement and optimization",
            "Implement advanced feedback loop systems",
            "Lead industry best practices development",
            "Explore cutting-edge AI research applications",
        ],
        MaturityLevel::Elite => [
            "Continue innovation and thought leadership",
            "Share best practices with the community",
            "Mentor other organizations in their AI journey",
            "Drive industry standards and ethical AI practices",
        ],
    }
}

/// Recommendation lookup by free-form label; unrecognized labels get the `Nascent` list.
pub fn recommendations_for_label(label: &str) -> [&'static str; 4] {
    recommendations(MaturityLevel::from_label(label).unwrap_or(MaturityLevel::Nascent))
}
