use serde::Serialize;

/// One multiple-choice question. Option `i` (zero-based) maps to rating `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    /// Short label used in email summaries.
    pub title: &'static str,
    pub text: &'static str,
    pub options: [&'static str; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub questions: &'static [Question],
}

/// Ordered set of sections a respondent walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Questionnaire {
    sections: &'static [Section],
}

impl Questionnaire {
    pub const fn new(sections: &'static [Section]) -> Self {
        Self { sections }
    }

    /// The GenAI maturity questionnaire shipped with the service.
    pub const fn standard() -> Self {
        Self::new(STANDARD_SECTIONS)
    }

    pub fn sections(&self) -> &'static [Section] {
        self.sections
    }

    pub fn questions(&self) -> impl Iterator<Item = &'static Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
    }

    pub fn question_ids(&self) -> Vec<&'static str> {
        self.questions().map(|question| question.id).collect()
    }

    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions().find(|question| question.id == id)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}

const STANDARD_SECTIONS: &[Section] = &[
    Section {
        title: "Model Development",
        questions: &[
            Question {
                id: "q1",
                title: "Model Selection",
                text: "How do you select models for GenAI workloads?",
                options: [
                    "Ad-hoc, no clear process",
                    "Some guidelines, limited automation",
                    "Systematic evaluation of model performance",
                    "Robust selection pipelines with benchmarking",
                ],
            },
            Question {
                id: "q2",
                title: "Prompt Testing",
                text: "How are prompts tested and optimized?",
                options: [
                    "Manually and inconsistently",
                    "Some experimentation",
                    "Dedicated prompt testing framework",
                    "Automated A/B testing of prompts",
                ],
            },
        ],
    },
    Section {
        title: "Deployment & Monitoring",
        questions: &[
            Question {
                id: "q3",
                title: "Performance Monitoring",
                text: "How do you monitor GenAI performance post-deployment?",
                options: [
                    "Not monitored",
                    "Manually reviewed logs",
                    "Custom dashboards and alerts",
                    "Automated evals and feedback loops",
                ],
            },
            Question {
                id: "q4",
                title: "Model Retraining",
                text: "How often are models retrained or replaced?",
                options: [
                    "Rarely or never",
                    "When issues arise",
                    "Periodically, based on metrics",
                    "Continuously with version control",
                ],
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_questionnaire_lists_four_questions_in_order() {
        let questionnaire = Questionnaire::standard();
        assert_eq!(questionnaire.sections().len(), 2);
        assert_eq!(questionnaire.question_ids(), vec!["q1", "q2", "q3", "q4"]);
    }

    #[test]
    fn question_lookup_by_id() {
        let questionnaire = Questionnaire::standard();
        let question = questionnaire.question("q3").expect("q3 configured");
        assert_eq!(question.title, "Performance Monitoring");
        assert!(questionnaire.question("q9").is_none());
    }
}
