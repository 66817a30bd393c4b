use serde::{Deserialize, Serialize};
use std::fmt;

/// What the failure sentinel looks like when a report prints it.
pub const FAILURE_TEXT: &str = "Error querying model.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: Option<String>,         // required; kept optional so a missing one is reported, not swallowed by serde
    #[serde(default)]
    pub ground_truth: Option<String>,     // absent => exempt from factual scoring
}

impl QuestionRecord {
    pub fn new(question: impl Into<String>, ground_truth: Option<&str>) -> Self {
        Self { id: None, question: Some(question.into()), ground_truth: ground_truth.map(str::to_string) }
    }
}

/// Result of asking the model one question. Failure is a value, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Answer(String),
    Failure,
}

impl AnswerOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            AnswerOutcome::Answer(t) => Some(t),
            AnswerOutcome::Failure => None,
        }
    }

    pub fn is_failure(&self) -> bool { matches!(self, AnswerOutcome::Failure) }
}

impl From<String> for AnswerOutcome {
    fn from(s: String) -> Self { AnswerOutcome::Answer(s) }
}

impl From<&str> for AnswerOutcome {
    fn from(s: &str) -> Self { AnswerOutcome::Answer(s.to_string()) }
}

impl fmt::Display for AnswerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text().unwrap_or(FAILURE_TEXT))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    pub llm_answer: AnswerOutcome,
    pub correct: bool,
    pub hedge_score: f64,                 // canonical estimate, feeds calibration
    #[serde(default)]
    pub lexical_hedges: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_hedge: Option<f64>,
}

#[cfg(test)]
impl ResultRecord {
    /// Bare answered record with only the fields calibration looks at.
    pub(crate) fn scored(correct: bool, hedge_score: f64) -> Self {
        Self {
            id: None,
            question: String::new(),
            llm_answer: AnswerOutcome::Answer(String::new()),
            correct,
            hedge_score,
            lexical_hedges: 0,
            sentiment_hedge: None,
        }
    }
}
