use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored answer: one value, or several for multiple-choice questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerValue {
    pub fn is_answered(&self) -> bool {
        match self {
            Self::Single(value) => !value.trim().is_empty(),
            Self::Multiple(values) => !values.is_empty(),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

/// Answers of one respondent keyed by `q-<id>`.
pub type SurveyResponse = BTreeMap<String, AnswerValue>;

/// Submitted responses in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCollection {
    responses: Vec<SurveyResponse>,
}

impl ResponseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, response: SurveyResponse) {
        self.responses.push(response);
    }

    pub(crate) fn clear(&mut self) {
        self.responses.clear();
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn as_slice(&self) -> &[SurveyResponse] {
        &self.responses
    }
}
