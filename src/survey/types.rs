use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Likert5,
    Text,
    Binary,
    /// Any type string the AI service returned that we do not recognize.
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SingleChoice => "single-choice",
            Self::MultipleChoice => "multiple-choice",
            Self::Likert5 => "likert-5",
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Types answered by picking from `options`.
    pub fn uses_options(&self) -> bool {
        matches!(
            self,
            Self::SingleChoice | Self::MultipleChoice | Self::Likert5 | Self::Binary
        )
    }
}

impl From<String> for QuestionType {
    fn from(value: String) -> Self {
        match value.trim() {
            "single-choice" => Self::SingleChoice,
            "multiple-choice" => Self::MultipleChoice,
            "likert-5" => Self::Likert5,
            "text" => Self::Text,
            "binary" => Self::Binary,
            _ => Self::Other(value),
        }
    }
}

impl From<QuestionType> for String {
    fn from(value: QuestionType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    pub id: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
}

impl SurveyQuestion {
    /// Key under which answers to this question are stored.
    pub fn key(&self) -> String {
        response_key(self.id)
    }
}

pub fn response_key(question_id: u32) -> String {
    format!("q-{question_id}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub title: String,
    pub questions: Vec<SurveyQuestion>,
}

impl Survey {
    pub fn question(&self, id: u32) -> Option<&SurveyQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// Provenance of the text file a survey was generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub name: String,
    pub sha256: String,
}
