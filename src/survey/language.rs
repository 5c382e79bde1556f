use serde::{Deserialize, Serialize};

/// Working language of a survey: drives canonical labels and the AI prompt.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurveyLanguage {
    #[default]
    Arabic,
    English,
}

const LIKERT_AR: [&str; 5] = ["لا أوافق بشدة", "لا أوافق", "محايد", "أوافق", "أوافق بشدة"];
const LIKERT_EN: [&str; 5] = [
    "Strongly disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly agree",
];
const BINARY_AR: [&str; 2] = ["نعم", "لا"];
const BINARY_EN: [&str; 2] = ["Yes", "No"];

impl SurveyLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arabic => "arabic",
            Self::English => "english",
        }
    }

    /// Strongly-disagree to strongly-agree, in display order.
    pub fn likert_labels(&self) -> &'static [&'static str; 5] {
        match self {
            Self::Arabic => &LIKERT_AR,
            Self::English => &LIKERT_EN,
        }
    }

    pub fn binary_labels(&self) -> &'static [&'static str; 2] {
        match self {
            Self::Arabic => &BINARY_AR,
            Self::English => &BINARY_EN,
        }
    }

    pub fn likert_options(&self) -> Vec<String> {
        self.likert_labels().iter().map(|v| v.to_string()).collect()
    }

    pub fn binary_options(&self) -> Vec<String> {
        self.binary_labels().iter().map(|v| v.to_string()).collect()
    }
}
