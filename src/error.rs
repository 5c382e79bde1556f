use thiserror::Error;

/// Errors raised while building a survey or collecting responses.
///
/// Every variant is recoverable: the failing action is abandoned and the
/// session stays usable.
#[derive(Error, Debug)]
pub enum SurveyError {
    /// The AI payload could not be turned into a survey.
    #[error("The AI service did not return a valid survey: {0}")]
    Schema(String),

    /// A submission is missing an answer.
    #[error("Please answer all questions before submitting. First unanswered question: \"{question_text}\"")]
    Validation {
        question_id: u32,
        question_text: String,
    },

    /// A submission was attempted while the survey is closed.
    #[error("This survey is currently closed and is not accepting new responses.")]
    Lifecycle,

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("AI request failed: {0}")]
    Transport(String),

    /// A survey is already being generated.
    #[error("A survey is already being generated; wait for it to finish.")]
    Busy,

    #[error("No survey has been created yet.")]
    NoSurvey,

    #[error("Question {0} does not exist in this survey.")]
    UnknownQuestion(u32),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type SurveyResult<T> = Result<T, SurveyError>;

impl SurveyError {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::SurveyError;

    #[test]
    fn validation_message_names_the_question() {
        let err = SurveyError::Validation {
            question_id: 2,
            question_text: "Your age".to_string(),
        };
        assert!(err.to_string().contains("\"Your age\""));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SurveyError = io.into();
        assert!(matches!(err, SurveyError::Io(_)));
    }
}
