use async_trait::async_trait;

use crate::error::SurveyResult;
use crate::survey::language::SurveyLanguage;
use crate::survey::parse::parse_survey_json;
use crate::survey::types::Survey;

/// A service that turns free-form question text into survey JSON.
#[async_trait]
pub trait TextToSurvey: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the raw JSON text produced for `source_text`.
    async fn generate(&self, source_text: &str) -> SurveyResult<String>;
}

/// Asks the provider for a survey and normalizes what comes back.
pub async fn text_to_survey(
    provider: &dyn TextToSurvey,
    source_text: &str,
    language: SurveyLanguage,
) -> SurveyResult<Survey> {
    let raw = provider.generate(source_text).await?;
    parse_survey_json(&raw, language)
}


#[cfg(test)]
mod tests {
    use super::stub::StubProvider;
    use super::text_to_survey;
    use crate::error::SurveyError;
    use crate::survey::language::SurveyLanguage;

    #[tokio::test]
    async fn normalizes_provider_output() {
        let provider = StubProvider::returning(
            r#"{"title": "T", "questions": [{"text": "Happy?", "type": "likert-5"}]}"#,
        );
        let survey = text_to_survey(&provider, "Happy?", SurveyLanguage::English)
            .await
            .expect("survey");
        assert_eq!(survey.questions[0].id, 1);
        assert_eq!(survey.questions[0].options.len(), 5);
    }

    #[tokio::test]
    async fn malformed_output_is_a_schema_error() {
        let provider = StubProvider::returning("{\"title\": ");
        let err = text_to_survey(&provider, "x", SurveyLanguage::English)
            .await
            .expect_err("should fail");
        assert!(matches!(err, SurveyError::Schema(_)));
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let err = text_to_survey(&StubProvider::failing(), "x", SurveyLanguage::English)
            .await
            .expect_err("should fail");
        assert!(matches!(err, SurveyError::Transport(_)));
    }
}
