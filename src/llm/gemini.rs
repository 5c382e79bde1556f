use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::{SurveyError, SurveyResult};

use super::prompt::{build_prompt, response_schema};
use super::provider::TextToSurvey;
use super::settings::AiSettings;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini `generateContent` client constrained to the survey JSON schema.
pub struct GeminiClient {
    client: Client,
    settings: AiSettings,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: AiSettings) -> SurveyResult<Self> {
        let api_key = settings.api_key()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .map_err(|e| SurveyError::transport(e.to_string()))?;
        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.model
        )
    }
}

pub fn request_body(prompt: &str) -> Value {
    json!({
      "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
      "generationConfig": {
        "responseMimeType": "application/json",
        "responseSchema": response_schema()
      }
    })
}

/// Concatenated text parts of the first candidate.
fn response_text(body: GenerateResponse) -> SurveyResult<String> {
    let text = body
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(SurveyError::transport("response contained no text"));
    }
    Ok(text.trim().to_string())
}

#[async_trait]
impl TextToSurvey for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, source_text: &str) -> SurveyResult<String> {
        let prompt = build_prompt(self.settings.language, source_text);
        debug!(model = %self.settings.model, chars = source_text.len(), "requesting survey from Gemini");
        let response = self
            .client
            .post(self.endpoint())
            .header(USER_AGENT, "survey-builder/0.1")
            .header(CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(&prompt))
            .send()
            .await
            .map_err(|e| SurveyError::transport(format!("Gemini request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(SurveyError::transport(format!(
                "Gemini request failed with status {}",
                response.status()
            )));
        }
        let body = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| SurveyError::transport(format!("Unable to parse Gemini response: {e}")))?;
        response_text(body)
    }
}
