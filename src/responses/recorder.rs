use tracing::info;

use crate::error::{SurveyError, SurveyResult};
use crate::session::lifecycle::LifecycleState;
use crate::survey::types::{response_key, Survey, SurveyQuestion};

use super::types::{AnswerValue, ResponseCollection, SurveyResponse};

/// The answers of the respondent currently filling in the survey.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingResponse {
    answers: SurveyResponse,
}

impl WorkingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous answer to the question.
    pub fn record(&mut self, question_id: u32, value: AnswerValue) {
        self.answers.insert(response_key(question_id), value);
    }

    /// Adds or removes one option of a multiple-choice answer, keeping the
    /// question's option order.
    pub fn toggle_option(&mut self, question: &SurveyQuestion, option: &str) {
        let mut selected = match self.answers.get(&question.key()) {
            Some(AnswerValue::Multiple(values)) => values.clone(),
            Some(AnswerValue::Single(value)) if !value.trim().is_empty() => vec![value.clone()],
            _ => Vec::new(),
        };
        if let Some(pos) = selected.iter().position(|v| v == option) {
            selected.remove(pos);
        } else {
            selected.push(option.to_string());
        }
        selected.sort_by_key(|v| {
            question
                .options
                .iter()
                .position(|o| o == v)
                .unwrap_or(usize::MAX)
        });
        self.answers.insert(question.key(), AnswerValue::Multiple(selected));
    }

    pub fn get(&self, question_id: u32) -> Option<&AnswerValue> {
        self.answers.get(&response_key(question_id))
    }

    pub fn answers(&self) -> &SurveyResponse {
        &self.answers
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

/// First question, in survey order, without a usable answer.
pub fn first_unanswered<'a>(
    survey: &'a Survey,
    response: &SurveyResponse,
) -> Option<&'a SurveyQuestion> {
    survey.questions.iter().find(|q| {
        !response
            .get(&q.key())
            .map(AnswerValue::is_answered)
            .unwrap_or(false)
    })
}

/// Moves a complete working response into the collection.
///
/// Nothing is mutated on failure, so the respondent can fix the answers and
/// try again.
pub fn submit(
    working: &mut WorkingResponse,
    survey: &Survey,
    lifecycle: LifecycleState,
    collection: &mut ResponseCollection,
) -> SurveyResult<()> {
    if !lifecycle.is_open() {
        return Err(SurveyError::Lifecycle);
    }
    if let Some(q) = first_unanswered(survey, working.answers()) {
        return Err(SurveyError::Validation {
            question_id: q.id,
            question_text: q.text.clone(),
        });
    }
    collection.push(working.answers.clone());
    working.clear();
    info!(total = collection.len(), "response recorded");
    Ok(())
}
