use tracing::{debug, info, warn};

use crate::error::{SurveyError, SurveyResult};
use crate::export::csv::serialize_to_delimited_text;
use crate::export::table::{response_table, ResponseTable};
use crate::responses::recorder::{self, WorkingResponse};
use crate::responses::types::{AnswerValue, ResponseCollection};
use crate::survey::language::SurveyLanguage;
use crate::survey::types::{QuestionType, SourceRef, Survey};
use crate::util::hash::sha256_hex;

use super::lifecycle::LifecycleState;
use super::share::{share_links, share_token, ShareLinks};

/// Identifies one survey-generation attempt. A result is only installed if
/// its ticket is still the pending one.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationTicket {
    attempt: u64,
    source: SourceRef,
}

impl CreationTicket {
    pub fn source(&self) -> &SourceRef {
        &self.source
    }
}

/// Everything one owner/respondent session holds in memory.
#[derive(Debug, Default)]
pub struct Session {
    language: SurveyLanguage,
    survey: Option<Survey>,
    source: Option<SourceRef>,
    responses: ResponseCollection,
    lifecycle: LifecycleState,
    working: WorkingResponse,
    links: Option<ShareLinks>,
    pending: Option<u64>,
    attempts: u64,
}

impl Session {
    pub fn new(language: SurveyLanguage) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn language(&self) -> SurveyLanguage {
        self.language
    }

    pub fn survey(&self) -> Option<&Survey> {
        self.survey.as_ref()
    }

    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    pub fn responses(&self) -> &ResponseCollection {
        &self.responses
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    pub fn working(&self) -> &WorkingResponse {
        &self.working
    }

    pub fn links(&self) -> Option<&ShareLinks> {
        self.links.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Reserves the single in-flight generation slot.
    pub fn begin_creation(&mut self, source_name: &str, text: &str) -> SurveyResult<CreationTicket> {
        if self.pending.is_some() {
            return Err(SurveyError::Busy);
        }
        self.attempts += 1;
        self.pending = Some(self.attempts);
        let source = SourceRef {
            name: source_name.to_string(),
            sha256: sha256_hex(text.as_bytes()),
        };
        debug!(attempt = self.attempts, source = %source.name, "survey generation started");
        Ok(CreationTicket {
            attempt: self.attempts,
            source,
        })
    }

    /// Applies the outcome of a generation attempt.
    ///
    /// Returns `Ok(None)` when the attempt was superseded; its result is dropped.
    /// On error the previous survey, if any, is left in place.
    pub fn finish_creation(
        &mut self,
        ticket: CreationTicket,
        result: SurveyResult<Survey>,
    ) -> SurveyResult<Option<&Survey>> {
        if self.pending != Some(ticket.attempt) {
            warn!(attempt = ticket.attempt, "discarding result of a superseded survey generation");
            return Ok(None);
        }
        self.pending = None;
        let survey = result?;
        self.replace_survey(survey, Some(ticket.source));
        Ok(self.survey.as_ref())
    }

    /// Forgets the pending attempt, e.g. because another file was picked.
    pub fn cancel_creation(&mut self) {
        if let Some(attempt) = self.pending.take() {
            debug!(attempt, "survey generation cancelled");
        }
    }

    /// Installs a survey, dropping collected responses and reopening it.
    pub fn replace_survey(&mut self, survey: Survey, source: Option<SourceRef>) {
        info!(
            title = %survey.title,
            questions = survey.questions.len(),
            discarded_responses = self.responses.len(),
            "survey installed"
        );
        self.survey = Some(survey);
        self.source = source;
        self.responses.clear();
        self.lifecycle = LifecycleState::Open;
        self.working.clear();
        self.links = None;
    }

    pub fn delete_survey(&mut self) {
        self.cancel_creation();
        if self.survey.take().is_some() {
            info!(discarded_responses = self.responses.len(), "survey deleted");
        }
        self.source = None;
        self.responses.clear();
        self.lifecycle = LifecycleState::Open;
        self.working.clear();
        self.links = None;
    }

    pub fn toggle_lifecycle(&mut self) -> SurveyResult<LifecycleState> {
        self.require_survey()?;
        self.lifecycle.toggle();
        info!(state = self.lifecycle.as_str(), "survey status changed");
        Ok(self.lifecycle)
    }

    /// Entry point for a new respondent: the survey must be open.
    pub fn start_response(&mut self) -> SurveyResult<&Survey> {
        self.require_survey()?;
        if !self.lifecycle.is_open() {
            return Err(SurveyError::Lifecycle);
        }
        self.working.clear();
        self.require_survey()
    }

    pub fn record_answer(&mut self, question_id: u32, value: AnswerValue) -> SurveyResult<()> {
        let survey = self.require_survey()?;
        if survey.question(question_id).is_none() {
            return Err(SurveyError::UnknownQuestion(question_id));
        }
        self.working.record(question_id, value);
        Ok(())
    }

    /// Flips one option of a multiple-choice answer. Other question types
    /// record the option as their single answer.
    pub fn toggle_option(&mut self, question_id: u32, option: &str) -> SurveyResult<()> {
        let survey = self.survey.as_ref().ok_or(SurveyError::NoSurvey)?;
        let question = survey
            .question(question_id)
            .ok_or(SurveyError::UnknownQuestion(question_id))?;
        if question.question_type == QuestionType::MultipleChoice {
            self.working.toggle_option(question, option);
        } else {
            self.working.record(question_id, AnswerValue::from(option));
        }
        Ok(())
    }

    pub fn submit(&mut self) -> SurveyResult<()> {
        let survey = self.survey.as_ref().ok_or(SurveyError::NoSurvey)?;
        recorder::submit(&mut self.working, survey, self.lifecycle, &mut self.responses)
    }

    /// CSV bytes of all responses, or `None` while nothing was collected.
    pub fn export_csv(&self) -> SurveyResult<Option<Vec<u8>>> {
        let survey = self.require_survey()?;
        Ok(serialize_to_delimited_text(survey, self.responses.as_slice()))
    }

    pub fn response_table(&self) -> SurveyResult<ResponseTable> {
        let survey = self.require_survey()?;
        Ok(response_table(survey, self.responses.as_slice()))
    }

    pub fn generate_share_links(&mut self, base_url: &str) -> SurveyResult<&ShareLinks> {
        self.require_survey()?;
        let links = share_links(base_url, &share_token());
        Ok(&*self.links.insert(links))
    }

    fn require_survey(&self) -> SurveyResult<&Survey> {
        self.survey.as_ref().ok_or(SurveyError::NoSurvey)
    }
}
