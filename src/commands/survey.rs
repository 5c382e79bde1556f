use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::export::csv::EXPORT_FILE_NAME;
use crate::export::table::ResponseTable;
use crate::llm::provider::{text_to_survey, TextToSurvey};
use crate::responses::types::AnswerValue;
use crate::session::lifecycle::LifecycleState;
use crate::session::share::ShareLinks;
use crate::session::state::Session;
use crate::survey::language::SurveyLanguage;
use crate::survey::types::Survey;

use super::files::{file_label, read_file_text, write_bytes};

/// The session as shared with a front end.
#[derive(Debug, Default)]
pub struct SessionState(Mutex<Session>);

impl SessionState {
    pub fn new(language: SurveyLanguage) -> Self {
        Self(Mutex::new(Session::new(language)))
    }

    pub fn with_survey(language: SurveyLanguage, survey: Survey) -> Self {
        let mut session = Session::new(language);
        session.replace_survey(survey, None);
        Self(Mutex::new(session))
    }
}

fn lock(state: &SessionState) -> Result<MutexGuard<'_, Session>, String> {
    state
        .0
        .lock()
        .map_err(|_| "Unable to acquire session lock".to_string())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAnswerArgs {
    pub question_id: u32,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub title: Option<String>,
    pub question_count: usize,
    pub response_count: usize,
    pub status: LifecycleState,
    pub generating: bool,
    pub source_sha256: Option<String>,
}

/// Reads a question list and installs the survey generated from it.
///
/// `Ok(None)` means the attempt was superseded while the request was in
/// flight and its result was dropped. The session lock is not held while
/// waiting on the provider.
pub async fn create_survey_from_file(
    state: &SessionState,
    provider: &dyn TextToSurvey,
    path: &Path,
) -> Result<Option<Survey>, String> {
    let text = read_file_text(path).map_err(|e| e.to_string())?;
    let (ticket, language) = {
        let mut session = lock(state)?;
        let ticket = session
            .begin_creation(&file_label(path), &text)
            .map_err(|e| e.to_string())?;
        (ticket, session.language())
    };
    info!(provider = provider.name(), source = %ticket.source().name, "generating survey");

    let result = text_to_survey(provider, &text, language).await;

    let mut session = lock(state)?;
    let installed = session
        .finish_creation(ticket, result)
        .map_err(|e| e.to_string())?;
    Ok(installed.cloned())
}

pub fn cancel_survey_creation(state: &SessionState) -> Result<(), String> {
    lock(state)?.cancel_creation();
    Ok(())
}

pub fn get_survey(state: &SessionState) -> Result<Option<Survey>, String> {
    Ok(lock(state)?.survey().cloned())
}

pub fn session_summary(state: &SessionState) -> Result<SessionSummary, String> {
    let session = lock(state)?;
    Ok(SessionSummary {
        title: session.survey().map(|s| s.title.clone()),
        question_count: session.survey().map(|s| s.questions.len()).unwrap_or(0),
        response_count: session.responses().len(),
        status: session.lifecycle(),
        generating: session.is_generating(),
        source_sha256: session.source().map(|s| s.sha256.clone()),
    })
}

pub fn start_response(state: &SessionState) -> Result<Survey, String> {
    let mut session = lock(state)?;
    let survey = session.start_response().map_err(|e| e.to_string())?;
    Ok(survey.clone())
}

pub fn record_answer(state: &SessionState, args: RecordAnswerArgs) -> Result<(), String> {
    lock(state)?
        .record_answer(args.question_id, args.value)
        .map_err(|e| e.to_string())
}

pub fn toggle_option(state: &SessionState, question_id: u32, option: String) -> Result<(), String> {
    lock(state)?
        .toggle_option(question_id, &option)
        .map_err(|e| e.to_string())
}

/// Returns the number of collected responses after the submission.
pub fn submit_response(state: &SessionState) -> Result<usize, String> {
    let mut session = lock(state)?;
    session.submit().map_err(|e| e.to_string())?;
    Ok(session.responses().len())
}

pub fn toggle_survey_status(state: &SessionState) -> Result<LifecycleState, String> {
    lock(state)?.toggle_lifecycle().map_err(|e| e.to_string())
}

pub fn get_response_table(state: &SessionState) -> Result<ResponseTable, String> {
    lock(state)?.response_table().map_err(|e| e.to_string())
}

/// Writes `survey_responses.csv` into `out_dir` (or to `out_dir` itself when
/// it names a `.csv` file). Nothing is written while no responses exist.
pub fn export_responses(state: &SessionState, out_dir: &Path) -> Result<Option<PathBuf>, String> {
    let bytes = lock(state)?.export_csv().map_err(|e| e.to_string())?;
    let Some(bytes) = bytes else {
        return Ok(None);
    };
    let target = if out_dir
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
    {
        out_dir.to_path_buf()
    } else {
        out_dir.join(EXPORT_FILE_NAME)
    };
    write_bytes(&target, &bytes)?;
    info!(path = %target.display(), "responses exported");
    Ok(Some(target))
}

pub fn generate_links(state: &SessionState, base_url: String) -> Result<ShareLinks, String> {
    let mut session = lock(state)?;
    let links = session
        .generate_share_links(&base_url)
        .map_err(|e| e.to_string())?;
    Ok(links.clone())
}

pub fn delete_survey(state: &SessionState) -> Result<(), String> {
    lock(state)?.delete_survey();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::stub::StubProvider;
    use crate::survey::parse::parse_survey_json;
    use std::fs;

    const PAYLOAD: &str = r#"{
      "title": "Cafe feedback",
      "questions": [
        {"text": "The coffee was good", "type": "likert-5", "options": []},
        {"text": "What did you order?", "type": "multiple-choice", "options": ["Tea", "Cake", "Coffee"]},
        {"text": "Anything else?", "type": "text"}
      ]
    }"#;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("survey-cmd-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("mkdir");
        dir
    }

    fn questions_file(dir: &Path) -> PathBuf {
        let path = dir.join("questions.txt");
        fs::write(&path, "1. The coffee was good\n2. What did you order?\n3. Anything else?")
            .expect("write questions");
        path
    }

    #[tokio::test]
    async fn full_flow_from_file_to_csv() {
        let dir = temp_dir();
        let state = SessionState::new(SurveyLanguage::English);
        let provider = StubProvider::returning(PAYLOAD);
        let survey = create_survey_from_file(&state, &provider, &questions_file(&dir))
            .await
            .expect("create")
            .expect("installed");
        assert_eq!(survey.questions.len(), 3);

        start_response(&state).expect("start");
        toggle_option(&state, 1, "Agree".to_string()).expect("likert");
        toggle_option(&state, 2, "Coffee".to_string()).expect("pick coffee");
        toggle_option(&state, 2, "Tea".to_string()).expect("pick tea");
        let err = submit_response(&state).expect_err("text missing");
        assert!(err.contains("Anything else?"));
        record_answer(
            &state,
            RecordAnswerArgs {
                question_id: 3,
                value: AnswerValue::from("Say \"thanks\""),
            },
        )
        .expect("text");
        assert_eq!(submit_response(&state).expect("submit"), 1);

        let path = export_responses(&state, &dir).expect("export").expect("written");
        assert!(path.ends_with("survey_responses.csv"));
        let text = fs::read_to_string(&path).expect("read csv");
        assert_eq!(
            text,
            "\u{FEFF}\"The coffee was good\",\"What did you order?\",\"Anything else?\"\n\"4\",\"Tea, Coffee\",\"Say \"\"thanks\"\"\""
        );
        let summary = session_summary(&state).expect("summary");
        assert_eq!(summary.response_count, 1);
        assert!(summary.source_sha256.is_some());
        let _ = fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn schema_error_installs_nothing() {
        let dir = temp_dir();
        let state = SessionState::new(SurveyLanguage::English);
        let provider = StubProvider::returning(r#"{"title": "No questions"}"#);
        let err = create_survey_from_file(&state, &provider, &questions_file(&dir))
            .await
            .expect_err("should fail");
        assert!(err.contains("did not return a valid survey"));
        assert!(get_survey(&state).expect("get").is_none());
        assert!(!session_summary(&state).expect("summary").generating);
        let _ = fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn unreadable_file_leaves_session_untouched() {
        let state = SessionState::new(SurveyLanguage::English);
        let provider = StubProvider::returning(PAYLOAD);
        let err = create_survey_from_file(&state, &provider, Path::new("/no/such/file.txt"))
            .await
            .expect_err("should fail");
        assert!(err.starts_with("Failed to read file"));
        let summary = session_summary(&state).expect("summary");
        assert!(summary.title.is_none());
        assert!(!summary.generating);
    }

    #[test]
    fn closed_survey_rejects_and_export_is_skipped_when_empty() {
        let dir = temp_dir();
        let survey = parse_survey_json(PAYLOAD, SurveyLanguage::English).expect("parse");
        let state = SessionState::with_survey(SurveyLanguage::English, survey);
        assert!(export_responses(&state, &dir).expect("export").is_none());
        assert_eq!(
            toggle_survey_status(&state).expect("toggle"),
            LifecycleState::Closed
        );
        assert!(start_response(&state).is_err());
        assert!(submit_response(&state)
            .expect_err("closed")
            .contains("closed"));
        assert_eq!(
            toggle_survey_status(&state).expect("toggle"),
            LifecycleState::Open
        );
        delete_survey(&state).expect("delete");
        assert!(get_response_table(&state).is_err());
        let _ = fs::remove_dir_all(dir);
    }
}
