use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{SurveyError, SurveyResult};

use super::language::SurveyLanguage;
use super::types::{QuestionType, Survey, SurveyQuestion};

/// A question as read from the AI payload, before ids and options are fixed up.
#[derive(Debug, Clone)]
pub struct RawQuestion {
    pub id: Option<u32>,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
}

/// Question and title text pass through unchanged.
pub fn build_survey(
    title: String,
    raw: Vec<RawQuestion>,
    language: SurveyLanguage,
) -> SurveyResult<Survey> {
    let ids = assign_ids(&raw)?;
    let questions = raw
        .into_iter()
        .zip(ids)
        .map(|(q, id)| {
            let options = normalize_options(id, &q.question_type, q.options, language);
            SurveyQuestion {
                id,
                text: q.text,
                question_type: q.question_type,
                options,
            }
        })
        .collect::<Vec<SurveyQuestion>>();

    Ok(Survey { title, questions })
}

/// Missing ids take their 1-based position. A repeated id keeps its first
/// holder; later holders move past the current maximum, or take the lowest
/// unused id once the maximum is `u32::MAX`.
fn assign_ids(raw: &[RawQuestion]) -> SurveyResult<Vec<u32>> {
    let mut ids = raw
        .iter()
        .enumerate()
        .map(|(index, q)| q.id.unwrap_or(index as u32 + 1))
        .collect::<Vec<u32>>();
    let claimed = ids.iter().copied().collect::<HashSet<u32>>();
    let mut next_free = ids.iter().copied().max().unwrap_or(0);
    let mut seen: HashSet<u32> = HashSet::new();
    for id in ids.iter_mut() {
        if seen.insert(*id) {
            continue;
        }
        let reassigned = match next_free.checked_add(1) {
            Some(next) => {
                next_free = next;
                next
            }
            None => (1..=u32::MAX)
                .find(|c| !claimed.contains(c) && !seen.contains(c))
                .ok_or_else(|| SurveyError::schema("no question ids left to assign"))?,
        };
        debug!(duplicate = *id, reassigned, "reassigning duplicate question id");
        *id = reassigned;
        seen.insert(reassigned);
    }
    Ok(ids)
}

fn normalize_options(
    id: u32,
    question_type: &QuestionType,
    supplied: Vec<String>,
    language: SurveyLanguage,
) -> Vec<String> {
    let supplied = supplied
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect::<Vec<String>>();
    match question_type {
        QuestionType::Likert5 => language.likert_options(),
        QuestionType::Text => Vec::new(),
        QuestionType::Binary if supplied.is_empty() => language.binary_options(),
        QuestionType::SingleChoice | QuestionType::MultipleChoice if supplied.is_empty() => {
            warn!(question = id, "choice question has no options");
            supplied
        }
        _ => supplied,
    }
}
