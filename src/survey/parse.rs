use regex::Regex;
use serde_json::Value;

use crate::error::{SurveyError, SurveyResult};

use super::language::SurveyLanguage;
use super::normalize::{build_survey, RawQuestion};
use super::types::{QuestionType, Survey};

/// Parses the JSON text produced by the AI service into a normalized survey.
pub fn parse_survey_json(raw: &str, language: SurveyLanguage) -> SurveyResult<Survey> {
    let body = strip_code_fence(raw);
    let root: Value = serde_json::from_str(&body)
        .map_err(|e| SurveyError::schema(format!("invalid JSON: {e}")))?;
    let obj = root
        .as_object()
        .ok_or_else(|| SurveyError::schema("payload is not a JSON object"))?;

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| SurveyError::schema("payload is missing a string 'title'"))?
        .to_string();
    let elements = obj
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| SurveyError::schema("payload is missing a 'questions' array"))?;

    let questions = elements
        .iter()
        .enumerate()
        .map(|(index, element)| parse_question(index, element))
        .collect::<SurveyResult<Vec<RawQuestion>>>()?;

    build_survey(title, questions, language)
}

fn parse_question(index: usize, element: &Value) -> SurveyResult<RawQuestion> {
    let position = index + 1;
    let obj = element
        .as_object()
        .ok_or_else(|| SurveyError::schema(format!("question {position} is not an object")))?;
    let text = obj
        .get("text")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| SurveyError::schema(format!("question {position} has no text")))?
        .to_string();
    let question_type = obj
        .get("type")
        .and_then(Value::as_str)
        .map(|t| QuestionType::from(t.to_string()))
        .ok_or_else(|| SurveyError::schema(format!("question {position} has no type")))?;
    let options = obj
        .get("options")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|v| v.to_string())
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();

    Ok(RawQuestion {
        id: obj.get("id").and_then(positive_id),
        text,
        question_type,
        options,
    })
}

/// Ids arrive as JSON numbers, sometimes as floats or strings.
fn positive_id(value: &Value) -> Option<u32> {
    let id = if let Some(n) = value.as_u64() {
        n
    } else if let Some(f) = value.as_f64() {
        if f.fract() != 0.0 || f < 1.0 {
            return None;
        }
        f as u64
    } else {
        value.as_str()?.trim().parse::<u64>().ok()?
    };
    if id == 0 {
        return None;
    }
    u32::try_from(id).ok()
}

fn strip_code_fence(raw: &str) -> String {
    let fence = Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("regex");
    match fence.captures(raw) {
        Some(cap) => cap[1].to_string(),
        None => raw.trim().to_string(),
    }
}
