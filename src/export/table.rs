use serde::Serialize;

use crate::responses::types::SurveyResponse;
use crate::survey::types::Survey;

use super::display::display_optional;

/// Owner-facing view of collected responses, one row per respondent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTable {
    pub headers: Vec<String>,
    pub rows: Vec<ResponseRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRow {
    /// 1-based submission order.
    pub ordinal: usize,
    pub cells: Vec<String>,
}

pub fn response_table(survey: &Survey, responses: &[SurveyResponse]) -> ResponseTable {
    let mut headers = vec!["#".to_string()];
    headers.extend(survey.questions.iter().map(|q| format!("Q{}", q.id)));
    let rows = responses
        .iter()
        .enumerate()
        .map(|(index, response)| ResponseRow {
            ordinal: index + 1,
            cells: survey
                .questions
                .iter()
                .map(|q| display_optional(q, response.get(&q.key())))
                .collect(),
        })
        .collect();
    ResponseTable { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::response_table;
    use crate::responses::types::{AnswerValue, SurveyResponse};
    use crate::survey::types::{QuestionType, Survey, SurveyQuestion};

    #[test]
    fn numbers_rows_from_one_in_submission_order() {
        let survey = Survey {
            title: "S".to_string(),
            questions: vec![SurveyQuestion {
                id: 4,
                text: "Name".to_string(),
                question_type: QuestionType::Text,
                options: vec![],
            }],
        };
        let responses = ["ann", "bo"]
            .iter()
            .map(|name| {
                let mut r = SurveyResponse::new();
                r.insert("q-4".to_string(), AnswerValue::from(*name));
                r
            })
            .collect::<Vec<SurveyResponse>>();
        let table = response_table(&survey, &responses);
        assert_eq!(table.headers, vec!["#", "Q4"]);
        assert_eq!(table.rows[0].ordinal, 1);
        assert_eq!(table.rows[1].ordinal, 2);
        assert_eq!(table.rows[1].cells, vec!["bo"]);
    }
}
