use crate::responses::types::SurveyResponse;
use crate::survey::types::Survey;

use super::display::display_optional;

pub const EXPORT_FILE_NAME: &str = "survey_responses.csv";

/// Lets spreadsheet tools detect UTF-8.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Serializes responses as comma-separated text with every cell quoted.
///
/// Returns `None` when there is nothing to export.
pub fn serialize_to_delimited_text(survey: &Survey, responses: &[SurveyResponse]) -> Option<Vec<u8>> {
    if responses.is_empty() {
        return None;
    }

    let header = survey
        .questions
        .iter()
        .map(|q| quote(&q.text))
        .collect::<Vec<String>>()
        .join(",");
    let rows = responses
        .iter()
        .map(|response| {
            survey
                .questions
                .iter()
                .map(|q| quote(&display_optional(q, response.get(&q.key()))))
                .collect::<Vec<String>>()
                .join(",")
        })
        .collect::<Vec<String>>();

    let mut out = String::new();
    out.push(BYTE_ORDER_MARK);
    out.push_str(&header);
    out.push('\n');
    out.push_str(&rows.join("\n"));
    Some(out.into_bytes())
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::serialize_to_delimited_text;
    use crate::responses::types::{AnswerValue, SurveyResponse};
    use crate::survey::language::SurveyLanguage;
    use crate::survey::types::{QuestionType, Survey, SurveyQuestion};

    fn text_question(id: u32, text: &str) -> SurveyQuestion {
        SurveyQuestion {
            id,
            text: text.to_string(),
            question_type: QuestionType::Text,
            options: vec![],
        }
    }

    fn response(pairs: &[(&str, AnswerValue)]) -> SurveyResponse {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn writes_bom_header_and_rows() {
        let survey = Survey {
            title: "S".to_string(),
            questions: vec![text_question(1, "Q1"), text_question(2, "Q2")],
        };
        let responses = vec![response(&[
            ("q-1", AnswerValue::from("x")),
            ("q-2", AnswerValue::from("y")),
        ])];
        let bytes = serialize_to_delimited_text(&survey, &responses).expect("export");
        let text = String::from_utf8(bytes).expect("utf8");
        assert_eq!(text, "\u{FEFF}\"Q1\",\"Q2\"\n\"x\",\"y\"");
        assert!(text.as_bytes().starts_with(&[0xEF, 0xBB, 0xBF]));
    }

    #[test]
    fn escapes_quotes_and_maps_likert_and_multi_values() {
        let lang = SurveyLanguage::English;
        let survey = Survey {
            title: "S".to_string(),
            questions: vec![
                text_question(1, "Say \"something\""),
                SurveyQuestion {
                    id: 2,
                    text: "Agree?".to_string(),
                    question_type: QuestionType::Likert5,
                    options: lang.likert_options(),
                },
                SurveyQuestion {
                    id: 3,
                    text: "Pick".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    options: vec!["A".to_string(), "B".to_string()],
                },
            ],
        };
        let responses = vec![
            response(&[
                ("q-1", AnswerValue::from("He said \"hi\"")),
                ("q-2", AnswerValue::from("Agree")),
                ("q-3", AnswerValue::Multiple(vec!["A".to_string(), "B".to_string()])),
            ]),
            response(&[("q-1", AnswerValue::from("second"))]),
        ];
        let text = String::from_utf8(
            serialize_to_delimited_text(&survey, &responses).expect("export"),
        )
        .expect("utf8");
        let lines = text.trim_start_matches('\u{FEFF}').split('\n').collect::<Vec<&str>>();
        assert_eq!(lines[0], "\"Say \"\"something\"\"\",\"Agree?\",\"Pick\"");
        assert_eq!(lines[1], "\"He said \"\"hi\"\"\",\"4\",\"A, B\"");
        assert_eq!(lines[2], "\"second\",\"\",\"\"");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_collection_is_a_no_op() {
        let survey = Survey {
            title: "S".to_string(),
            questions: vec![text_question(1, "Q1")],
        };
        assert!(serialize_to_delimited_text(&survey, &[]).is_none());
    }
}
