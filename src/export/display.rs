use crate::responses::types::AnswerValue;
use crate::survey::types::{QuestionType, SurveyQuestion};

/// Renders a stored answer the way it appears in tables and exports.
///
/// Multi-select answers are joined with `", "`; a Likert label becomes its
/// 1-based scale position. Anything else is returned as given.
pub fn display_value(question: &SurveyQuestion, value: &AnswerValue) -> String {
    match value {
        AnswerValue::Multiple(values) => values.join(", "),
        AnswerValue::Single(raw) if question.question_type == QuestionType::Likert5 => question
            .options
            .iter()
            .position(|o| o == raw)
            .map(|index| (index + 1).to_string())
            .unwrap_or_else(|| raw.clone()),
        AnswerValue::Single(raw) => raw.clone(),
    }
}

/// Same as [`display_value`], with a missing answer shown as an empty cell.
pub fn display_optional(question: &SurveyQuestion, value: Option<&AnswerValue>) -> String {
    value
        .map(|v| display_value(question, v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{display_optional, display_value};
    use crate::responses::types::AnswerValue;
    use crate::survey::language::SurveyLanguage;
    use crate::survey::types::{QuestionType, SurveyQuestion};

    fn question(question_type: QuestionType, options: Vec<String>) -> SurveyQuestion {
        SurveyQuestion {
            id: 1,
            text: "Q".to_string(),
            question_type,
            options,
        }
    }

    #[test]
    fn likert_labels_map_to_ordinals() {
        let lang = SurveyLanguage::Arabic;
        let q = question(QuestionType::Likert5, lang.likert_options());
        let third = AnswerValue::from(lang.likert_labels()[2]);
        assert_eq!(display_value(&q, &third), "3");
        let first = AnswerValue::from(lang.likert_labels()[0]);
        assert_eq!(display_value(&q, &first), "1");
        assert_eq!(display_value(&q, &AnswerValue::from("maybe")), "maybe");
    }

    #[test]
    fn multi_select_joins_with_comma_space() {
        let q = question(QuestionType::MultipleChoice, vec![]);
        let value = AnswerValue::Multiple(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(display_value(&q, &value), "A, B");
    }

    #[test]
    fn other_types_pass_through() {
        let binary = question(QuestionType::Binary, SurveyLanguage::English.binary_options());
        assert_eq!(display_value(&binary, &AnswerValue::from("Yes")), "Yes");
        let text = question(QuestionType::Text, vec![]);
        assert_eq!(display_value(&text, &AnswerValue::from("3")), "3");
        assert_eq!(display_optional(&text, None), "");
    }
}
