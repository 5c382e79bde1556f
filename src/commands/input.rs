use crate::responses::types::AnswerValue;
use crate::survey::types::{QuestionType, SurveyQuestion};

/// Interprets one line typed by a respondent.
///
/// Option questions take a 1-based option number (several, comma separated,
/// for multiple-choice) or the option label itself. Free-text questions take
/// the line as typed. Returns `None` when the input selects nothing valid.
pub fn answer_from_input(question: &SurveyQuestion, input: &str) -> Option<AnswerValue> {
    let line = input.trim();
    if line.is_empty() {
        return None;
    }
    if question.options.is_empty() {
        return Some(AnswerValue::from(line));
    }
    if question.question_type == QuestionType::MultipleChoice {
        let mut picked: Vec<String> = Vec::new();
        for token in line.split([',', '،']) {
            let option = resolve_option(question, token)?;
            if !picked.contains(&option) {
                picked.push(option);
            }
        }
        picked.sort_by_key(|v| question.options.iter().position(|o| o == v));
        return Some(AnswerValue::Multiple(picked));
    }
    resolve_option(question, line).map(AnswerValue::from)
}

fn resolve_option(question: &SurveyQuestion, token: &str) -> Option<String> {
    let token = token.trim();
    if let Ok(n) = token.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| question.options.get(i))
            .cloned();
    }
    question
        .options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(token))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::answer_from_input;
    use crate::responses::types::AnswerValue;
    use crate::survey::types::{QuestionType, SurveyQuestion};

    fn question(question_type: QuestionType, options: &[&str]) -> SurveyQuestion {
        SurveyQuestion {
            id: 1,
            text: "Q".to_string(),
            question_type,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn numbers_and_labels_select_options() {
        let q = question(QuestionType::SingleChoice, &["Red", "Blue"]);
        assert_eq!(answer_from_input(&q, "2"), Some(AnswerValue::from("Blue")));
        assert_eq!(answer_from_input(&q, "red"), Some(AnswerValue::from("Red")));
        assert_eq!(answer_from_input(&q, "3"), None);
        assert_eq!(answer_from_input(&q, "0"), None);
        assert_eq!(answer_from_input(&q, "  "), None);
    }

    #[test]
    fn multiple_choice_accepts_lists_in_option_order() {
        let q = question(QuestionType::MultipleChoice, &["A", "B", "C"]);
        assert_eq!(
            answer_from_input(&q, "3, 1, 3"),
            Some(AnswerValue::Multiple(vec!["A".to_string(), "C".to_string()]))
        );
        assert_eq!(answer_from_input(&q, "1, 9"), None);
    }

    #[test]
    fn free_text_is_kept_verbatim() {
        let q = question(QuestionType::Text, &[]);
        assert_eq!(
            answer_from_input(&q, "  because, reasons \n"),
            Some(AnswerValue::from("because, reasons"))
        );
    }
}
