use serde_json::{json, Value};

use crate::survey::language::SurveyLanguage;

/// Question types the AI service is allowed to produce.
pub const GENERATED_TYPES: &[&str] = &["single-choice", "multiple-choice", "likert-5", "text"];

pub fn build_prompt(language: SurveyLanguage, source_text: &str) -> String {
    let labels = language
        .likert_labels()
        .iter()
        .map(|l| format!("\"{l}\""))
        .collect::<Vec<String>>()
        .join(", ");
    let types = GENERATED_TYPES
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<String>>()
        .join(", ");
    match language {
        SurveyLanguage::Arabic => format!(
            "أنت خبير في تصميم استبيانات البحث العلمي. النص التالي يحتوي على أسئلة استبيان قدمها المستخدم، \
             وعليك تحويله إلى كائن JSON منظم. القواعد: \
             1. استخرج عنوان الاستبيان إن وجد. \
             2. اختر لكل سؤال النوع الأنسب من الأنواع التالية فقط: {types}. \
             3. أسئلة \"likert-5\" تكون خياراتها بالضبط: {labels}. \
             4. استخرج خيارات أسئلة \"single-choice\" و\"multiple-choice\" من النص. \
             5. أسئلة \"text\" مفتوحة، لذا تكون مصفوفة \"options\" فارغة. \
             6. التزم بمخطط JSON المطلوب حرفياً. \
             النص: ```{source_text}``` \
             أجب بكائن JSON فقط."
        ),
        SurveyLanguage::English => format!(
            "You are an expert in designing research surveys. The text below contains survey questions \
             supplied by the user; convert it into a structured JSON object. Rules: \
             1. Extract the survey title if there is one. \
             2. Give every question the most suitable type, using only: {types}. \
             3. \"likert-5\" questions must have exactly these options: {labels}. \
             4. For \"single-choice\" and \"multiple-choice\" questions, take the options from the text. \
             5. \"text\" questions are open-ended, so their \"options\" array must be empty. \
             6. Follow the requested JSON schema strictly. \
             Text: ```{source_text}``` \
             Reply with the JSON object only."
        ),
    }
}

/// Response schema in the Gemini `responseSchema` dialect.
pub fn response_schema() -> Value {
    json!({
      "type": "OBJECT",
      "properties": {
        "title": { "type": "STRING", "description": "Survey title" },
        "questions": {
          "type": "ARRAY",
          "items": {
            "type": "OBJECT",
            "properties": {
              "id": { "type": "NUMBER" },
              "text": { "type": "STRING", "description": "Question text" },
              "type": { "type": "STRING", "enum": GENERATED_TYPES },
              "options": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["id", "text", "type"]
          }
        }
      },
      "required": ["title", "questions"]
    })
}
