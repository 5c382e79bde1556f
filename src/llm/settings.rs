use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SurveyError, SurveyResult};
use crate::survey::language::SurveyLanguage;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    pub model: String,
    pub api_base: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub language: SurveyLanguage,
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "API_KEY".to_string(),
            language: SurveyLanguage::Arabic,
            timeout_secs: 60,
        }
    }
}

impl AiSettings {
    pub fn api_key(&self) -> SurveyResult<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                SurveyError::transport(format!(
                    "API key missing: environment variable {} is not set",
                    self.api_key_env
                ))
            })
    }
}

pub fn default_settings_path() -> SurveyResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| SurveyError::settings("Unable to resolve config dir"))?;
    Ok(base.join("survey-builder").join("settings.json"))
}

/// Reads settings, writing the defaults first if the file is missing or blank.
pub fn load_settings(path: &Path) -> SurveyResult<AiSettings> {
    if !path.exists() {
        let defaults = AiSettings::default();
        save_settings(path, &defaults)?;
        return Ok(defaults);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| SurveyError::settings(format!("Unable to read {}: {e}", path.display())))?;
    if raw.trim().is_empty() {
        let defaults = AiSettings::default();
        save_settings(path, &defaults)?;
        return Ok(defaults);
    }
    serde_json::from_str(&raw)
        .map_err(|e| SurveyError::settings(format!("Invalid settings JSON: {e}")))
}

pub fn save_settings(path: &Path, settings: &AiSettings) -> SurveyResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SurveyError::settings(e.to_string()))?;
    }
    let payload =
        serde_json::to_string_pretty(settings).map_err(|e| SurveyError::settings(e.to_string()))?;
    fs::write(path, payload)
        .map_err(|e| SurveyError::settings(format!("Unable to write {}: {e}", path.display())))
}
