use std::fs;
use std::path::Path;

use crate::error::SurveyResult;

/// Whole-file UTF-8 read of an uploaded question list.
pub(crate) fn read_file_text(path: &Path) -> SurveyResult<String> {
    Ok(fs::read_to_string(path)?)
}

pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Unable to create directory {}: {e}", parent.display()))?;
    }
    fs::write(path, bytes).map_err(|e| format!("Unable to write {}: {e}", path.display()))
}
