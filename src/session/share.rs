use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinks {
  pub editor: String,
  pub participant: String,
}

/// Opaque token: base36 millisecond timestamp followed by a random base36 suffix.
pub fn share_token() -> String {
  let millis = Utc::now().timestamp_millis().max(0) as u128;
  let random = Uuid::new_v4().as_u128() >> 64;
  format!("{}{}", to_base36(millis), to_base36(random))
}

pub fn share_links(base_url: &str, token: &str) -> ShareLinks {
  let base = base_url.trim().split(['?', '#']).next().unwrap_or("").to_string();
  ShareLinks {
    editor: format!("{base}?editor_id={token}"),
    participant: format!("{base}?survey_id={token}"),
  }
}

fn to_base36(mut value: u128) -> String {
  const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
  if value == 0 {
    return "0".to_string();
  }
  let mut out = Vec::new();
  while value > 0 {
    out.push(DIGITS[(value % 36) as usize]);
    value /= 36;
  }
  out.reverse();
  String::from_utf8_lossy(&out).to_string()
}
