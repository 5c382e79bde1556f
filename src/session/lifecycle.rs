use serde::{Deserialize, Serialize};

/// Whether a survey accepts new responses.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Open,
    Closed,
}

impl LifecycleState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn toggle(&mut self) {
        *self = match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        };
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}
