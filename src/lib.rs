pub mod commands;
pub mod error;
pub mod export;
pub mod llm;
pub mod responses;
pub mod session;
pub mod survey;
pub mod util;

pub use error::{SurveyError, SurveyResult};
