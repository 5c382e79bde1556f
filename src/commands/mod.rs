pub mod files;
pub mod input;
pub mod survey;
