pub mod recorder;
pub mod types;
