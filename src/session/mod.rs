pub mod lifecycle;
pub mod share;
pub mod state;
