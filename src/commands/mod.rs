//! Command implementations for the gl1tch-card CLI

pub mod completions;
pub mod preview;
pub mod run;
pub mod status;
pub mod version;
