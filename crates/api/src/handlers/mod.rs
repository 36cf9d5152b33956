pub mod generation;
pub mod preferences;
pub mod prompts;
pub mod share;
