mod client;
pub mod models;

pub use client::{build_prompt, pick_candidate, GeminiClient};
pub use models::Suggestion;
