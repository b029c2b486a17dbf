use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(slotti::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(slotti::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(slotti::google_calendar))]
    GoogleCalendar(String),

    #[error("Gemini API error: {0}")]
    #[diagnostic(code(slotti::gemini))]
    Gemini(String),

    #[error("Credential store error: {0}")]
    #[diagnostic(code(slotti::credentials))]
    Credentials(String),

    #[error("Prompt error: {0}")]
    #[diagnostic(code(slotti::prompt))]
    Prompt(String),

    #[error(transparent)]
    #[diagnostic(code(slotti::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(slotti::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(slotti::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON errors (credential blob, wire payloads)
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create Gemini errors
pub fn gemini_error(message: &str) -> Error {
    Error::Gemini(message.to_string())
}

/// Helper to create credential store errors
pub fn credentials_error(message: &str) -> Error {
    Error::Credentials(message.to_string())
}

/// Helper to create prompt errors
pub fn prompt_error(message: &str) -> Error {
    Error::Prompt(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
