use crate::error::{env_error, AppResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;

/// Default calendar to read from and write to
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Default location offered for created events
pub const DEFAULT_LOCATION: &str = "Los Angeles";

/// Default path for the persisted credential blob
pub const DEFAULT_TOKEN_CACHE: &str = "token.json";

/// Optional overrides loaded from config/slotti.toml
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    calendar_id: Option<String>,
    token_cache_path: Option<String>,
    default_location: Option<String>,
}

/// Main configuration structure for the application
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Calendar ID to read from and write to
    pub google_calendar_id: String,
    /// Gemini API key
    pub gemini_api_key: String,
    /// Where the credential blob is persisted
    pub token_cache_path: String,
    /// Location offered as the default for created events
    pub default_location: String,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;
        let gemini_api_key =
            env::var("GEMINI_API_KEY").map_err(|_| env_error("GEMINI_API_KEY"))?;

        // Optional, with defaults
        let mut google_calendar_id = env::var("GOOGLE_CALENDAR_ID")
            .unwrap_or_else(|_| String::from(DEFAULT_CALENDAR_ID));
        let mut token_cache_path = String::from(DEFAULT_TOKEN_CACHE);
        let mut default_location = String::from(DEFAULT_LOCATION);

        // Merge overrides from file if it exists
        if let Ok(content) = fs::read_to_string("config/slotti.toml") {
            let overrides: FileOverrides = toml::from_str(&content)?;
            if let Some(calendar_id) = overrides.calendar_id {
                google_calendar_id = calendar_id;
            }
            if let Some(path) = overrides.token_cache_path {
                token_cache_path = path;
            }
            if let Some(location) = overrides.default_location {
                default_location = location;
            }
        }

        Ok(Config {
            google_client_id,
            google_client_secret,
            google_calendar_id,
            gemini_api_key,
            token_cache_path,
            default_location,
        })
    }
}
