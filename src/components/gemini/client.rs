use super::models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, Suggestion,
};
use crate::components::google_calendar::time::FreeInterval;
use crate::config::Config;
use crate::error::{gemini_error, AppResult};
use crate::workflow::SuggestionApi;
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// generateContent endpoint for the model we use
const GENERATE_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// REST client for the Gemini generative-text API
pub struct GeminiClient {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

/// Build the single natural-language prompt embedding all free intervals
pub fn build_prompt(intervals: &[FreeInterval]) -> String {
    let slots: Vec<serde_json::Value> = intervals
        .iter()
        .map(|interval| {
            serde_json::json!({
                "start_time": interval.start.to_rfc3339(),
                "end_time": interval.end.to_rfc3339(),
            })
        })
        .collect();

    format!(
        "Surprise me with an event for someone 18 years old in Los Angeles. \
        It should be during these time slots: {}. Just pick one event that fits.",
        serde_json::Value::Array(slots)
    )
}

/// Pick one candidate uniformly at random
pub fn pick_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.choose(&mut rand::rng())
}

#[async_trait]
impl SuggestionApi for GeminiClient {
    async fn suggest(&self, intervals: &[FreeInterval]) -> AppResult<Option<Suggestion>> {
        let api_key = {
            let config_read = self.config.read().await;
            config_read.gemini_api_key.clone()
        };

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(intervals),
                }],
            }],
        };

        let response = self
            .client
            .post(GENERATE_ENDPOINT)
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| gemini_error(&format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(gemini_error(&format!("HTTP {} - {}", status, error_body)));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| gemini_error(&format!("Failed to parse response: {}", e)))?;

        let candidates = body.candidates.unwrap_or_default();
        if candidates.is_empty() {
            info!("No candidates in Gemini response");
            return Ok(None);
        }

        Ok(pick_candidate(&candidates)
            .and_then(Candidate::text)
            .map(|text| Suggestion {
                text: text.to_string(),
            }))
    }
}
