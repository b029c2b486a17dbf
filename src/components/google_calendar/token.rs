use super::store::{Credential, CredentialStore};
use crate::config::Config;
use crate::error::{google_calendar_error, AppResult};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const REDIRECT_URI: &str = "http://localhost:8080";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Wire shape of Google's token endpoint responses
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

/// Obtains and refreshes OAuth credentials, persisting them through the store
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    store: Arc<dyn CredentialStore>,
    client: Client,
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            config,
            store,
            client: Client::new(),
        }
    }

    /// Get a usable credential: cached if still valid, refreshed if expired
    /// with a refresh token, otherwise freshly authorized in the browser
    pub async fn get_credential(&self) -> AppResult<Credential> {
        if let Some(credential) = self.store.load().await? {
            if !credential.is_expired(Utc::now()) {
                return Ok(credential);
            }

            if credential.refresh_token.is_some() {
                let refreshed = self.refresh(&credential).await?;
                self.store.save(&refreshed).await?;
                return Ok(refreshed);
            }
        }

        let credential = self.authorize().await?;
        self.store.save(&credential).await?;
        Ok(credential)
    }

    /// Refresh an expired credential
    async fn refresh(&self, credential: &Credential) -> AppResult<Credential> {
        let refresh_token = credential
            .refresh_token
            .clone()
            .ok_or_else(|| google_calendar_error("No refresh token in credential"))?;

        let (client_id, client_secret) = self.client_secrets().await;

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.clone()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        info!("Refreshed access token");

        // Google usually omits the refresh token on refresh responses
        Ok(Credential {
            access_token: token.access_token,
            refresh_token: token.refresh_token.or(Some(refresh_token)),
            expires_at: Utc::now().timestamp() + token.expires_in.unwrap_or(3600),
        })
    }

    /// Run the interactive browser authorization flow
    async fn authorize(&self) -> AppResult<Credential> {
        let (client_id, client_secret) = self.client_secrets().await;

        // Random state to tie the callback to this request
        let state = uuid::Uuid::new_v4().to_string();

        let auth_url = format!(
            "{}?\
            client_id={}&\
            redirect_uri={}&\
            response_type=code&\
            access_type=offline&\
            prompt=consent&\
            scope={}&\
            state={}",
            AUTH_ENDPOINT, client_id, REDIRECT_URI, CALENDAR_SCOPE, state
        );

        println!("Opening browser for Google Calendar authorization...");
        webbrowser::open(&auth_url)?;

        let server = tiny_http::Server::http("127.0.0.1:8080")
            .map_err(|e| google_calendar_error(&format!("Failed to start callback listener: {}", e)))?;
        println!("Waiting for authorization callback...");

        let request = server.recv()?;
        let callback_url = request.url().to_string();

        let code = query_param(&callback_url, "code")
            .ok_or_else(|| google_calendar_error("No authorization code found in callback"))?;

        if query_param(&callback_url, "state").as_deref() != Some(state.as_str()) {
            return Err(google_calendar_error("State mismatch in authorization callback"));
        }

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("code", code),
                ("redirect_uri", REDIRECT_URI.to_string()),
                ("grant_type", "authorization_code".to_string()),
            ])
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to exchange code: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to get token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        // Tell the browser we are done before moving on
        let reply =
            tiny_http::Response::from_string("Authorization successful! You can close this window.");
        request.respond(reply)?;

        info!("Authorization complete");

        Ok(Credential {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now().timestamp() + token.expires_in.unwrap_or(3600),
        })
    }

    async fn client_secrets(&self) -> (String, String) {
        let config_read = self.config.read().await;
        (
            config_read.google_client_id.clone(),
            config_read.google_client_secret.clone(),
        )
    }
}

/// Pull a single query parameter out of the callback URL
fn query_param(callback_url: &str, name: &str) -> Option<String> {
    let url = url::Url::parse(&format!("http://localhost{}", callback_url)).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        let url = "/?state=abc-123&code=4%2FxyZ&scope=calendar";
        assert_eq!(query_param(url, "code"), Some("4/xyZ".to_string()));
        assert_eq!(query_param(url, "state"), Some("abc-123".to_string()));
        assert_eq!(query_param(url, "missing"), None);
    }
}
