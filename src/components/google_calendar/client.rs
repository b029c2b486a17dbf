use super::models::{
    CalendarEvent, CreatedEvent, EventPayload, EventTimePayload, EventsListResponse,
    InsertResponse, NewEventRequest,
};
use super::time::ScheduleWindow;
use super::token::TokenManager;
use crate::config::Config;
use crate::error::{google_calendar_error, AppResult};
use crate::workflow::CalendarApi;
use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use url::Url;

/// Created events always carry this timezone
pub const WRITE_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

/// Cap on the number of events fetched per run
const MAX_RESULTS: u32 = 50;

/// REST client for the Google Calendar v3 events collection
pub struct GoogleCalendarClient {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
}

impl GoogleCalendarClient {
    pub fn new(config: Arc<RwLock<Config>>, token_manager: TokenManager) -> Self {
        Self {
            config,
            token_manager,
            client: Client::new(),
        }
    }

    async fn events_url(&self) -> AppResult<Url> {
        let calendar_id = {
            let config_read = self.config.read().await;
            config_read.google_calendar_id.clone()
        };

        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            calendar_id
        );

        Url::parse(&url_str).map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn authenticate(&self) -> AppResult<()> {
        self.token_manager.get_credential().await?;
        Ok(())
    }

    async fn upcoming_events(&self, window: &ScheduleWindow) -> AppResult<Vec<CalendarEvent>> {
        let credential = self.token_manager.get_credential().await?;

        let mut url = self.events_url().await?;
        url.query_pairs_mut()
            .append_pair("timeMin", &window.start.to_rfc3339())
            .append_pair("timeMax", &window.end.to_rfc3339())
            .append_pair("maxResults", &MAX_RESULTS.to_string())
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", credential.access_token))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let listing: EventsListResponse = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        let events: Vec<CalendarEvent> =
            listing.items.into_iter().map(CalendarEvent::from).collect();
        info!("Fetched {} upcoming events", events.len());

        Ok(events)
    }

    async fn insert_event(&self, request: &NewEventRequest) -> AppResult<CreatedEvent> {
        // Fetch the credential again; it may have expired since the listing
        let credential = self.token_manager.get_credential().await?;

        let payload = EventPayload {
            summary: request.summary.clone(),
            location: request.location.clone(),
            description: request.description.clone(),
            start: EventTimePayload {
                date_time: request.start.to_rfc3339(),
                time_zone: WRITE_TIMEZONE.name().to_string(),
            },
            end: EventTimePayload {
                date_time: request.end.to_rfc3339(),
                time_zone: WRITE_TIMEZONE.name().to_string(),
            },
        };

        let url = self.events_url().await?;
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", credential.access_token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to insert event: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to insert event: HTTP {} - {}",
                status, error_body
            )));
        }

        let created: InsertResponse = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse insert response: {}", e)))?;

        info!("Inserted event {}", created.id);

        Ok(CreatedEvent {
            id: created.id,
            html_link: created.html_link,
        })
    }
}
