use crate::components::gemini::models::Suggestion;
use crate::components::google_calendar::models::{CalendarEvent, CreatedEvent, NewEventRequest};
use crate::components::google_calendar::time::{free_intervals, FreeInterval, ScheduleWindow};
use crate::config::Config;
use crate::error::AppResult;
use crate::prompt::Prompter;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

/// Calendar provider port
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Warm the credential; the first run triggers the interactive flow
    async fn authenticate(&self) -> AppResult<()>;

    /// Events in the window, sorted by start time, single occurrences
    async fn upcoming_events(&self, window: &ScheduleWindow) -> AppResult<Vec<CalendarEvent>>;

    /// Write one event to the calendar
    async fn insert_event(&self, request: &NewEventRequest) -> AppResult<CreatedEvent>;
}

/// Generative-text provider port
#[async_trait]
pub trait SuggestionApi: Send + Sync {
    /// One suggestion constrained to the given intervals, None when the
    /// provider has nothing to offer
    async fn suggest(&self, intervals: &[FreeInterval]) -> AppResult<Option<Suggestion>>;
}

/// Single linear run: authenticate, list free slots, let the user pick one,
/// fetch a suggestion, write the event back
pub struct Workflow<C, S, P> {
    config: Arc<RwLock<Config>>,
    calendar: C,
    suggestions: S,
    prompter: P,
}

impl<C: CalendarApi, S: SuggestionApi, P: Prompter> Workflow<C, S, P> {
    pub fn new(config: Arc<RwLock<Config>>, calendar: C, suggestions: S, prompter: P) -> Self {
        Self {
            config,
            calendar,
            suggestions,
            prompter,
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        // Credential problems are fatal; everything after this degrades
        self.calendar.authenticate().await?;

        let window = ScheduleWindow::next_week(Utc::now());
        let intervals = self.fetch_free_intervals(&window).await;

        if intervals.is_empty() {
            println!("No free time slots found in your calendar.");
            return Ok(());
        }

        println!("\nAvailable time slots:");
        let rendered: Vec<String> = intervals.iter().map(FreeInterval::display).collect();
        for (i, slot) in rendered.iter().enumerate() {
            println!("{}. {}", i + 1, slot);
        }

        let chosen = match self.prompter.select_slot(&rendered)? {
            Some(index) if index < intervals.len() => intervals[index],
            _ => {
                println!("Invalid selection");
                return Ok(());
            }
        };

        let default_location = {
            let config_read = self.config.read().await;
            config_read.default_location.clone()
        };
        let location = self
            .prompter
            .input_text("Enter location:", Some(&default_location))?;

        println!("\nSearching events in {}...", location);

        let suggestion = match self.suggestions.suggest(&intervals).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                error!("Suggestion request failed: {:?}", e);
                None
            }
        };

        let Some(suggestion) = suggestion else {
            println!("\nNo event found. Try adjusting your search parameters.");
            return Ok(());
        };

        println!("\nSurprise! Here's an event that fits your schedule:");
        println!("Event: {}", suggestion.text);

        let title = self
            .prompter
            .input_text("Enter a title for this event:", None)?;

        let request = NewEventRequest {
            summary: title,
            location,
            description: suggestion.text,
            start: chosen.start,
            end: chosen.end,
        };

        match self.calendar.insert_event(&request).await {
            Ok(created) => {
                let link = created
                    .html_link
                    .unwrap_or_else(|| String::from("(no link)"));
                println!("Event created successfully: {}", link);
            }
            Err(e) => {
                error!("Error creating the event in Google Calendar: {:?}", e);
                println!("Error creating the event in Google Calendar.");
            }
        }

        Ok(())
    }

    /// Fetch events and derive free intervals; provider errors degrade to an
    /// empty schedule instead of aborting the run
    async fn fetch_free_intervals(&self, window: &ScheduleWindow) -> Vec<FreeInterval> {
        let events = match self.calendar.upcoming_events(window).await {
            Ok(events) => events,
            Err(e) => {
                error!("Error fetching schedule: {:?}", e);
                Vec::new()
            }
        };

        free_intervals(window, &events)
    }
}
