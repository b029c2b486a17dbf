use async_trait::async_trait;
use chrono::Duration;
use slotti::components::gemini::models::Suggestion;
use slotti::components::google_calendar::models::{CalendarEvent, CreatedEvent, NewEventRequest};
use slotti::components::google_calendar::time::{FreeInterval, ScheduleWindow};
use slotti::config::Config;
use slotti::error::{gemini_error, google_calendar_error, AppResult};
use slotti::prompt::Prompter;
use slotti::workflow::{CalendarApi, SuggestionApi, Workflow};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

fn test_config() -> Arc<RwLock<Config>> {
    Arc::new(RwLock::new(Config {
        google_client_id: "test_client_id".to_string(),
        google_client_secret: "test_client_secret".to_string(),
        google_calendar_id: "primary".to_string(),
        gemini_api_key: "test_gemini_key".to_string(),
        token_cache_path: "token.json".to_string(),
        default_location: "Los Angeles".to_string(),
    }))
}

/// Mock calendar provider that records inserts instead of calling out
struct MockCalendar {
    events: Vec<CalendarEvent>,
    fail_fetch: bool,
    fail_insert: bool,
    inserts: Arc<Mutex<Vec<NewEventRequest>>>,
}

impl MockCalendar {
    fn new() -> (Self, Arc<Mutex<Vec<NewEventRequest>>>) {
        let inserts = Arc::new(Mutex::new(Vec::new()));
        let mock = Self {
            events: Vec::new(),
            fail_fetch: false,
            fail_insert: false,
            inserts: Arc::clone(&inserts),
        };
        (mock, inserts)
    }
}

#[async_trait]
impl CalendarApi for MockCalendar {
    async fn authenticate(&self) -> AppResult<()> {
        Ok(())
    }

    async fn upcoming_events(&self, _window: &ScheduleWindow) -> AppResult<Vec<CalendarEvent>> {
        if self.fail_fetch {
            return Err(google_calendar_error("fetch failed"));
        }
        Ok(self.events.clone())
    }

    async fn insert_event(&self, request: &NewEventRequest) -> AppResult<CreatedEvent> {
        self.inserts.lock().unwrap().push(request.clone());
        if self.fail_insert {
            return Err(google_calendar_error("insert failed"));
        }
        Ok(CreatedEvent {
            id: "created1".to_string(),
            html_link: Some("https://calendar.example/created1".to_string()),
        })
    }
}

/// Mock suggestion provider with a fixed answer and a call counter
struct MockSuggestions {
    answer: AppResult<Option<Suggestion>>,
    calls: Arc<AtomicUsize>,
}

impl MockSuggestions {
    fn new(answer: AppResult<Option<Suggestion>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mock = Self {
            answer,
            calls: Arc::clone(&calls),
        };
        (mock, calls)
    }
}

#[async_trait]
impl SuggestionApi for MockSuggestions {
    async fn suggest(&self, _intervals: &[FreeInterval]) -> AppResult<Option<Suggestion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(suggestion) => Ok(suggestion.clone()),
            Err(_) => Err(gemini_error("suggestion failed")),
        }
    }
}

/// Prompter that replays a script instead of reading the terminal
struct ScriptedPrompter {
    slot: Option<usize>,
    location: String,
    title: String,
    seen_slots: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    fn new(slot: Option<usize>) -> Self {
        Self {
            slot,
            location: "Helsinki".to_string(),
            title: "Surprise outing".to_string(),
            seen_slots: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select_slot(&self, slots: &[String]) -> AppResult<Option<usize>> {
        *self.seen_slots.lock().unwrap() = slots.to_vec();
        Ok(self.slot)
    }

    fn input_text(&self, message: &str, _default: Option<&str>) -> AppResult<String> {
        if message.contains("title") {
            Ok(self.title.clone())
        } else {
            Ok(self.location.clone())
        }
    }
}

fn suggestion(text: &str) -> Suggestion {
    Suggestion {
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_happy_path_writes_chosen_slot() {
    let (calendar, inserts) = MockCalendar::new();
    let (suggestions, _) = MockSuggestions::new(Ok(Some(suggestion("Go stargazing"))));
    let prompter = ScriptedPrompter::new(Some(0));
    let seen_slots = Arc::clone(&prompter.seen_slots);

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);
    workflow.run().await.unwrap();

    // Empty schedule renders exactly one slot: the whole week
    assert_eq!(seen_slots.lock().unwrap().len(), 1);

    let inserts = inserts.lock().unwrap();
    assert_eq!(inserts.len(), 1);
    let request = &inserts[0];
    assert_eq!(request.summary, "Surprise outing");
    assert_eq!(request.location, "Helsinki");
    assert_eq!(request.description, "Go stargazing");
    assert_eq!(request.end - request.start, Duration::days(7));
}

#[tokio::test]
async fn test_empty_candidates_skip_calendar_write() {
    let (calendar, inserts) = MockCalendar::new();
    let (suggestions, calls) = MockSuggestions::new(Ok(None));
    let prompter = ScriptedPrompter::new(Some(0));

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);
    workflow.run().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(inserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_suggestion_error_is_contained() {
    let (calendar, inserts) = MockCalendar::new();
    let (suggestions, calls) = MockSuggestions::new(Err(gemini_error("boom")));
    let prompter = ScriptedPrompter::new(Some(0));

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);

    // The provider error is logged, not propagated
    workflow.run().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(inserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_insert_failure_is_contained() {
    let (mut calendar, inserts) = MockCalendar::new();
    calendar.fail_insert = true;
    let (suggestions, _) = MockSuggestions::new(Ok(Some(suggestion("Go stargazing"))));
    let prompter = ScriptedPrompter::new(Some(0));

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);

    // The insert was attempted once and its failure did not escape
    workflow.run().await.unwrap();
    assert_eq!(inserts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_fetch_error_degrades_to_no_slots() {
    let (mut calendar, inserts) = MockCalendar::new();
    calendar.fail_fetch = true;
    let (suggestions, calls) = MockSuggestions::new(Ok(Some(suggestion("Go stargazing"))));
    let prompter = ScriptedPrompter::new(Some(0));

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);
    workflow.run().await.unwrap();

    // No slots means the suggestion provider is never consulted
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(inserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_selection_aborts() {
    let (calendar, inserts) = MockCalendar::new();
    let (suggestions, calls) = MockSuggestions::new(Ok(Some(suggestion("Go stargazing"))));
    let prompter = ScriptedPrompter::new(None);

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);
    workflow.run().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(inserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_selection_aborts() {
    let (calendar, inserts) = MockCalendar::new();
    let (suggestions, calls) = MockSuggestions::new(Ok(Some(suggestion("Go stargazing"))));
    let prompter = ScriptedPrompter::new(Some(5));

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);
    workflow.run().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(inserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chosen_slot_bounds_reach_the_insert() {
    let (mut calendar, inserts) = MockCalendar::new();
    // An event far in the future leaves one gap from now up to its start
    calendar.events = vec![CalendarEvent {
        id: "e1".to_string(),
        summary: Some("Standup".to_string()),
        start_date_time: Some("2099-01-01T11:00:00Z".to_string()),
        end_date_time: Some("2099-01-01T12:00:00Z".to_string()),
        ..Default::default()
    }];
    let (suggestions, _) = MockSuggestions::new(Ok(Some(suggestion("Visit a museum"))));
    let prompter = ScriptedPrompter::new(Some(0));
    let seen_slots = Arc::clone(&prompter.seen_slots);

    let workflow = Workflow::new(test_config(), calendar, suggestions, prompter);
    workflow.run().await.unwrap();

    assert_eq!(seen_slots.lock().unwrap().len(), 1);

    let inserts = inserts.lock().unwrap();
    assert_eq!(inserts.len(), 1);
    assert_eq!(
        inserts[0].end,
        "2099-01-01T11:00:00Z"
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap()
    );
}
