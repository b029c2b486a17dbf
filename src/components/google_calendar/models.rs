use serde::{Deserialize, Serialize};

/// Simplified calendar event representation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
}

/// Wire shape of the events.list response
#[derive(Debug, Deserialize)]
pub struct EventsListResponse {
    #[serde(default)]
    pub items: Vec<RawEvent>,
}

/// Wire shape of one listed event
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<RawEventTime>,
    pub end: Option<RawEventTime>,
}

/// Start/end of a listed event; exactly one of the fields is set
#[derive(Debug, Deserialize)]
pub struct RawEventTime {
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
    pub date: Option<String>,
}

impl From<RawEvent> for CalendarEvent {
    fn from(raw: RawEvent) -> Self {
        let (start_date_time, start_date) = match raw.start {
            Some(time) => (time.date_time, time.date),
            None => (None, None),
        };
        let (end_date_time, end_date) = match raw.end {
            Some(time) => (time.date_time, time.date),
            None => (None, None),
        };

        CalendarEvent {
            id: raw.id,
            summary: raw.summary,
            start_date_time,
            start_date,
            end_date_time,
            end_date,
        }
    }
}

/// Event to be written to the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventRequest {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: chrono::DateTime<chrono::Utc>,
    pub end: chrono::DateTime<chrono::Utc>,
}

/// Provider acknowledgement of an inserted event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    pub id: String,
    pub html_link: Option<String>,
}

/// Wire shape of the events.insert request body
#[derive(Debug, Serialize)]
pub struct EventPayload {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: EventTimePayload,
    pub end: EventTimePayload,
}

#[derive(Debug, Serialize)]
pub struct EventTimePayload {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Wire shape of the events.insert response
#[derive(Debug, Deserialize)]
pub struct InsertResponse {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
}
