use super::models::CalendarEvent;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

/// Display format for free intervals, local timezone
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Minimum length of a reported free interval, in minutes
const FREE_SLOT_MIN_MINUTES: i64 = 60;

/// Query window for upcoming events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScheduleWindow {
    /// Seven-day lookahead starting at `now`
    pub fn next_week(now: DateTime<Utc>) -> Self {
        Self {
            start: now,
            end: now + Duration::days(7),
        }
    }
}

/// Contiguous span of calendar time containing no existing events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeInterval {
    /// Human-readable rendering in the local timezone
    pub fn display(&self) -> String {
        let start = self.start.with_timezone(&Local).format(DISPLAY_FORMAT);
        let end = self.end.with_timezone(&Local).format(DISPLAY_FORMAT);
        format!("From {} to {}", start, end)
    }
}

/// Parse a display string back into naive local start/end timestamps
pub fn parse_display(text: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let rest = text.strip_prefix("From ")?;
    let (start_str, end_str) = rest.split_once(" to ")?;
    let start = NaiveDateTime::parse_from_str(start_str.trim(), DISPLAY_FORMAT).ok()?;
    let end = NaiveDateTime::parse_from_str(end_str.trim(), DISPLAY_FORMAT).ok()?;
    Some((start, end))
}

/// Resolve the start instant of an event (datetime or date-only)
pub fn event_start(event: &CalendarEvent) -> Option<DateTime<Utc>> {
    resolve(event.start_date_time.as_deref(), event.start_date.as_deref())
}

/// Resolve the end instant of an event (datetime or date-only)
pub fn event_end(event: &CalendarEvent) -> Option<DateTime<Utc>> {
    resolve(event.end_date_time.as_deref(), event.end_date.as_deref())
}

fn resolve(date_time: Option<&str>, date: Option<&str>) -> Option<DateTime<Utc>> {
    if let Some(dt) = date_time {
        return DateTime::parse_from_rfc3339(dt)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    // Date-only boundaries resolve to midnight UTC
    let date = NaiveDate::parse_from_str(date?, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Walk events sorted by start time and collect the gaps of at least one
/// hour, including the leading gap from the window start and the trailing
/// gap up to the window end
pub fn free_intervals(window: &ScheduleWindow, events: &[CalendarEvent]) -> Vec<FreeInterval> {
    let min_gap = Duration::minutes(FREE_SLOT_MIN_MINUTES);
    let mut intervals = Vec::new();
    let mut last_end = window.start;

    for event in events {
        let (start, end) = match (event_start(event), event_end(event)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                warn!("Skipping event {} without usable start/end", event.id);
                continue;
            }
        };

        if start - last_end >= min_gap {
            intervals.push(FreeInterval {
                start: last_end,
                end: start,
            });
        }

        last_end = end;
    }

    if window.end - last_end >= min_gap {
        intervals.push(FreeInterval {
            start: last_end,
            end: window.end,
        });
    }

    intervals
}
