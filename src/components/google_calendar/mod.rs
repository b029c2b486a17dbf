mod client;
pub mod models;
pub mod store;
pub mod time;
pub mod token;

pub use client::{GoogleCalendarClient, WRITE_TIMEZONE};
pub use models::CalendarEvent;
