//! Sub-events of the wedding (ceremony, reception, pre-wedding party).
//!
//! Times are stored as local wall-clock times; the site-wide timezone turns
//! them into absolute instants for calendar output.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{WeddingError, WeddingResult};

/// One sub-event shown on an invitation page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeddingEvent {
    pub slug: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,

    /// Address lines, rendered one per line on the page
    #[serde(default)]
    pub venue: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dress_code: Option<String>,

    /// Free text shown under the details (e.g. "Dinner and dancing to follow")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WeddingEvent {
    pub fn start_utc(&self, tz: Tz) -> WeddingResult<DateTime<Utc>> {
        to_utc(&self.start, tz)
    }

    pub fn end_utc(&self, tz: Tz) -> WeddingResult<DateTime<Utc>> {
        to_utc(&self.end, tz)
    }

    /// "Friday"
    pub fn weekday(&self) -> String {
        self.start.format("%A").to_string()
    }

    /// "May 23rd, 2025"
    pub fn display_date(&self) -> String {
        let day = self.start.day();
        format!(
            "{} {}{}, {}",
            self.start.format("%B"),
            day,
            ordinal_suffix(day),
            self.start.year()
        )
    }

    /// "9:00 AM"
    pub fn display_time(&self) -> String {
        self.start.format("%-I:%M %p").to_string()
    }

    /// Venue on a single line, for calendar LOCATION fields
    pub fn location(&self) -> Option<String> {
        if self.venue.is_empty() {
            None
        } else {
            Some(self.venue.join(", "))
        }
    }

    /// Text placed in calendar descriptions
    pub fn calendar_details(&self) -> Option<String> {
        let parts: Vec<String> = self
            .dress_code
            .iter()
            .map(|d| format!("Dress Code: {}", d))
            .chain(self.note.iter().cloned())
            .collect();

        if parts.is_empty() { None } else { Some(parts.join("\n")) }
    }
}

fn to_utc(local: &NaiveDateTime, tz: Tz) -> WeddingResult<DateTime<Utc>> {
    tz.from_local_datetime(local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            WeddingError::LocalTime(format!("{} does not exist in {}", local, tz.name()))
        })
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
