//! ICS file generation.

use chrono::Utc;
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike};

use crate::error::WeddingResult;
use crate::event::WeddingEvent;

const UID_DOMAIN: &str = "wedding-site";

/// Generate a calendar holding every given event.
///
/// Times are written in UTC so the file imports the same everywhere.
pub fn generate_ics(events: &[&WeddingEvent], tz: Tz, name: &str) -> WeddingResult<String> {
    let mut cal = Calendar::new();
    cal.name(name);

    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@{}", event.slug, UID_DOMAIN));
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTAMP", &dtstamp);

        let start = event.start_utc(tz)?;
        let end = event.end_utc(tz)?;
        ics_event.add_property("DTSTART", start.format("%Y%m%dT%H%M%SZ").to_string());
        ics_event.add_property("DTEND", end.format("%Y%m%dT%H%M%SZ").to_string());

        if let Some(location) = event.location() {
            ics_event.location(&location);
        }

        if let Some(details) = event.calendar_details() {
            ics_event.description(&details);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Normalize the icalendar crate's output
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:-//wedding-site//EN\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
