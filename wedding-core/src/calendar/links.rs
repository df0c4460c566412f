//! Template links for hosted calendars.

use chrono_tz::Tz;
use url::Url;

use crate::error::{WeddingError, WeddingResult};
use crate::event::WeddingEvent;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_COMPOSE_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

fn parse_base(base: &str) -> WeddingResult<Url> {
    Url::parse(base).map_err(|e| WeddingError::Config(format!("Invalid calendar URL: {e}")))
}

/// Google Calendar "create event" link
pub fn google_calendar_url(event: &WeddingEvent, tz: Tz) -> WeddingResult<Url> {
    let start = event.start_utc(tz)?.format("%Y%m%dT%H%M%SZ");
    let end = event.end_utc(tz)?.format("%Y%m%dT%H%M%SZ");

    let mut url = parse_base(GOOGLE_CALENDAR_URL)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &event.title)
            .append_pair("dates", &format!("{}/{}", start, end));
        if let Some(details) = event.calendar_details() {
            query.append_pair("details", &details);
        }
        if let Some(location) = event.location() {
            query.append_pair("location", &location);
        }
    }

    Ok(url)
}

/// Outlook.com compose link
pub fn outlook_calendar_url(event: &WeddingEvent, tz: Tz) -> WeddingResult<Url> {
    let start = event.start_utc(tz)?.format("%Y-%m-%dT%H:%M:%SZ");
    let end = event.end_utc(tz)?.format("%Y-%m-%dT%H:%M:%SZ");

    let mut url = parse_base(OUTLOOK_COMPOSE_URL)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("path", "/calendar/action/compose")
            .append_pair("rru", "addevent")
            .append_pair("subject", &event.title)
            .append_pair("startdt", &start.to_string())
            .append_pair("enddt", &end.to_string());
        if let Some(details) = event.calendar_details() {
            query.append_pair("body", &details);
        }
        if let Some(location) = event.location() {
            query.append_pair("location", &location);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ceremony() -> WeddingEvent {
        let day = NaiveDate::from_ymd_opt(2025, 5, 23).unwrap();
        WeddingEvent {
            slug: "ceremony".to_string(),
            title: "Wedding Ceremony".to_string(),
            start: day.and_hms_opt(9, 0, 0).unwrap(),
            end: day.and_hms_opt(12, 0, 0).unwrap(),
            venue: vec!["4143 Ayodhya Way".to_string(), "Ijamsville, MD 21754".to_string()],
            dress_code: None,
            note: None,
        }
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_google_calendar_url() {
        let url = google_calendar_url(&ceremony(), chrono_tz::America::New_York).unwrap();

        assert_eq!(url.host_str(), Some("calendar.google.com"));
        assert_eq!(query_value(&url, "action").as_deref(), Some("TEMPLATE"));
        assert_eq!(query_value(&url, "text").as_deref(), Some("Wedding Ceremony"));
        assert_eq!(
            query_value(&url, "dates").as_deref(),
            Some("20250523T130000Z/20250523T160000Z")
        );
        assert_eq!(
            query_value(&url, "location").as_deref(),
            Some("4143 Ayodhya Way, Ijamsville, MD 21754")
        );
        assert_eq!(query_value(&url, "details"), None);
    }

    #[test]
    fn test_outlook_calendar_url() {
        let url = outlook_calendar_url(&ceremony(), chrono_tz::America::New_York).unwrap();

        assert_eq!(
            query_value(&url, "startdt").as_deref(),
            Some("2025-05-23T13:00:00Z")
        );
        assert_eq!(query_value(&url, "enddt").as_deref(), Some("2025-05-23T16:00:00Z"));
        assert_eq!(query_value(&url, "subject").as_deref(), Some("Wedding Ceremony"));
    }
}
