use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::DATE_FORMAT;
use crate::clients::eventbrite::EventEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Happening {
    pub link: String,
    pub name: String,
    pub event_date: String,
    pub summary: String,
    pub location_id: i32,
}

impl Happening {
    #[must_use]
    pub fn from_event(event: &EventEntry, location_id: i32) -> Self {
        let name = event
            .name
            .as_ref()
            .and_then(|n| n.text.clone())
            .unwrap_or_default();

        let event_date = event
            .start
            .as_ref()
            .and_then(|s| s.local.as_deref())
            .and_then(format_local_date)
            .unwrap_or_default();

        Self {
            link: event.url.clone().unwrap_or_default(),
            name,
            event_date,
            summary: event.summary.clone().unwrap_or_default(),
            location_id,
        }
    }
}

/// Eventbrite local times carry no offset (`2026-10-18T19:00:00`).
fn format_local_date(local: &str) -> Option<String> {
    let date = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(local, "%Y-%m-%d"))
        .ok()?;

    Some(date.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::eventbrite::{EventStart, EventText};

    #[test]
    fn test_from_event() {
        let event = EventEntry {
            url: Some("https://www.eventbrite.com/e/123".to_string()),
            name: Some(EventText {
                text: Some("Harbor Night Market".to_string()),
            }),
            start: Some(EventStart {
                local: Some("2026-10-18T19:00:00".to_string()),
            }),
            summary: Some("Food and music".to_string()),
        };

        let happening = Happening::from_event(&event, 9);
        assert_eq!(happening.link, "https://www.eventbrite.com/e/123");
        assert_eq!(happening.name, "Harbor Night Market");
        assert_eq!(happening.event_date, "Sun Oct 18 2026");
        assert_eq!(happening.summary, "Food and music");
        assert_eq!(happening.location_id, 9);
    }

    #[test]
    fn test_from_event_without_summary() {
        let event = EventEntry {
            url: None,
            name: None,
            start: Some(EventStart {
                local: Some("not a date".to_string()),
            }),
            summary: None,
        };

        let happening = Happening::from_event(&event, 1);
        assert_eq!(happening.summary, "");
        assert_eq!(happening.name, "");
        assert_eq!(happening.event_date, "");
    }

    #[test]
    fn test_format_local_date_accepts_bare_date() {
        assert_eq!(
            format_local_date("2026-01-05").as_deref(),
            Some("Mon Jan 05 2026")
        );
    }
}
