use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::DATE_FORMAT;
use crate::clients::weather::DailyEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecast: String,
    pub time: String,
    pub location_id: i32,
}

impl Forecast {
    #[must_use]
    pub fn from_daily(entry: &DailyEntry, location_id: i32) -> Self {
        let time = entry
            .time
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format(DATE_FORMAT).to_string())
            .unwrap_or_default();

        Self {
            forecast: entry.summary.clone().unwrap_or_default(),
            time,
            location_id,
        }
    }
}
