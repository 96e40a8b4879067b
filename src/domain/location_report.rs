use crate::domain::Fix;
use crate::extensions::date_time_ext::ToIsoString;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The payload sent to the collector.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub timestamp: String,
    pub user_agent: String,
}

impl LocationReport {
    pub fn new(fix: &Fix, captured_at: DateTime<Utc>, user_agent: impl Into<String>) -> Self {
        LocationReport {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy: fix.accuracy,
            timestamp: captured_at.to_iso_string(),
            user_agent: user_agent.into(),
        }
    }
}
