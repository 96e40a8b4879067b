use chrono::{SecondsFormat, TimeZone, Utc};

pub trait ToIsoString {
    /// Formats the timestamp as a UTC ISO-8601 string with millisecond precision, e.g. `2025-03-14T09:26:53.589Z`.
    fn to_iso_string(&self) -> String;
}

impl<Tz: TimeZone> ToIsoString for chrono::DateTime<Tz> {
    fn to_iso_string(&self) -> String {
        self.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
