use chrono::{FixedOffset, Offset, Utc};

/// Formats tried, in order, after RFC 3339 when coercing a string to a date-time.
pub const DEFAULT_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d"];

/// Controls string to date-time coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeConfig {
    /// `chrono` format strings for inputs without an offset. Date-only formats
    /// resolve to midnight.
    pub formats: Vec<String>,
    /// Offset assigned to inputs parsed with one of `formats`.
    pub offset: FixedOffset,
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_TIME_FORMATS
                .iter()
                .map(|format| format.to_string())
                .collect(),
            offset: Utc.fix(),
        }
    }
}
