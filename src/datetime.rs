//! Date/time utilities for jarstore.

use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a filesystem timestamp as an RFC3339 UTC string with millisecond precision.
///
/// Example: `2024-01-15T10:30:00.000Z`
pub fn to_rfc3339_millis(time: SystemTime) -> String {
    let dt: DateTime<Utc> = time.into();
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
