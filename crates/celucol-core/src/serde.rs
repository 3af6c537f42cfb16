// `::serde` is the external crate; this module only shadows its name.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// `serialize_with` helper: UTC timestamp as `2025-10-01T14:30:00.000Z`.
pub fn to_rfc3339_ms<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}
