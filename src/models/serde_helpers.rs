//! Serde serialization helpers for ensuring consistent JSON output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Date fields are carried as ISO-8601 strings on the wire and rehydrated
/// to native datetimes on load.
pub mod iso_date {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Default beat duration weight when a persisted slot omits it
pub fn default_duration() -> f32 {
    1.0
}
