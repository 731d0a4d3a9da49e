//! Serialization helpers for common non-serde-native types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde module for `Duration` as whole milliseconds.
pub mod duration_serde {
    use super::*;

    /// Serializes `Duration` as milliseconds (u64).
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    /// Deserializes `Duration` from milliseconds (u64).
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Serde module for `DateTime<Utc>` as RFC3339 text, used for the informational
/// (non-wire) timestamps attached to messages and monitoring events.
pub mod serde_time {
    use super::*;

    /// Serializes `DateTime<Utc>` as an RFC3339 string.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_rfc3339().serialize(serializer)
    }

    /// Deserializes `DateTime<Utc>` from an RFC3339 string.
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

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct DurationHolder {
        #[serde(with = "duration_serde")]
        duration: Duration,
    }

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct TimeHolder {
        #[serde(with = "serde_time")]
        at: DateTime<Utc>,
    }

    #[test]
    fn duration_serde_roundtrip() {
        let original = DurationHolder {
            duration: Duration::from_millis(1500),
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: DurationHolder = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }

    #[test]
    fn serde_time_roundtrip() {
        let original = TimeHolder { at: Utc::now() };
        let json = serde_json::to_string(&original).unwrap();
        let back: TimeHolder = serde_json::from_str(&json).unwrap();
        // RFC3339 serialization is lossy to the microsecond; compare at that granularity.
        assert_eq!(original.at.timestamp_micros(), back.at.timestamp_micros());
    }
}
