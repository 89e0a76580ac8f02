//! Civil-time helpers for loan records
//!
//! All recorded timestamps use a single fixed UTC+7 offset (WIB) regardless
//! of server locale, and serialize as `YYYY-MM-DD HH:MM:SS`. This is a
//! display convention carried over from the business side, not a clock the
//! system orders anything by.

use chrono::{FixedOffset, NaiveDateTime, Utc};
use once_cell::sync::Lazy;

/// Serialization format for all recorded timestamps
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static WIB: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(7 * 3600).expect("valid UTC+7 offset"));

/// Current wall-clock time in the fixed UTC+7 offset
pub fn now() -> NaiveDateTime {
    Utc::now().with_timezone(&*WIB).naive_local()
}

/// Serde adapter for `NaiveDateTime` using [`DATETIME_FORMAT`]
pub mod wib_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<NaiveDateTime>` using [`DATETIME_FORMAT`]
pub mod wib_format_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.format(DATETIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "wib_format")]
        at: NaiveDateTime,
        #[serde(with = "wib_format_opt")]
        until: Option<NaiveDateTime>,
    }

    #[test]
    fn formats_with_second_precision() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let json = serde_json::to_string(&Stamp { at, until: None }).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-02 03:04:05","until":null}"#);
    }

    #[test]
    fn round_trips_open_and_closed_stamps() {
        let json = r#"{"at":"2025-12-31 23:59:59","until":"2026-01-01 00:00:00"}"#;
        let stamp: Stamp = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&stamp).unwrap(), json);
    }

    #[test]
    fn clock_is_seven_hours_ahead_of_utc() {
        let wib = now();
        let utc = Utc::now().naive_utc();
        let drift = wib - utc - Duration::hours(7);
        assert!(drift.num_seconds().abs() < 5, "unexpected offset: {:?}", drift);
    }
}
