//! Loads subscription records from the JSON subscriptions file.
//!
//! The file holds an array of objects:
//!
//! ```json
//! [
//!   { "series": "E", "subscription_number": "123456789", "acquisition_date": "2023-06-15", "units": 30000 }
//! ]
//! ```

use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use aforro_market_data::Series;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Deserialize;

use super::subscriptions_model::SubscriptionRecord;
use crate::errors::{Error, Result, ValidationError};

/// One entry as written in the file, before validation.
#[derive(Debug, Deserialize)]
struct SubscriptionEntry {
    series: String,
    subscription_number: SubscriptionNumber,
    acquisition_date: String,
    units: i64,
}

/// Subscription numbers are usually quoted, but bare integers are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubscriptionNumber {
    Text(String),
    Number(u64),
}

impl SubscriptionNumber {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Reads and validates the subscriptions file at `path`.
pub fn load_subscriptions(path: &Path) -> Result<Vec<SubscriptionRecord>> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            Error::SubscriptionsNotFound(path.to_path_buf())
        } else {
            Error::SubscriptionsIo {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let records = parse_subscriptions(&contents)?;
    debug!(
        "Loaded {} subscriptions from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parses and validates subscriptions from a JSON document.
pub fn parse_subscriptions(json: &str) -> Result<Vec<SubscriptionRecord>> {
    let entries: Vec<SubscriptionEntry> =
        serde_json::from_str(json).map_err(ValidationError::InvalidJson)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| to_record(i + 1, entry).map_err(Error::from))
        .collect()
}

fn to_record(
    index: usize,
    entry: SubscriptionEntry,
) -> std::result::Result<SubscriptionRecord, ValidationError> {
    let invalid = |message: String| ValidationError::InvalidRecord { index, message };

    let series = Series::from_str(&entry.series).map_err(|e| invalid(e.to_string()))?;
    let acquisition_date = parse_acquisition_date(&entry.acquisition_date).ok_or_else(|| {
        invalid(format!(
            "invalid acquisition_date '{}', expected YYYY-MM-DD",
            entry.acquisition_date
        ))
    })?;
    let subscription_number = entry.subscription_number.into_string();
    let units = u32::try_from(entry.units).map_err(|_| ValidationError::InvalidSubscription {
        series: series.to_string(),
        subscription_number: subscription_number.clone(),
        message: format!("units must be a positive integer, got {}", entry.units),
    })?;

    SubscriptionRecord::new(series, subscription_number, acquisition_date, units)
}

/// Accepts a plain ISO date, or an ISO date-time whose date part is used.
fn parse_acquisition_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::from_str(raw)
        .ok()
        .or_else(|| NaiveDateTime::from_str(raw).ok().map(|dt| dt.date()))
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_file() {
        let records = parse_subscriptions(
            r#"[
                {"series": "E", "subscription_number": "111", "acquisition_date": "2023-06-15", "units": 30000},
                {"series": "F", "subscription_number": 222, "acquisition_date": "2024-01-02T00:00:00", "units": 10000}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].series(), Series::E);
        assert_eq!(records[0].subscription_number(), "111");
        assert_eq!(records[0].acquisition_date(), date(2023, 6, 15));
        assert_eq!(records[0].units(), 30000);
        assert_eq!(records[1].series(), Series::F);
        assert_eq!(records[1].subscription_number(), "222");
        assert_eq!(records[1].acquisition_date(), date(2024, 1, 2));
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_subscriptions("[]").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_series_reports_index() {
        let err = parse_subscriptions(
            r#"[
                {"series": "E", "subscription_number": "1", "acquisition_date": "2023-06-15", "units": 1},
                {"series": "Z", "subscription_number": "2", "acquisition_date": "2023-06-15", "units": 1}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidRecord { index: 2, .. })
        ));
    }

    #[test]
    fn test_negative_units_names_subscription() {
        let err = parse_subscriptions(
            r#"[{"series": "E", "subscription_number": "77", "acquisition_date": "2023-06-15", "units": -5}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("E-77"));
    }

    #[test]
    fn test_zero_units_rejected() {
        let err = parse_subscriptions(
            r#"[{"series": "E", "subscription_number": "77", "acquisition_date": "2023-06-15", "units": 0}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("units must be positive"));
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = parse_subscriptions(
            r#"[{"series": "E", "subscription_number": "77", "acquisition_date": "15/06/2023", "units": 5}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid acquisition_date"));
    }

    #[test]
    fn test_not_an_array_rejected() {
        let err = parse_subscriptions(r#"{"series": "E"}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscriptions.json");
        let err = load_subscriptions(&path).unwrap_err();
        assert!(matches!(err, Error::SubscriptionsNotFound(p) if p == path));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"series": "C", "subscription_number": "9", "acquisition_date": "2010-02-03", "units": 250}}]"#
        )
        .unwrap();
        let records = load_subscriptions(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label(), "C-9");
    }
}
