// src/retention.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Retain-until date for object-locked uploads.
//!
//! Only the exact `YYYY-MM-DDTHH:MM:SSZ` shape is accepted, and the value must
//! name a real UTC instant.

use std::fmt;
use std::str::FromStr;

use aws_sdk_s3::primitives::DateTime as S3DateTime;
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::RETENTION_DATE_FORMAT;

static RETENTION_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$")
        .expect("retention regex is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetentionError {
    #[error("expected YYYY-MM-DDTHH:MM:SSZ, got {0:?}")]
    Format(String),

    #[error("{0:?} is not a valid calendar date/time")]
    OutOfRange(String),
}

/// An accepted retention timestamp. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RetentionDate(DateTime<Utc>);

impl RetentionDate {
    pub fn parse(input: &str) -> Result<Self, RetentionError> {
        if !RETENTION_SHAPE.is_match(input) {
            return Err(RetentionError::Format(input.to_string()));
        }
        let naive = NaiveDateTime::parse_from_str(input, RETENTION_DATE_FORMAT)
            .map_err(|_| RetentionError::OutOfRange(input.to_string()))?;
        Ok(Self(naive.and_utc()))
    }

    /// Value for `ObjectLockRetainUntilDate`.
    pub fn to_s3_datetime(&self) -> S3DateTime {
        S3DateTime::from_secs(self.0.timestamp())
    }

    pub fn is_in_past(&self) -> bool {
        self.0 <= Utc::now()
    }
}

impl FromStr for RetentionDate {
    type Err = RetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RetentionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RETENTION_DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact_format() {
        let r = RetentionDate::parse("2024-12-31T00:00:00Z").unwrap();
        assert_eq!(r.to_string(), "2024-12-31T00:00:00Z");
        assert_eq!(r.to_s3_datetime().secs(), 1_735_603_200);
    }

    #[test]
    fn test_rejects_other_shapes() {
        for bad in [
            "",
            "2024-12-31",
            "2024-12-31 00:00:00Z",
            "2024-12-31T00:00:00",
            "2024-12-31T00:00:00+00:00",
            "2024-12-31T00:00:00.000Z",
            "2024-1-31T00:00:00Z",
            " 2024-12-31T00:00:00Z",
            "2024-12-31T00:00:00Z\n",
            "+2024-12-31T00:00:00Z",
        ] {
            assert_eq!(
                RetentionDate::parse(bad),
                Err(RetentionError::Format(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        for bad in ["2024-02-30T00:00:00Z", "2024-13-01T00:00:00Z", "2024-12-31T24:00:00Z"] {
            assert!(matches!(RetentionDate::parse(bad), Err(RetentionError::OutOfRange(_))));
        }
        assert!(RetentionDate::parse("2024-02-29T23:59:59Z").is_ok());
    }

    #[test]
    fn test_past_detection() {
        assert!(RetentionDate::parse("2000-01-01T00:00:00Z").unwrap().is_in_past());
        assert!(!RetentionDate::parse("9999-12-31T23:59:59Z").unwrap().is_in_past());
    }
}
