//! Target Instant Value Object
//!
//! The absolute point in time a countdown runs to. It travels in links as
//! an ISO-8601 UTC string with millisecond precision, the same shape a
//! browser's `Date.prototype.toISOString` produces.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantParseError {
    #[error("Instant is empty")]
    Empty,

    #[error("Not an ISO-8601 instant: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetInstant(DateTime<Utc>);

impl TargetInstant {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as
    /// midnight UTC.
    pub fn parse(value: &str) -> Result<Self, InstantParseError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(InstantParseError::Empty);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|date| Self(date.and_time(NaiveTime::MIN).and_utc()))
            .map_err(|_| InstantParseError::Invalid(value.to_string()))
    }

    /// Build from the `date` query parameter. Absent, empty or unparseable
    /// values all mean "no target".
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| Self::parse(v).ok())
    }

    /// Resolve a wall-clock date and time in `tz` to an absolute instant.
    ///
    /// Returns `None` for local times that do not exist (DST gaps).
    /// Ambiguous local times (DST overlaps) resolve to the earlier instant.
    pub fn from_local<Tz: TimeZone>(date: NaiveDate, time: NaiveTime, tz: &Tz) -> Option<Self> {
        tz.from_local_datetime(&NaiveDateTime::new(date, time))
            .earliest()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Milliseconds from `now` until the target; negative once passed.
    pub fn remaining_millis(&self, now: DateTime<Utc>) -> i64 {
        (self.0 - now).num_milliseconds()
    }

    #[inline]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl FromStr for TargetInstant {
    type Err = InstantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}
