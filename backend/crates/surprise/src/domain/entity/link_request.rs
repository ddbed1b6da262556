//! Link Request Entity
//!
//! What an operator fills in on the creation screen, and the rules that
//! turn it into a shareable link.
//!
//! ## Rules
//! - All four fields are required. A value made only of whitespace is
//!   treated as missing.
//! - `date` is `YYYY-MM-DD`; `time` is `HH:MM` or `HH:MM:SS`.
//! - Date and time are wall-clock values in the operator's timezone. A
//!   local time that does not exist there is rejected, never shifted.

use chrono::{NaiveDate, NaiveTime, TimeZone};
use platform::encoding::encode_component;
use std::fmt;
use thiserror::Error;

use crate::domain::value_object::target_instant::TargetInstant;

/// Creation form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Name,
    Code,
    Date,
    Time,
}

impl LinkField {
    pub const ALL: [LinkField; 4] = [
        LinkField::Name,
        LinkField::Code,
        LinkField::Date,
        LinkField::Time,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LinkField::Name => "name",
            LinkField::Code => "code",
            LinkField::Date => "date",
            LinkField::Time => "time",
        }
    }
}

impl fmt::Display for LinkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why no link could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<LinkField>),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid time: {0:?}")]
    InvalidTime(String),

    #[error("{date} {time} does not exist in the operator's timezone")]
    NonexistentLocalTime { date: String, time: String },

    #[error("Invalid UTC offset: {0} minutes")]
    InvalidOffset(i32),
}

fn join_fields(fields: &[LinkField]) -> String {
    fields
        .iter()
        .map(LinkField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw operator input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRequest {
    pub name: String,
    pub code: String,
    pub date: String,
    pub time: String,
}

/// A generated link and the instant it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurpriseLink {
    pub url: String,
    pub target_instant: TargetInstant,
}

impl LinkRequest {
    fn field(&self, field: LinkField) -> &str {
        match field {
            LinkField::Name => &self.name,
            LinkField::Code => &self.code,
            LinkField::Date => &self.date,
            LinkField::Time => &self.time,
        }
    }

    /// Fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<LinkField> {
        LinkField::ALL
            .into_iter()
            .filter(|f| self.field(*f).trim().is_empty())
            .collect()
    }

    /// Combine `date` and `time` in `tz` into an absolute instant.
    pub fn target_instant<Tz: TimeZone>(&self, tz: &Tz) -> Result<TargetInstant, ValidationError> {
        let date_str = self.date.trim();
        let time_str = self.time.trim();

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date_str.to_string()))?;
        let time = NaiveTime::parse_from_str(time_str, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M:%S"))
            .map_err(|_| ValidationError::InvalidTime(time_str.to_string()))?;

        TargetInstant::from_local(date, time, tz).ok_or_else(|| {
            ValidationError::NonexistentLocalTime {
                date: date_str.to_string(),
                time: time_str.to_string(),
            }
        })
    }

    /// Validate and build `<origin>?name=..&code=..&date=..`.
    ///
    /// `name` and `code` are encoded exactly as typed.
    pub fn to_link<Tz: TimeZone>(&self, origin: &str, tz: &Tz) -> Result<SurpriseLink, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let target_instant = self.target_instant(tz)?;
        let url = format!(
            "{}?name={}&code={}&date={}",
            origin.trim_end_matches('/'),
            encode_component(&self.name),
            encode_component(&self.code),
            encode_component(&target_instant.to_iso_string()),
        );

        Ok(SurpriseLink {
            url,
            target_instant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    const ORIGIN: &str = "https://surprise.example";

    fn request() -> LinkRequest {
        LinkRequest {
            name: "Ada Lovelace".into(),
            code: "cake&candles".into(),
            date: "2026-12-10".into(),
            time: "09:15".into(),
        }
    }

    #[test]
    fn test_every_missing_field_is_rejected() {
        for field in LinkField::ALL {
            let mut req = request();
            match field {
                LinkField::Name => req.name.clear(),
                LinkField::Code => req.code = "   ".into(),
                LinkField::Date => req.date.clear(),
                LinkField::Time => req.time.clear(),
            }

            assert_eq!(
                req.to_link(ORIGIN, &Utc),
                Err(ValidationError::MissingFields(vec![field]))
            );
        }
    }

    #[test]
    fn test_all_missing_fields_are_listed() {
        let err = LinkRequest::default().to_link(ORIGIN, &Utc).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: name, code, date, time");
    }

    #[test]
    fn test_link_format() {
        let link = request().to_link("https://surprise.example/", &Utc).unwrap();
        assert_eq!(
            link.url,
            "https://surprise.example?name=Ada%20Lovelace&code=cake%26candles&date=2026-12-10T09%3A15%3A00.000Z"
        );
    }

    #[test]
    fn test_local_time_is_converted_to_utc() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let link = request().to_link(ORIGIN, &tokyo).unwrap();
        assert_eq!(link.target_instant.to_iso_string(), "2026-12-10T00:15:00.000Z");
    }

    #[test]
    fn test_seconds_are_accepted() {
        let mut req = request();
        req.time = "09:15:30".into();
        let instant = req.target_instant(&Utc).unwrap();
        assert_eq!(instant.to_iso_string(), "2026-12-10T09:15:30.000Z");
    }

    #[test]
    fn test_invalid_date_and_time_are_not_corrected() {
        let mut req = request();
        req.date = "2026-02-30".into();
        assert_eq!(
            req.to_link(ORIGIN, &Utc),
            Err(ValidationError::InvalidDate("2026-02-30".into()))
        );

        let mut req = request();
        req.time = "25:00".into();
        assert_eq!(
            req.to_link(ORIGIN, &Utc),
            Err(ValidationError::InvalidTime("25:00".into()))
        );
    }

    #[test]
    fn test_encoded_date_round_trips() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let link = request().to_link(ORIGIN, &offset).unwrap();

        let encoded = link.url.rsplit("date=").next().unwrap();
        let decoded = encoded.replace("%3A", ":");
        assert_eq!(TargetInstant::parse(&decoded).unwrap(), link.target_instant);
    }
}
