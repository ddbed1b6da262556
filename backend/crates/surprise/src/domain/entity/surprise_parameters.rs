//! Surprise Parameters
//!
//! The three values a shareable link carries. They are read once when a
//! recipient opens the link and never change for the life of that view.

use crate::domain::value_object::{
    recipient_name::RecipientName, secret_code::SecretCode, target_instant::TargetInstant,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurpriseParameters {
    pub recipient_name: RecipientName,
    pub secret_code: SecretCode,
    pub target_instant: TargetInstant,
}

/// Which required link parameters were absent.
///
/// Not an error: it routes the recipient to the fallback view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingParameters {
    pub code: bool,
    pub date: bool,
}

impl SurpriseParameters {
    /// Build from raw query values.
    ///
    /// `name` falls back to the default recipient. `code` and `date` are
    /// required; an empty value or a `date` that is not a parseable instant
    /// counts as absent.
    pub fn from_query(
        name: Option<&str>,
        code: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self, MissingParameters> {
        let secret_code = SecretCode::from_param(code);
        let target_instant = TargetInstant::from_param(date);

        match (secret_code, target_instant) {
            (Some(secret_code), Some(target_instant)) => Ok(Self {
                recipient_name: RecipientName::from_param(name),
                secret_code,
                target_instant,
            }),
            (secret_code, target_instant) => Err(MissingParameters {
                code: secret_code.is_none(),
                date: target_instant.is_none(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "2026-12-24T18:30:00.000Z";

    #[test]
    fn test_complete_query() {
        let p = SurpriseParameters::from_query(Some("Ada"), Some("cake"), Some(DATE)).unwrap();
        assert_eq!(p.recipient_name.as_str(), "Ada");
        assert!(p.secret_code.matches("cake"));
        assert_eq!(p.target_instant.to_iso_string(), DATE);
    }

    #[test]
    fn test_name_is_optional() {
        let p = SurpriseParameters::from_query(None, Some("cake"), Some(DATE)).unwrap();
        assert_eq!(p.recipient_name.as_str(), "Birthday Star");
    }

    #[test]
    fn test_either_required_parameter_missing_is_reported() {
        let cases = [
            (None, Some(DATE), MissingParameters { code: true, date: false }),
            (Some("cake"), None, MissingParameters { code: false, date: true }),
            (None, None, MissingParameters { code: true, date: true }),
            (Some(""), Some(DATE), MissingParameters { code: true, date: false }),
            (Some("cake"), Some(""), MissingParameters { code: false, date: true }),
            (Some("cake"), Some("soon"), MissingParameters { code: false, date: true }),
        ];

        for (code, date, expected) in cases {
            assert_eq!(
                SurpriseParameters::from_query(Some("Ada"), code, date),
                Err(expected),
                "code={code:?} date={date:?}"
            );
        }
    }
}
