//! Generate Link Use Case

use chrono::{FixedOffset, Local, Utc};

use crate::domain::entity::link_request::{LinkRequest, SurpriseLink, ValidationError};
use crate::error::SurpriseResult;

/// How the operator's date and time map onto UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClock {
    /// The server's local timezone
    ServerLocal,
    /// Minutes east of UTC in effect on the chosen date
    Offset(i32),
    /// The operator's timezone skips the chosen time (DST gap)
    Skipped,
}

impl From<Option<i32>> for OperatorClock {
    fn from(minutes: Option<i32>) -> Self {
        minutes.map_or(Self::ServerLocal, Self::Offset)
    }
}

/// Input for link generation
#[derive(Debug, Clone)]
pub struct GenerateLinkInput {
    pub request: LinkRequest,
    /// Scheme and host the link should point at
    pub origin: String,
    pub clock: OperatorClock,
}

/// Generate Link Use Case
#[derive(Debug, Default)]
pub struct GenerateLinkUseCase;

impl GenerateLinkUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, input: GenerateLinkInput) -> SurpriseResult<SurpriseLink> {
        let link = match input.clock {
            OperatorClock::Offset(minutes) => {
                let offset = minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or(ValidationError::InvalidOffset(minutes))?;
                input.request.to_link(&input.origin, &offset)?
            }
            OperatorClock::ServerLocal => input.request.to_link(&input.origin, &Local)?,
            OperatorClock::Skipped => {
                // Missing fields and malformed values are reported first.
                input.request.to_link(&input.origin, &Utc)?;
                return Err(ValidationError::NonexistentLocalTime {
                    date: input.request.date.trim().to_string(),
                    time: input.request.time.trim().to_string(),
                }
                .into());
            }
        };

        tracing::info!(
            target_instant = %link.target_instant,
            "Generated surprise link"
        );

        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurpriseError;

    fn input(clock: OperatorClock) -> GenerateLinkInput {
        GenerateLinkInput {
            request: LinkRequest {
                name: "Ada".into(),
                code: "cake".into(),
                date: "2026-12-10".into(),
                time: "09:15".into(),
            },
            origin: "https://surprise.example".into(),
            clock,
        }
    }

    #[test]
    fn test_offset_shifts_target() {
        let link = GenerateLinkUseCase::new().execute(input(OperatorClock::Offset(120))).unwrap();
        assert_eq!(link.target_instant.to_iso_string(), "2026-12-10T07:15:00.000Z");
        assert!(link.url.ends_with("date=2026-12-10T07%3A15%3A00.000Z"));
    }

    #[test]
    fn test_negative_offset() {
        let link = GenerateLinkUseCase::new()
            .execute(input(OperatorClock::Offset(-300)))
            .unwrap();
        assert_eq!(link.target_instant.to_iso_string(), "2026-12-10T14:15:00.000Z");
    }

    #[test]
    fn test_out_of_range_offset_is_rejected() {
        for minutes in [24 * 60, -24 * 60, i32::MAX] {
            let err = GenerateLinkUseCase::new()
                .execute(input(OperatorClock::Offset(minutes)))
                .unwrap_err();
            assert!(matches!(
                err,
                SurpriseError::Validation(ValidationError::InvalidOffset(m)) if m == minutes
            ));
        }
    }

    #[test]
    fn test_server_local_timezone_when_no_offset() {
        let link = GenerateLinkUseCase::new().execute(input(OperatorClock::ServerLocal));
        assert!(link.is_ok());
    }

    #[test]
    fn test_skipped_local_time_is_rejected() {
        let err = GenerateLinkUseCase::new()
            .execute(input(OperatorClock::Skipped))
            .unwrap_err();
        assert!(matches!(
            err,
            SurpriseError::Validation(ValidationError::NonexistentLocalTime { ref date, ref time })
                if date == "2026-12-10" && time == "09:15"
        ));
    }

    #[test]
    fn test_skipped_still_reports_missing_fields_first() {
        let mut skipped = input(OperatorClock::Skipped);
        skipped.request.code = "  ".into();
        let err = GenerateLinkUseCase::new().execute(skipped).unwrap_err();
        assert!(matches!(
            err,
            SurpriseError::Validation(ValidationError::MissingFields(_))
        ));
    }
}
