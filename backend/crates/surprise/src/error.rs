//! Surprise Error Types
//!
//! Feature-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::ExperienceId;
use thiserror::Error;

use crate::domain::entity::link_request::ValidationError;
use crate::domain::experience::CommandRejected;

pub type SurpriseResult<T> = Result<T, SurpriseError>;

#[derive(Debug, Error)]
pub enum SurpriseError {
    /// Link generator input rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown, expired or disposed session
    #[error("Experience {0} not found")]
    SessionNotFound(ExperienceId),

    /// Command does not apply to the current screen
    #[error(transparent)]
    InvalidCommand(#[from] CommandRejected),

    /// Session ended while the request was in flight
    #[error("Experience {0} has ended")]
    SessionClosed(ExperienceId),

    #[error(transparent)]
    Internal(#[from] AppError),
}

impl SurpriseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurpriseError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SurpriseError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            SurpriseError::InvalidCommand(_) => StatusCode::CONFLICT,
            SurpriseError::SessionClosed(_) => StatusCode::GONE,
            SurpriseError::Internal(app) => StatusCode::from_u16(app.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SurpriseError::Validation(_) => ErrorKind::UnprocessableEntity,
            SurpriseError::SessionNotFound(_) => ErrorKind::NotFound,
            SurpriseError::InvalidCommand(_) => ErrorKind::Conflict,
            SurpriseError::SessionClosed(_) => ErrorKind::Gone,
            SurpriseError::Internal(app) => app.kind(),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SurpriseError::Internal(app) if app.is_server_error() => {
                tracing::error!(error = ?app, "Surprise internal error");
            }
            SurpriseError::SessionClosed(id) => {
                tracing::warn!(experience_id = %id, "Command hit a closed experience");
            }
            SurpriseError::InvalidCommand(rejected) => {
                tracing::debug!(
                    screen = %rejected.screen,
                    command = %rejected.command,
                    "Command rejected"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Surprise error");
            }
        }
    }
}

impl From<SurpriseError> for AppError {
    fn from(err: SurpriseError) -> Self {
        let message = err.to_string();
        match err {
            SurpriseError::Validation(_) => {
                AppError::unprocessable(message).with_action("Please fill in all fields")
            }
            SurpriseError::SessionNotFound(_) => {
                AppError::not_found(message).with_action("Open the surprise link again")
            }
            SurpriseError::SessionClosed(_) => {
                AppError::gone(message).with_action("Open the surprise link again")
            }
            SurpriseError::InvalidCommand(rejected) => {
                AppError::conflict(message).with_source(rejected)
            }
            SurpriseError::Internal(app) => app,
        }
    }
}

impl IntoResponse for SurpriseError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::link_request::LinkField;
    use crate::domain::experience::CommandKind;
    use crate::domain::screen::Screen;

    #[test]
    fn test_status_codes() {
        let id = ExperienceId::new();
        let cases = [
            (
                SurpriseError::Validation(ValidationError::MissingFields(vec![LinkField::Code])),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (SurpriseError::SessionNotFound(id), StatusCode::NOT_FOUND),
            (
                SurpriseError::InvalidCommand(CommandRejected {
                    screen: Screen::Letter,
                    command: CommandKind::Advance,
                }),
                StatusCode::CONFLICT,
            ),
            (SurpriseError::SessionClosed(id), StatusCode::GONE),
            (
                SurpriseError::Internal(AppError::internal("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.kind().status_code(), status.as_u16());
            assert_eq!(AppError::from(err).status_code(), status.as_u16());
        }
    }

    #[test]
    fn test_render_failure_keeps_its_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SurpriseError::from(AppError::from(json_err));
        assert_eq!(err.kind(), ErrorKind::InternalServerError);

        let app = AppError::from(err);
        assert_eq!(app.message(), "JSON serialization error");
        assert!(std::error::Error::source(&app).is_some());
    }

    #[test]
    fn test_validation_carries_action() {
        let err = SurpriseError::from(ValidationError::MissingFields(vec![LinkField::Date]));
        let app = AppError::from(err);
        assert_eq!(app.action(), Some("Please fill in all fields"));
        assert_eq!(app.message(), "Missing required fields: date");
    }
}
