//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::generate_link::OperatorClock;
use crate::application::session::CommandReport;
use crate::domain::entity::link_request::LinkRequest;
use crate::domain::screen::Screen;

/// Admin form marker for a local time skipped by a DST transition
pub const SKIPPED_LOCAL_TIME: &str = "skipped";

/// Query for GET /
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceQuery {
    pub name: Option<String>,
    pub code: Option<String>,
    pub date: Option<String>,
}

/// Request for POST /api/links
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl CreateLinkRequest {
    pub fn split(self) -> (LinkRequest, OperatorClock) {
        let request = LinkRequest {
            name: self.name,
            code: self.code,
            date: self.date,
            time: self.time,
        };
        (request, self.utc_offset_minutes.into())
    }
}

/// Response for POST /api/links
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub link: String,
    pub target_instant: String,
}

/// Form body for POST /admin
///
/// Every field arrives as text. The offset is filled in by the page script
/// and is ignored when blank or malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub utc_offset_minutes: String,
}

impl AdminForm {
    /// The browser sends its offset for the chosen date, `skipped` when
    /// that local time does not exist, or nothing.
    pub fn operator_clock(&self) -> OperatorClock {
        match self.utc_offset_minutes.trim() {
            SKIPPED_LOCAL_TIME => OperatorClock::Skipped,
            minutes => OperatorClock::from(minutes.parse::<i32>().ok()),
        }
    }

    pub fn to_request(&self) -> LinkRequest {
        LinkRequest {
            name: self.name.clone(),
            code: self.code.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }
}

/// Request for POST /api/experience/{id}/unlock
#[derive(Debug, Clone, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub code: String,
}

/// Response for every experience command
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub accepted: bool,
    pub screen: Screen,
    pub rejected: bool,
}

impl From<CommandReport> for CommandResponse {
    fn from(report: CommandReport) -> Self {
        Self {
            accepted: true,
            screen: report.screen,
            rejected: report.rejected(),
        }
    }
}

/// Response for GET /healthz
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
