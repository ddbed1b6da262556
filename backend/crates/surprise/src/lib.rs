//! Birthday Surprise Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - The recipient flow as a pure state machine, link rules
//! - `application/` - Use cases and the per-view session runtime
//! - `infra/` - Session store implementations
//! - `presentation/` - HTTP handlers, pages and the event stream
//!
//! ## Session Model
//! - Every page view gets its own session actor at the password screen
//! - The event stream is the view's lifetime: dropping it disposes the
//!   session and cancels its timers
//! - The secret code never leaves the server once a session has started

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SurpriseConfig;
pub use error::{SurpriseError, SurpriseResult};
pub use infra::memory::InMemorySessionStore;
pub use presentation::router::surprise_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::link_request::*;
    pub use crate::domain::entity::surprise_parameters::*;
    pub use crate::domain::experience::*;
    pub use crate::domain::screen::*;
    pub use crate::presentation::dto::*;
    pub use crate::presentation::view::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
