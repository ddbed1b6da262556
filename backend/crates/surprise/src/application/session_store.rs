//! Session Store Trait
//!
//! Where live sessions are kept between requests. Implementation is in the
//! infrastructure layer.

use std::time::Duration;

use kernel::id::ExperienceId;

use crate::application::session::Session;
use crate::error::SurpriseResult;

#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Register a freshly spawned session
    async fn insert(&self, session: Session) -> SurpriseResult<()>;

    /// Look up a live session. Closed sessions are reported as absent.
    async fn get(&self, id: ExperienceId) -> SurpriseResult<Option<Session>>;

    /// Look up a live session and mark it as attached to an event stream.
    async fn attach(&self, id: ExperienceId) -> SurpriseResult<Option<Session>>;

    /// Drop closed sessions and those never attached within `idle_ttl`.
    /// Returns how many were removed.
    async fn cleanup_expired(&self, idle_ttl: Duration) -> SurpriseResult<usize>;
}
