//! Watch Experience Use Case
//!
//! Snapshot reads and event-stream attachment. An attached stream is the
//! view's mount: once the last [`SessionSubscription`] is dropped and none
//! reattaches within the reconnect grace, the session is disposed.

use std::sync::Arc;

use kernel::id::ExperienceId;
use tokio::sync::watch;

use crate::application::session::{Session, SessionSnapshot};
use crate::application::session_store::SessionStore;
use crate::error::{SurpriseError, SurpriseResult};

/// Live feed of one session's snapshots.
#[derive(Debug)]
pub struct SessionSubscription {
    session: Session,
    updates: watch::Receiver<SessionSnapshot>,
}

impl SessionSubscription {
    fn new(session: Session) -> Self {
        let updates = session.subscribe();
        session.attach_stream();
        Self { session, updates }
    }

    /// Current snapshot, marking it as seen.
    pub fn current(&mut self) -> SessionSnapshot {
        self.updates.borrow_and_update().clone()
    }

    /// Wait for the next snapshot. `None` once the session has ended.
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        self.updates.changed().await.ok()?;
        Some(self.updates.borrow_and_update().clone())
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        tracing::info!(experience_id = %self.session.id(), "Event stream detached");
        self.session.detach_stream();
    }
}

pub struct WatchExperienceUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
}

impl<S> WatchExperienceUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn snapshot(&self, id: ExperienceId) -> SurpriseResult<SessionSnapshot> {
        let session = self
            .store
            .get(id)
            .await?
            .ok_or(SurpriseError::SessionNotFound(id))?;
        Ok(session.snapshot())
    }

    pub async fn attach(&self, id: ExperienceId) -> SurpriseResult<SessionSubscription> {
        let session = self
            .store
            .attach(id)
            .await?
            .ok_or(SurpriseError::SessionNotFound(id))?;

        tracing::info!(experience_id = %id, "Event stream attached");
        Ok(SessionSubscription::new(session))
    }
}
