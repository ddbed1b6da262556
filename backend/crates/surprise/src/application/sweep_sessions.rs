//! Sweep Sessions Use Case
//!
//! Drops sessions whose page never attached an event stream, and sessions
//! that already ended.

use std::sync::Arc;

use crate::application::config::SurpriseConfig;
use crate::application::session_store::SessionStore;
use crate::error::SurpriseResult;

pub struct SweepSessionsUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
    config: Arc<SurpriseConfig>,
}

impl<S> SweepSessionsUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>, config: Arc<SurpriseConfig>) -> Self {
        Self { store, config }
    }

    /// Returns how many sessions were removed.
    pub async fn execute(&self) -> SurpriseResult<usize> {
        let removed = self
            .store
            .cleanup_expired(self.config.session_idle_ttl)
            .await?;

        if removed > 0 {
            tracing::info!(sessions_removed = removed, "Swept idle experiences");
        }

        Ok(removed)
    }
}
