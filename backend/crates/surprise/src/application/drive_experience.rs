//! Drive Experience Use Case
//!
//! Forwards recipient commands to their session.

use std::sync::Arc;

use kernel::id::ExperienceId;

use crate::application::session::CommandReport;
use crate::application::session_store::SessionStore;
use crate::domain::experience::Command;
use crate::error::{SurpriseError, SurpriseResult};

pub struct DriveExperienceUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
}

impl<S> DriveExperienceUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, id: ExperienceId, command: Command) -> SurpriseResult<CommandReport> {
        let session = self
            .store
            .get(id)
            .await?
            .ok_or(SurpriseError::SessionNotFound(id))?;

        session.send(command).await
    }
}
