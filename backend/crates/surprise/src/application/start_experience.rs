//! Start Experience Use Case
//!
//! Opening a link starts a fresh session at the password screen. Nothing
//! is shared between page views.

use std::sync::Arc;

use kernel::id::ExperienceId;
use platform::clock::Clock;

use crate::application::config::SurpriseConfig;
use crate::application::session::{Session, SessionSnapshot};
use crate::application::session_store::SessionStore;
use crate::domain::entity::surprise_parameters::SurpriseParameters;
use crate::domain::experience::Experience;
use crate::error::SurpriseResult;

#[derive(Debug, Clone)]
pub struct StartExperienceOutput {
    pub id: ExperienceId,
    pub snapshot: SessionSnapshot,
}

pub struct StartExperienceUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
    config: Arc<SurpriseConfig>,
    clock: Arc<dyn Clock>,
}

impl<S> StartExperienceUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>, config: Arc<SurpriseConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    pub async fn execute(&self, params: SurpriseParameters) -> SurpriseResult<StartExperienceOutput> {
        let id = ExperienceId::new();
        let experience = Experience::with_letter(params, self.config.custom_letter.as_deref());
        let session = Session::spawn(id, experience, self.config.clone(), self.clock.clone());
        let snapshot = session.snapshot();

        self.store.insert(session).await?;

        Ok(StartExperienceOutput { id, snapshot })
    }
}
