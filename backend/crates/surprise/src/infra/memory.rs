//! In-Memory Session Store
//!
//! Sessions live only as long as the process. Removing an entry drops the
//! store's handle; the actor stops once no event stream holds another.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use kernel::id::ExperienceId;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::application::session::Session;
use crate::application::session_store::SessionStore;
use crate::error::SurpriseResult;

struct Entry {
    session: Session,
    created_at: Instant,
    attached: bool,
}

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<ExperienceId, Entry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> SurpriseResult<()> {
        let entry = Entry {
            session: session.clone(),
            created_at: Instant::now(),
            attached: false,
        };
        self.sessions.write().await.insert(session.id(), entry);
        Ok(())
    }

    async fn get(&self, id: ExperienceId) -> SurpriseResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&id)
            .filter(|entry| !entry.session.is_closed())
            .map(|entry| entry.session.clone()))
    }

    async fn attach(&self, id: ExperienceId) -> SurpriseResult<Option<Session>> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions
            .get_mut(&id)
            .filter(|entry| !entry.session.is_closed())
            .map(|entry| {
                entry.attached = true;
                entry.session.clone()
            }))
    }

    async fn cleanup_expired(&self, idle_ttl: Duration) -> SurpriseResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            !entry.session.is_closed() && (entry.attached || entry.created_at.elapsed() < idle_ttl)
        });
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::SurpriseConfig;
    use crate::domain::entity::surprise_parameters::SurpriseParameters;
    use crate::domain::experience::Experience;
    use platform::clock::SystemClock;

    fn spawn() -> Session {
        let params = SurpriseParameters::from_query(
            Some("Ada"),
            Some("cake"),
            Some("2030-01-01T00:00:00.000Z"),
        )
        .unwrap();
        Session::spawn(
            ExperienceId::new(),
            Experience::new(params),
            Arc::new(SurpriseConfig::default()),
            Arc::new(SystemClock),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_and_get() {
        let store = InMemorySessionStore::new();
        let session = spawn();
        let id = session.id();

        store.insert(session).await.unwrap();
        assert!(store.get(id).await.unwrap().is_some());
        assert!(store.get(ExperienceId::new()).await.unwrap().is_none());
        assert_eq!(store.len().await, 1);
        assert!(!store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_keeps_attached_and_fresh_sessions() {
        let store = InMemorySessionStore::new();
        let idle = spawn();
        let watched = spawn();
        let (idle_id, watched_id) = (idle.id(), watched.id());
        store.insert(idle).await.unwrap();
        store.insert(watched).await.unwrap();
        store.attach(watched_id).await.unwrap();

        let ttl = Duration::from_secs(600);
        assert_eq!(store.cleanup_expired(ttl).await.unwrap(), 0);

        tokio::time::advance(ttl).await;
        assert_eq!(store.cleanup_expired(ttl).await.unwrap(), 1);
        assert!(store.get(idle_id).await.unwrap().is_none());
        assert!(store.get(watched_id).await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disposed_sessions_are_hidden_and_swept() {
        let store = InMemorySessionStore::new();
        let session = spawn();
        let id = session.id();
        store.insert(session.clone()).await.unwrap();

        session.dispose();
        while !session.is_closed() {
            tokio::task::yield_now().await;
        }

        assert!(store.get(id).await.unwrap().is_none());
        assert!(store.attach(id).await.unwrap().is_none());
        assert_eq!(store.cleanup_expired(Duration::from_secs(600)).await.unwrap(), 1);
        assert_eq!(store.len().await, 0);
    }
}
