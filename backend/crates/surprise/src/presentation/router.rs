//! Surprise Router

use crate::application::config::SurpriseConfig;
use crate::application::session_store::SessionStore;
use crate::infra::memory::InMemorySessionStore;
use crate::presentation::handlers::{self, SurpriseAppState};
use axum::{
    Router,
    routing::{get, post},
};
use platform::clock::{Clock, SystemClock};
use std::sync::Arc;

/// Create the surprise router with the in-memory session store
pub fn surprise_router(
    store: InMemorySessionStore,
    config: SurpriseConfig,
    public_origin: Option<String>,
) -> Router {
    surprise_router_generic(store, config, Arc::new(SystemClock), public_origin)
}

/// Create a generic surprise router for any session store and clock
pub fn surprise_router_generic<S>(
    store: S,
    config: SurpriseConfig,
    clock: Arc<dyn Clock>,
    public_origin: Option<String>,
) -> Router
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let state = SurpriseAppState {
        store: Arc::new(store),
        config: Arc::new(config),
        clock,
        public_origin,
    };

    Router::new()
        .route("/", get(handlers::experience_entry::<S>))
        .route(
            "/admin",
            get(handlers::admin_form).post(handlers::admin_submit::<S>),
        )
        .route("/api/links", post(handlers::create_link::<S>))
        .route("/api/experience/{id}", get(handlers::get_experience::<S>))
        .route(
            "/api/experience/{id}/events",
            get(handlers::experience_events::<S>),
        )
        .route("/api/experience/{id}/unlock", post(handlers::unlock::<S>))
        .route(
            "/api/experience/{id}/open-gift",
            post(handlers::open_gift::<S>),
        )
        .route("/api/experience/{id}/advance", post(handlers::advance::<S>))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
