//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level errors go through
//! `surprise::SurpriseError` and `kernel::error::AppError`.

use platform::config::{env_opt, env_or, env_parse};
use platform::schedule;
use std::net::SocketAddr;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use surprise::application::sweep_sessions::SweepSessionsUseCase;
use surprise::{InMemorySessionStore, SurpriseConfig, surprise_router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,surprise=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Surprise configuration
    let mut config = if cfg!(debug_assertions) {
        SurpriseConfig::development()
    } else {
        SurpriseConfig::default()
    };
    if let Some(secs) = env_parse::<u64>("SESSION_IDLE_TTL_SECS")? {
        config.session_idle_ttl = Duration::from_secs(secs);
    }
    if let Some(secs) = env_parse::<u64>("RECONNECT_GRACE_SECS")? {
        config.reconnect_grace = Duration::from_secs(secs);
    }

    let public_origin = env_opt("PUBLIC_ORIGIN");
    match &public_origin {
        Some(origin) => tracing::info!(%origin, "Generated links use the configured origin"),
        None => tracing::info!("Generated links use the request's Host header"),
    }

    let store = InMemorySessionStore::new();

    // Periodic sweep of sessions whose page never attached
    let sweeper = Arc::new(SweepSessionsUseCase::new(
        Arc::new(store.clone()),
        Arc::new(config.clone()),
    ));
    let _sweep_task = schedule::every(config.sweep_interval, move || {
        let sweeper = sweeper.clone();
        tokio::spawn(async move {
            if let Err(e) = sweeper.execute().await {
                tracing::warn!(error = %e, "Session sweep failed, will retry");
            }
        });
        ControlFlow::Continue(())
    });

    // Build router
    let app = surprise_router(store, config, public_origin).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", "0.0.0.0:31113").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
