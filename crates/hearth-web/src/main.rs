//! hearth-web — contact-capture service for the Hearth site.
//!
//! Serves `POST /api/contact`, guarded by an in-memory fixed-window rate
//! limiter keyed by the forwarded client IP. Captured leads are logged
//! and, when a webhook is configured, forwarded to it.

mod api;
mod config;
mod dto;
mod error;
mod notify;
mod state;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header, Method};
use hearth_core::RateLimiter;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::notify::LeadNotifier;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load()?;
    let bind_addr = config.bind_addr;

    let limiter = Arc::new(Mutex::new(RateLimiter::new(
        config.rate_limit.requests_per_window,
        Duration::from_secs(config.rate_limit.window_seconds),
    )));

    let notifier = match &config.contact.lead_webhook_url {
        Some(url) => Some(Arc::new(LeadNotifier::new(url.clone()))),
        None => {
            tracing::warn!("No lead webhook configured. Submissions will be captured in logs only.");
            None
        }
    };

    let state = AppState {
        config: Arc::new(config),
        limiter: limiter.clone(),
        notifier,
    };

    // Limiter window sweep: drop client records whose window has elapsed.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            if let Ok(mut limiter) = limiter.lock() {
                limiter.purge_expired();
                tracing::debug!("rate limiter tracking {} clients", limiter.tracked_clients());
            }
        }
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = axum::Router::new()
        .nest("/api", api::router())
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("hearth-web listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
