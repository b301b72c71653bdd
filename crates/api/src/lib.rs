//! HTTP API hosting one order store per browsing session.
//!
//! A rendering layer creates a session, loads a restaurant catalog into it,
//! and then drives the cart by posting store commands. Structured logging
//! comes from tracing and counters are exported for Prometheus.

pub mod config;
pub mod error;
pub mod routes;
pub mod sessions;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use catalog_client::CatalogClient;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::sessions::AppState;
use sessions::SessionRegistry;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C: CatalogClient + 'static>(
    state: Arc<AppState<C>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<C>))
        .route("/sessions", post(routes::sessions::create::<C>))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get::<C>).delete(routes::sessions::delete::<C>),
        )
        .route("/sessions/{id}/commands", post(routes::sessions::dispatch::<C>))
        .route("/sessions/{id}/cart", get(routes::sessions::cart::<C>))
        .route(
            "/sessions/{id}/load/{restaurant_id}",
            post(routes::sessions::load::<C>),
        )
        .route("/sessions/{id}/checkout", post(routes::sessions::checkout::<C>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state with no sessions around the given catalog client.
pub fn create_default_state<C: CatalogClient + 'static>(catalog: C) -> Arc<AppState<C>> {
    create_state(catalog, sessions::DEFAULT_IDLE_TIMEOUT)
}

/// Creates application state whose sessions expire after `idle_timeout`.
pub fn create_state<C: CatalogClient + 'static>(
    catalog: C,
    idle_timeout: Duration,
) -> Arc<AppState<C>> {
    Arc::new(AppState {
        sessions: SessionRegistry::with_idle_timeout(idle_timeout),
        catalog,
    })
}

/// Spawns a task that evicts idle sessions every `period`, which must be
/// non-zero.
pub fn spawn_session_sweeper<C: CatalogClient + 'static>(
    state: Arc<AppState<C>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let evicted = state.sessions.evict_idle().await;
            if evicted > 0 {
                tracing::debug!(evicted, "idle sessions swept");
            }
        }
    })
}
