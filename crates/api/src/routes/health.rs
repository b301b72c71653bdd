//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog_client::CatalogClient;
use serde::Serialize;

use super::sessions::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog: &'static str,
}

/// GET /health — returns service health and whether the catalog backend answers.
pub async fn check<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Json<HealthResponse> {
    let catalog = match state.catalog.health().await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, "catalog backend health check failed");
            "unavailable"
        }
    };

    Json(HealthResponse {
        status: "ok",
        catalog,
    })
}
