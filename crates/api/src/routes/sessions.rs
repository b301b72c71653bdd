//! Session, command, load and checkout endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog_client::{CatalogClient, Method, fetch_snapshot};
use common::SessionId;
use domain::{
    CartLine, CartSummary, Category, CategoryId, LoadStatus, OrderState, OrderStore, Restaurant,
    RestaurantId, StoreCommand,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::sessions::{SessionRegistry, SharedStore};

/// Shared application state accessible from all handlers.
pub struct AppState<C: CatalogClient> {
    pub sessions: SessionRegistry,
    pub catalog: C,
}

// -- Response types --

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
}

#[derive(Serialize)]
pub struct SessionStateResponse {
    pub session_id: String,
    pub restaurant: Option<Restaurant>,
    pub categories: Vec<Category>,
    pub cart: Vec<CartLine>,
    pub selected_category: Option<CategoryId>,
    pub loading: bool,
    pub error: Option<String>,
    pub load_status: LoadStatus,
    pub cart_total_cents: i64,
    pub cart_item_count: u64,
}

impl SessionStateResponse {
    fn from_state(session_id: SessionId, state: &OrderState) -> Self {
        Self {
            session_id: session_id.to_string(),
            restaurant: state.restaurant().cloned(),
            categories: state.categories().to_vec(),
            cart: state.cart().lines().to_vec(),
            selected_category: state.selected_category().cloned(),
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            load_status: state.load_status(),
            cart_total_cents: state.cart_total().cents(),
            cart_item_count: state.cart_item_count(),
        }
    }

    fn from_store(store: &OrderStore) -> Self {
        Self::from_state(store.session_id(), store.state())
    }
}

#[derive(Serialize)]
pub struct LoadResponse {
    /// False when a newer load for the same session overtook this one.
    pub applied: bool,
    #[serde(flatten)]
    pub state: SessionStateResponse,
}

#[derive(Serialize)]
struct CheckoutLine<'a> {
    id: &'a str,
    name: &'a str,
    quantity: u32,
    unit_price_cents: i64,
}

#[derive(Serialize)]
struct CheckoutRequest<'a> {
    session_id: String,
    restaurant_id: &'a str,
    lines: Vec<CheckoutLine<'a>>,
    item_count: u64,
    total_cents: i64,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub backend_status: u16,
    pub backend_response: serde_json::Value,
}

// -- Handlers --

/// POST /sessions — start a session with an empty store.
#[tracing::instrument(skip(state))]
pub async fn create<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id: session_id.to_string(),
        }),
    )
}

/// GET /sessions/:id — current state plus derived totals.
#[tracing::instrument(skip(state))]
pub async fn get<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStateResponse>, ApiError> {
    let store = find_store(&state.sessions, &id).await?;
    let store = store.lock().await;
    Ok(Json(SessionStateResponse::from_store(&store)))
}

/// DELETE /sessions/:id — end a session and drop its state.
#[tracing::instrument(skip(state))]
pub async fn delete<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(&id)?;
    if state.sessions.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /sessions/:id/commands — dispatch one store command.
#[tracing::instrument(skip(state, command))]
pub async fn dispatch<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
    Json(command): Json<StoreCommand>,
) -> Result<Json<SessionStateResponse>, ApiError> {
    let store = find_store(&state.sessions, &id).await?;
    let mut store = store.lock().await;
    store.dispatch(command);
    Ok(Json(SessionStateResponse::from_store(&store)))
}

/// GET /sessions/:id/cart — cart lines with totals.
#[tracing::instrument(skip(state))]
pub async fn cart<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
) -> Result<Json<CartSummary>, ApiError> {
    let store = find_store(&state.sessions, &id).await?;
    let store = store.lock().await;
    Ok(Json(store.state().cart().summary()))
}

/// POST /sessions/:id/load/:restaurant_id — fetch a catalog into the store.
///
/// Load failures land in the state's error field rather than the HTTP status.
/// The session lock is released while the backend is being called.
#[tracing::instrument(skip(state))]
pub async fn load<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path((id, restaurant_id)): Path<(String, String)>,
) -> Result<Json<LoadResponse>, ApiError> {
    let store = find_store(&state.sessions, &id).await?;
    let token = store.lock().await.begin_load();

    let restaurant_id = RestaurantId::new(restaurant_id);
    let outcome = fetch_snapshot(&state.catalog, &restaurant_id)
        .await
        .map_err(|err| {
            tracing::warn!(restaurant = %restaurant_id, error = %err, "catalog load failed");
            err.to_string()
        });

    let mut store = store.lock().await;
    let applied = store.complete_load(token, outcome);
    Ok(Json(LoadResponse {
        applied,
        state: SessionStateResponse::from_store(&store),
    }))
}

/// POST /sessions/:id/checkout — forward the cart to the backend as an order.
///
/// On success the cart is cleared. The session stays locked for the whole
/// exchange so the submitted cart is the one that gets cleared.
#[tracing::instrument(skip(state))]
pub async fn checkout<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let store = find_store(&state.sessions, &id).await?;
    let mut store = store.lock().await;

    let body = {
        let order = checkout_request(&store)?;
        serde_json::to_value(order).map_err(catalog_client::ClientError::from)?
    };

    let response = state
        .catalog
        .request(Method::POST, "orders", Some(body))
        .await?;

    if !response.is_success() {
        return Err(ApiError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    store.dispatch(StoreCommand::ClearCart);
    metrics::counter!("orders_submitted_total").increment(1);

    let backend_response = serde_json::from_str(&response.body)
        .unwrap_or(serde_json::Value::String(response.body));

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            backend_status: response.status,
            backend_response,
        }),
    ))
}

fn checkout_request(store: &OrderStore) -> Result<CheckoutRequest<'_>, ApiError> {
    let state = store.state();
    let restaurant = state
        .restaurant()
        .ok_or_else(|| ApiError::BadRequest("No restaurant loaded".to_string()))?;

    if state.cart().is_empty() {
        return Err(ApiError::BadRequest("Cart is empty".to_string()));
    }

    let lines = state
        .cart()
        .lines()
        .iter()
        .map(|line| CheckoutLine {
            id: line.id().as_str(),
            name: &line.item.name,
            quantity: line.quantity,
            unit_price_cents: line.item.price.cents(),
        })
        .collect();

    Ok(CheckoutRequest {
        session_id: store.session_id().to_string(),
        restaurant_id: restaurant.id.as_str(),
        lines,
        item_count: state.cart_item_count(),
        total_cents: state.cart_total().cents(),
    })
}

// -- Helpers --

fn parse_session_id(id: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(id).map_err(|e| ApiError::BadRequest(format!("Invalid session id: {e}")))
}

async fn find_store(sessions: &SessionRegistry, id: &str) -> Result<SharedStore, ApiError> {
    let session_id = parse_session_id(id)?;
    sessions
        .get(session_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session {id} not found")))
}
