//! In-memory catalog client for tests and offline runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{CatalogSnapshot, Category, Restaurant, RestaurantId};
use reqwest::Method;

use crate::client::{CatalogClient, RawResponse};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    catalogs: HashMap<RestaurantId, CatalogSnapshot>,
    unavailable: bool,
    reject_orders: bool,
    requests: Vec<(Method, String)>,
    orders: Vec<serde_json::Value>,
}

/// Catalog client serving snapshots from memory.
///
/// Raw `GET` requests to `health`, `restaurants/{id}` and
/// `restaurants/{id}/menu` are answered with the domain JSON of the stored
/// snapshot. `POST orders` records the body and answers 201 with a
/// sequential order id. Anything else gets a 404.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogClient {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client already holding one restaurant's catalog.
    pub fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        let client = Self::new();
        client.insert(snapshot);
        client
    }

    /// Adds or replaces a restaurant's catalog.
    pub fn insert(&self, snapshot: CatalogSnapshot) {
        self.state
            .write()
            .unwrap()
            .catalogs
            .insert(snapshot.restaurant.id.clone(), snapshot);
    }

    /// Makes every call fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }

    /// Makes `POST orders` answer 422.
    pub fn set_reject_orders(&self, reject: bool) {
        self.state.write().unwrap().reject_orders = reject;
    }

    /// Returns the order bodies accepted so far.
    pub fn orders(&self) -> Vec<serde_json::Value> {
        self.state.read().unwrap().orders.clone()
    }

    /// Returns the raw requests issued so far.
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.state.read().unwrap().requests.clone()
    }

    fn accept_order(&self, body: Option<serde_json::Value>) -> ClientResult<serde_json::Value> {
        let mut state = self.state.write().unwrap();
        if state.unavailable {
            return Err(ClientError::Internal("catalog backend unavailable".to_string()));
        }
        if state.reject_orders {
            return Err(ClientError::Validation("order rejected".to_string()));
        }

        state.orders.push(body.unwrap_or(serde_json::Value::Null));
        let order_id = format!("ORD-{:04}", state.orders.len());
        Ok(serde_json::json!({ "order_id": order_id }))
    }

    fn catalog(&self, id: &RestaurantId) -> ClientResult<CatalogSnapshot> {
        let state = self.state.read().unwrap();
        if state.unavailable {
            return Err(ClientError::Internal("catalog backend unavailable".to_string()));
        }
        state
            .catalogs
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("restaurant {id}")))
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalogClient {
    async fn fetch_restaurant(&self, id: &RestaurantId) -> ClientResult<Restaurant> {
        Ok(self.catalog(id)?.restaurant)
    }

    async fn fetch_menu(&self, id: &RestaurantId) -> ClientResult<Vec<Category>> {
        Ok(self.catalog(id)?.categories)
    }

    async fn health(&self) -> ClientResult<()> {
        if self.state.read().unwrap().unavailable {
            return Err(ClientError::Internal("catalog backend unavailable".to_string()));
        }
        Ok(())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<RawResponse> {
        self.state
            .write()
            .unwrap()
            .requests
            .push((method.clone(), path.to_string()));

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let payload = match (method, segments.as_slice()) {
            (Method::GET, ["health"]) => self
                .health()
                .await
                .map(|()| (200, serde_json::json!({ "status": "ok" }))),
            (Method::GET, ["restaurants", id]) => self
                .catalog(&RestaurantId::new(*id))
                .map(|c| (200, serde_json::json!(c.restaurant))),
            (Method::GET, ["restaurants", id, "menu"]) => self
                .catalog(&RestaurantId::new(*id))
                .map(|c| (200, serde_json::json!(c.categories))),
            (Method::POST, ["orders"]) => self.accept_order(body).map(|order| (201, order)),
            _ => Err(ClientError::NotFound(path.to_string())),
        };

        Ok(match payload {
            Ok((status, value)) => RawResponse {
                status,
                body: value.to_string(),
            },
            Err(ClientError::Validation(msg)) => RawResponse {
                status: 422,
                body: serde_json::json!({ "error": msg }).to_string(),
            },
            Err(ClientError::NotFound(what)) => RawResponse {
                status: 404,
                body: serde_json::json!({ "error": format!("Not found: {what}") }).to_string(),
            },
            Err(e) => RawResponse {
                status: 503,
                body: serde_json::json!({ "error": e.to_string() }).to_string(),
            },
        })
    }
}
