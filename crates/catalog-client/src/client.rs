//! The catalog client trait.

use async_trait::async_trait;
use domain::{Category, Restaurant, RestaurantId};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::ClientResult;

/// Status and body of a generic backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Backend operations the application needs around the order store.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches a restaurant's display details.
    async fn fetch_restaurant(&self, id: &RestaurantId) -> ClientResult<Restaurant>;

    /// Fetches a restaurant's menu as ordered categories with nested items.
    async fn fetch_menu(&self, id: &RestaurantId) -> ClientResult<Vec<Category>>;

    /// Succeeds if the backend reports itself healthy.
    async fn health(&self) -> ClientResult<()>;

    /// Issues an arbitrary request relative to the backend base URL.
    ///
    /// Non-2xx statuses are returned, not turned into errors.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<RawResponse>;
}
