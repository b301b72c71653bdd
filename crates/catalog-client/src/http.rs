//! reqwest-backed catalog client.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Category, Restaurant, RestaurantId};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::client::{CatalogClient, RawResponse};
use crate::dto::{CategoryDto, RestaurantDto, categories_from_wire};
use crate::error::{ClientError, ClientResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body the backend sends with non-2xx responses.
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(alias = "error")]
    message: String,
}

/// Catalog client talking JSON over HTTP.
///
/// Endpoints, relative to the base URL:
/// - `GET restaurants/{id}`
/// - `GET restaurants/{id}/menu`
/// - `GET health`
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Joins a raw path (which may carry a query string) onto the base URL.
    fn raw_endpoint(&self, path: &str) -> ClientResult<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{joined}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.message)
                .unwrap_or(text);

            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(message)
                }
                _ => ClientError::Internal(format!("{status}: {message}")),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_restaurant(&self, id: &RestaurantId) -> ClientResult<Restaurant> {
        metrics::counter!("catalog_requests_total", "operation" => "fetch_restaurant").increment(1);
        let url = self.endpoint(&["restaurants", id.as_str()])?;
        let dto: RestaurantDto = self.get_json(url).await?;
        Ok(dto.into())
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_menu(&self, id: &RestaurantId) -> ClientResult<Vec<Category>> {
        metrics::counter!("catalog_requests_total", "operation" => "fetch_menu").increment(1);
        let url = self.endpoint(&["restaurants", id.as_str(), "menu"])?;
        let menu: Vec<CategoryDto> = self.get_json(url).await?;
        Ok(categories_from_wire(menu)?)
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn health(&self) -> ClientResult<()> {
        metrics::counter!("catalog_requests_total", "operation" => "health").increment(1);
        let url = self.endpoint(&["health"])?;
        let response = self.client.get(url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Internal(format!(
                "health check returned {}",
                response.status()
            )))
        }
    }

    #[tracing::instrument(skip(self, body), fields(base_url = %self.base_url))]
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<RawResponse> {
        metrics::counter!("catalog_requests_total", "operation" => "request").increment(1);
        let url = self.raw_endpoint(path)?;

        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, "backend request finished");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_encoded_segments() {
        let client = HttpCatalogClient::new("http://localhost:8080/api/").unwrap();
        let url = client.endpoint(&["restaurants", "a b/c", "menu"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/restaurants/a%20b%2Fc/menu"
        );
    }

    #[test]
    fn test_raw_endpoint_keeps_query() {
        let client = HttpCatalogClient::new("http://localhost:8080/api").unwrap();
        let url = client.raw_endpoint("/orders?status=open").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/orders?status=open");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpCatalogClient::new("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
