//! Catalog snapshot loading.

use domain::{CatalogSnapshot, RestaurantId};

use crate::client::CatalogClient;
use crate::error::ClientResult;

/// Fetches a restaurant and its menu concurrently and pairs them up.
///
/// Fails if either request fails, so a snapshot is never half loaded.
#[tracing::instrument(skip(client))]
pub async fn fetch_snapshot<C>(client: &C, id: &RestaurantId) -> ClientResult<CatalogSnapshot>
where
    C: CatalogClient + ?Sized,
{
    let (restaurant, categories) =
        tokio::try_join!(client.fetch_restaurant(id), client.fetch_menu(id))?;

    tracing::debug!(
        restaurant = %restaurant.id,
        categories = categories.len(),
        "catalog snapshot fetched"
    );

    Ok(CatalogSnapshot::new(restaurant, categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::memory::InMemoryCatalogClient;
    use domain::{Category, MenuItem, Money, Restaurant};

    #[tokio::test]
    async fn test_fetch_snapshot_combines_both_calls() {
        let snapshot = CatalogSnapshot::new(
            Restaurant::new("r1", "Taqueria"),
            vec![Category::new(
                "tacos",
                "Tacos",
                vec![MenuItem::new("pastor", "Al Pastor", Money::from_cents(350), "tacos")],
            )],
        );
        let client = InMemoryCatalogClient::with_snapshot(snapshot.clone());

        let fetched = fetch_snapshot(&client, &RestaurantId::new("r1")).await.unwrap();
        assert_eq!(fetched, snapshot);
    }

    #[tokio::test]
    async fn test_fetch_snapshot_unknown_restaurant() {
        let client = InMemoryCatalogClient::new();
        let result = fetch_snapshot(&client, &RestaurantId::new("nope")).await;
        assert!(matches!(result, Err(ClientError::NotFound(_))));
    }
}
