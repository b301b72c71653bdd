//! Wire shapes returned by the restaurant backend.
//!
//! Prices arrive as decimals in major units and ids as either strings or
//! integers. Both are normalised here so the domain only sees cents and
//! string ids.

use domain::{Category, CategoryId, DomainError, MenuItem, Money, Restaurant};
use rust_decimal::Decimal;
use serde::Deserialize;

/// An id that the backend may encode as a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantDto {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<RestaurantDto> for Restaurant {
    fn from(dto: RestaurantDto) -> Self {
        Restaurant {
            id: String::from(dto.id).into(),
            name: dto.name,
            logo: dto.logo,
            address: dto.address,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemDto {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<WireId>,
}

impl MenuItemDto {
    /// Converts to a domain item. A missing `category_id` is taken from the
    /// enclosing category.
    pub fn into_menu_item(self, enclosing: &CategoryId) -> Result<MenuItem, DomainError> {
        let category_id = self
            .category_id
            .map(|id| CategoryId::new(String::from(id)))
            .unwrap_or_else(|| enclosing.clone());

        Ok(MenuItem {
            id: String::from(self.id).into(),
            name: self.name,
            description: self.description.unwrap_or_default(),
            price: Money::from_decimal(self.price)?,
            image: self.image,
            category_id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDto {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItemDto>,
}

impl TryFrom<CategoryDto> for Category {
    type Error = DomainError;

    fn try_from(dto: CategoryDto) -> Result<Self, Self::Error> {
        let id = CategoryId::new(String::from(dto.id));
        let items = dto
            .items
            .into_iter()
            .map(|item| item.into_menu_item(&id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Category {
            id,
            name: dto.name,
            items,
        })
    }
}

/// Converts a whole menu payload, failing on the first bad price.
pub fn categories_from_wire(menu: Vec<CategoryDto>) -> Result<Vec<Category>, DomainError> {
    menu.into_iter().map(Category::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_accepts_numeric_id() {
        let dto: RestaurantDto =
            serde_json::from_str(r#"{"id": 42, "name": "Noodle Bar"}"#).unwrap();
        let restaurant = Restaurant::from(dto);

        assert_eq!(restaurant.id.as_str(), "42");
        assert!(restaurant.logo.is_none());
    }

    #[test]
    fn test_menu_prices_become_cents() {
        let menu: Vec<CategoryDto> = serde_json::from_value(serde_json::json!([
            {
                "id": "drinks",
                "name": "Drinks",
                "items": [
                    { "id": 1, "name": "Lemonade", "price": 3.5 },
                    { "id": 2, "name": "Espresso", "price": "2.25", "category_id": "coffee" }
                ]
            }
        ]))
        .unwrap();

        let categories = categories_from_wire(menu).unwrap();
        let items = &categories[0].items;

        assert_eq!(items[0].price.cents(), 350);
        assert_eq!(items[0].category_id.as_str(), "drinks");
        assert_eq!(items[1].price.cents(), 225);
        assert_eq!(items[1].category_id.as_str(), "coffee");
        assert_eq!(items[1].id.as_str(), "2");
    }

    #[test]
    fn test_category_without_items() {
        let menu: Vec<CategoryDto> =
            serde_json::from_str(r#"[{"id": "specials", "name": "Specials"}]"#).unwrap();
        let categories = categories_from_wire(menu).unwrap();

        assert!(categories[0].items.is_empty());
    }
}
