//! Restaurant catalog entities.
//!
//! A catalog is always loaded as a whole ([`CatalogSnapshot`]) and never
//! mutated piecewise, which keeps the nested category/item view consistent
//! with each item's `category_id`.

use serde::{Deserialize, Serialize};

use crate::value_objects::{CategoryId, MenuItemId, Money, RestaurantId};

/// A restaurant as displayed at the top of the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Restaurant {
    /// Creates a restaurant with no logo or address.
    pub fn new(id: impl Into<RestaurantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: None,
            address: None,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// A single orderable dish or drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price. Accepted as given, including negative values.
    pub price: Money,
    #[serde(default)]
    pub image: Option<String>,
    pub category_id: CategoryId,
}

impl MenuItem {
    /// Creates a menu item with an empty description and no image.
    pub fn new(
        id: impl Into<MenuItemId>,
        name: impl Into<String>,
        price: Money,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: None,
            category_id: category_id.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A named group of menu items used for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items,
        }
    }

    /// Looks up an item of this category by id.
    pub fn item(&self, id: &MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

/// Everything one successful load produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub restaurant: Restaurant,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CatalogSnapshot {
    pub fn new(restaurant: Restaurant, categories: Vec<Category>) -> Self {
        Self {
            restaurant,
            categories,
        }
    }

    /// Iterates over every menu item across all categories, in menu order.
    pub fn menu_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}
