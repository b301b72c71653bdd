//! The closed set of store commands.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogSnapshot, MenuItem};
use crate::value_objects::{CategoryId, MenuItemId};

/// A request to transition the store's state.
///
/// On the wire a command is a JSON object tagged by `type`, e.g.
/// `{"type": "REMOVE_FROM_CART", "id": "pizza"}`. Tags this build does not
/// know decode to [`StoreCommand::Unknown`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreCommand {
    /// Sets the loading flag. Leaves the error untouched.
    SetLoading { loading: bool },

    /// Sets or clears the error. A non-empty message also clears loading.
    SetError {
        #[serde(default)]
        error: Option<String>,
    },

    /// Replaces restaurant and categories after a successful load.
    SetRestaurantData(CatalogSnapshot),

    /// Selects a category for display. The id is not validated.
    SetSelectedCategory { category_id: CategoryId },

    /// Adds one unit of an item to the cart.
    AddToCart(MenuItem),

    /// Removes an item's line from the cart, if present.
    RemoveFromCart { id: MenuItemId },

    /// Sets a line's quantity. Zero or below removes the line.
    UpdateCartQuantity { id: MenuItemId, quantity: i64 },

    /// Empties the cart.
    ClearCart,

    /// Any command tag not listed above.
    #[serde(other)]
    Unknown,
}

impl StoreCommand {
    /// Returns the command type name, used for logging and metrics labels.
    pub fn command_type(&self) -> &'static str {
        match self {
            StoreCommand::SetLoading { .. } => "SetLoading",
            StoreCommand::SetError { .. } => "SetError",
            StoreCommand::SetRestaurantData(_) => "SetRestaurantData",
            StoreCommand::SetSelectedCategory { .. } => "SetSelectedCategory",
            StoreCommand::AddToCart(_) => "AddToCart",
            StoreCommand::RemoveFromCart { .. } => "RemoveFromCart",
            StoreCommand::UpdateCartQuantity { .. } => "UpdateCartQuantity",
            StoreCommand::ClearCart => "ClearCart",
            StoreCommand::Unknown => "Unknown",
        }
    }

    pub fn set_loading(loading: bool) -> Self {
        StoreCommand::SetLoading { loading }
    }

    pub fn set_error(error: Option<impl Into<String>>) -> Self {
        StoreCommand::SetError {
            error: error.map(Into::into),
        }
    }

    pub fn select_category(category_id: impl Into<CategoryId>) -> Self {
        StoreCommand::SetSelectedCategory {
            category_id: category_id.into(),
        }
    }

    pub fn remove_from_cart(id: impl Into<MenuItemId>) -> Self {
        StoreCommand::RemoveFromCart { id: id.into() }
    }

    pub fn update_quantity(id: impl Into<MenuItemId>, quantity: i64) -> Self {
        StoreCommand::UpdateCartQuantity {
            id: id.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Money;

    #[test]
    fn test_command_type_names() {
        assert_eq!(StoreCommand::ClearCart.command_type(), "ClearCart");
        assert_eq!(
            StoreCommand::update_quantity("pizza", 2).command_type(),
            "UpdateCartQuantity"
        );
        assert_eq!(StoreCommand::Unknown.command_type(), "Unknown");
    }

    #[test]
    fn test_decode_tagged_commands() {
        let cmd: StoreCommand =
            serde_json::from_str(r#"{"type":"UPDATE_CART_QUANTITY","id":"pizza","quantity":0}"#)
                .unwrap();
        assert_eq!(cmd, StoreCommand::update_quantity("pizza", 0));

        let cmd: StoreCommand = serde_json::from_str(r#"{"type":"CLEAR_CART"}"#).unwrap();
        assert_eq!(cmd, StoreCommand::ClearCart);

        let cmd: StoreCommand = serde_json::from_str(r#"{"type":"SET_ERROR"}"#).unwrap();
        assert_eq!(cmd, StoreCommand::SetError { error: None });
    }

    #[test]
    fn test_decode_add_to_cart_inlines_item() {
        let cmd: StoreCommand = serde_json::from_value(serde_json::json!({
            "type": "ADD_TO_CART",
            "id": "pizza",
            "name": "Pizza",
            "price": 900,
            "category_id": "mains"
        }))
        .unwrap();

        assert_eq!(
            cmd,
            StoreCommand::AddToCart(MenuItem::new(
                "pizza",
                "Pizza",
                Money::from_cents(900),
                "mains"
            ))
        );
    }

    #[test]
    fn test_unrecognised_tag_decodes_to_unknown() {
        let cmd: StoreCommand =
            serde_json::from_str(r#"{"type":"APPLY_COUPON","code":"HALFOFF"}"#).unwrap();
        assert_eq!(cmd, StoreCommand::Unknown);
    }
}
