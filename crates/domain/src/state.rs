//! Session order state and its transition function.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::{CatalogSnapshot, Category, MenuItem, Restaurant};
use crate::command::StoreCommand;
use crate::value_objects::{CategoryId, Money};

/// Where the catalog load currently stands.
///
/// Derived from the `loading` and `error` fields; `loading` wins when both
/// are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadStatus {
    /// A load is in flight.
    Loading,

    /// The last load attempt failed and no load is in flight.
    Failed,

    /// Idle with no error.
    Settled,
}

impl LoadStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Loading => "Loading",
            LoadStatus::Failed => "Failed",
            LoadStatus::Settled => "Settled",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The aggregate root of one browsing session.
///
/// Starts empty. Changes only through [`OrderState::reduce`], which the
/// store calls for every dispatched command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    restaurant: Option<Restaurant>,
    categories: Vec<Category>,
    cart: Cart,
    selected_category: Option<CategoryId>,
    loading: bool,
    error: Option<String>,
}

// Query methods
impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selected_category(&self) -> Option<&CategoryId> {
        self.selected_category.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn load_status(&self) -> LoadStatus {
        if self.loading {
            LoadStatus::Loading
        } else if self.error.is_some() {
            LoadStatus::Failed
        } else {
            LoadStatus::Settled
        }
    }

    /// Sum of price times quantity over the cart.
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    /// Sum of quantities over the cart.
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Returns the selected category, if it exists among loaded categories.
    pub fn selected_category_entry(&self) -> Option<&Category> {
        let selected = self.selected_category.as_ref()?;
        self.categories.iter().find(|c| &c.id == selected)
    }

    /// Items of the selected category; empty when nothing valid is selected.
    pub fn selected_items(&self) -> &[MenuItem] {
        self.selected_category_entry()
            .map(|c| c.items.as_slice())
            .unwrap_or_default()
    }
}

// Transitions
impl OrderState {
    /// Returns the state that results from applying `command` to `self`.
    ///
    /// Total over all inputs: malformed values are stored as given and
    /// [`StoreCommand::Unknown`] yields an unchanged copy.
    pub fn reduce(&self, command: StoreCommand) -> Self {
        let mut next = self.clone();
        next.apply(command);
        next
    }

    pub(crate) fn apply(&mut self, command: StoreCommand) {
        match command {
            StoreCommand::SetLoading { loading } => self.loading = loading,
            StoreCommand::SetError { error } => self.apply_error(error),
            StoreCommand::SetRestaurantData(snapshot) => self.apply_restaurant_data(snapshot),
            StoreCommand::SetSelectedCategory { category_id } => {
                self.selected_category = Some(category_id);
            }
            StoreCommand::AddToCart(item) => self.cart.add(item),
            StoreCommand::RemoveFromCart { id } => self.cart.remove(&id),
            StoreCommand::UpdateCartQuantity { id, quantity } => {
                self.cart.set_quantity(&id, quantity);
            }
            StoreCommand::ClearCart => self.cart.clear(),
            StoreCommand::Unknown => {}
        }
    }

    fn apply_error(&mut self, error: Option<String>) {
        if error.as_deref().is_some_and(|msg| !msg.is_empty()) {
            self.loading = false;
        }
        self.error = error;
    }

    fn apply_restaurant_data(&mut self, snapshot: CatalogSnapshot) {
        self.selected_category = snapshot.categories.first().map(|c| c.id.clone());
        self.restaurant = Some(snapshot.restaurant);
        self.categories = snapshot.categories;
        self.loading = false;
        self.error = None;
    }
}
