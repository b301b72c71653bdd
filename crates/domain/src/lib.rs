//! Order/cart state store for a restaurant ordering session.
//!
//! This crate provides:
//! - Catalog entities ([`Restaurant`], [`Category`], [`MenuItem`]) and [`Money`]
//! - The [`Cart`] with one line per menu item
//! - [`OrderState`] and its pure transition function
//! - The closed [`StoreCommand`] set
//! - [`OrderStore`], the single-writer holder that publishes each new state

pub mod cart;
pub mod catalog;
pub mod command;
pub mod error;
pub mod state;
pub mod store;
pub mod value_objects;

pub use cart::{Cart, CartLine, CartSummary};
pub use catalog::{CatalogSnapshot, Category, MenuItem, Restaurant};
pub use command::StoreCommand;
pub use error::DomainError;
pub use state::{LoadStatus, OrderState};
pub use store::{LoadToken, OrderStore};
pub use value_objects::{CategoryId, MenuItemId, Money, RestaurantId};
