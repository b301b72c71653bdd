//! Access to the restaurant backend for loading catalogs.
//!
//! The order store does no I/O itself. This crate provides the collaborator
//! that fetches restaurants and menus and turns them into a
//! [`domain::CatalogSnapshot`] ready for `SetRestaurantData`.

pub mod client;
pub mod dto;
pub mod error;
pub mod http;
pub mod loader;
pub mod memory;

pub use client::{CatalogClient, RawResponse};
pub use error::{ClientError, ClientResult};
pub use http::HttpCatalogClient;
pub use loader::fetch_snapshot;
pub use memory::InMemoryCatalogClient;
pub use reqwest::Method;
