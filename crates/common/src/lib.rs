//! Shared identifier types for the restaurant ordering workspace.

mod types;

pub use types::SessionId;
