//! Domain error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building domain values.
///
/// Store commands never fail; these only surface when converting raw input
/// into domain types.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A decimal amount does not fit in cents.
    #[error("Amount out of range: {amount}")]
    MoneyOutOfRange { amount: Decimal },
}
