//! Value objects for the catalog and cart.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Restaurant identifier as issued by the backend.
    RestaurantId
);

string_id!(
    /// Category identifier as issued by the backend.
    CategoryId
);

string_id!(
    /// Menu item identifier. Also the identity of a cart line.
    MenuItemId
);

/// Money amount in minor currency units (cents).
///
/// All cart arithmetic is integer arithmetic on cents, exact until it
/// saturates at the bounds of `i64`. Decimal prices
/// coming off the wire are converted once, with [`Money::from_decimal`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Converts a decimal amount in major units (e.g. `12.345`) to cents.
    ///
    /// Rounds to the nearest cent, midpoint away from zero.
    pub fn from_decimal(amount: Decimal) -> Result<Self, DomainError> {
        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|c| c.to_i64())
            .map(Self::from_cents)
            .ok_or(DomainError::MoneyOutOfRange { amount })
    }

    /// Returns the amount as a decimal in major units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Multiplies by a quantity, saturating at the bounds of `i64`.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_id_string_conversion() {
        let id = MenuItemId::new("burger");
        assert_eq!(id.as_str(), "burger");

        let id2: CategoryId = "mains".into();
        assert_eq!(id2.to_string(), "mains");
    }

    #[test]
    fn test_money_from_decimal_rounds_half_away_from_zero() {
        let money = Money::from_decimal(Decimal::from_str("12.345").unwrap()).unwrap();
        assert_eq!(money.cents(), 1235);

        let money = Money::from_decimal(Decimal::from_str("-0.005").unwrap()).unwrap();
        assert_eq!(money.cents(), -1);
    }

    #[test]
    fn test_money_from_decimal_whole_units() {
        let money = Money::from_decimal(Decimal::from(120)).unwrap();
        assert_eq!(money.cents(), 12_000);
    }

    #[test]
    fn test_money_from_decimal_out_of_range() {
        let result = Money::from_decimal(Decimal::MAX);
        assert!(matches!(result, Err(DomainError::MoneyOutOfRange { .. })));
    }

    #[test]
    fn test_money_to_decimal() {
        assert_eq!(
            Money::from_cents(1250).to_decimal(),
            Decimal::from_str("12.50").unwrap()
        );
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-12.34");
    }

    #[test]
    fn test_money_sum_and_multiply() {
        let total: Money = [Money::from_cents(120).multiply(2), Money::from_cents(80)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 320);
    }

    #[test]
    fn test_money_arithmetic_saturates() {
        let line = Money::from_cents(10_000_000_000).multiply(1_000_000_000);
        assert_eq!(line.cents(), i64::MAX);

        let total: Money = [line, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut debt = Money::from_cents(i64::MIN + 1);
        debt += Money::from_cents(-5);
        assert_eq!(debt.cents(), i64::MIN);
        assert_eq!(Money::from_cents(-3).multiply(u32::MAX).cents(), -3 * i64::from(u32::MAX));
    }

    #[test]
    fn test_money_serializes_as_cents() {
        assert_eq!(serde_json::to_string(&Money::from_cents(999)).unwrap(), "999");
    }
}
