//! The cart: an insertion-ordered set of lines, one per menu item.

use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;
use crate::value_objects::{MenuItemId, Money};

/// One distinct menu item plus its requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,

    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Returns the menu item id this line is keyed by.
    pub fn id(&self) -> &MenuItemId {
        &self.item.id
    }

    /// Returns price times quantity.
    pub fn line_total(&self) -> Money {
        self.item.price.multiply(self.quantity)
    }
}

/// Lines in the order each item was first added.
///
/// Mutation is crate-private; outside code changes a cart only by
/// dispatching commands to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.lines.clone(),
            item_count: self.item_count(),
            total: self.total(),
        }
    }

    pub(crate) fn add(&mut self, item: MenuItem) {
        match self.lines.iter_mut().find(|line| line.id() == &item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine { item, quantity: 1 }),
        }
    }

    pub(crate) fn remove(&mut self, id: &MenuItemId) {
        self.lines.retain(|line| line.id() != id);
    }

    /// Absolute set. Zero or below removes the line.
    pub(crate) fn set_quantity(&mut self, id: &MenuItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Read-only totals view of a cart, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub total: Money,
}
