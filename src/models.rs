//! Domain models shared by the stores, the core logic, and the bot layer.
//!
//! These are plain data types with no persistence concerns; the database store maps
//! its entity models into them.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchasable item with its current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name, never empty
    pub name: String,
    /// Current unit price, never negative
    pub price: f64,
}

/// Validated name and price for creating or editing a catalog item.
///
/// The only way to build one is through [`NewItem::new`] or [`NewItem::parse`], so a
/// store never sees an empty name or a negative price.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    name: String,
    price: f64,
}

impl NewItem {
    /// Validates a name and an already-numeric price.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the trimmed name is empty or the price is
    /// negative, NaN or infinite.
    pub fn new(name: &str, price: f64) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Item name cannot be empty".to_string(),
            });
        }
        if !price.is_finite() || price < 0.0 {
            return Err(Error::Validation {
                message: format!("Price must be a non-negative number, got {price}"),
            });
        }
        // `abs` folds -0.0 into 0.0
        Ok(Self {
            name: name.to_string(),
            price: price.abs(),
        })
    }

    /// Validates a name and a price typed by the user.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the price does not parse as a number, or for
    /// any of the reasons listed on [`NewItem::new`].
    pub fn parse(name: &str, price: &str) -> Result<Self> {
        let trimmed = price.trim();
        let value: f64 = trimmed.parse().map_err(|_| Error::Validation {
            message: format!("Price '{trimmed}' is not a number"),
        })?;
        Self::new(name, value)
    }

    /// The trimmed item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }
}

/// One cart entry: a catalog item and how many of it the user wants.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// The item as it was when added to the cart
    pub item: CatalogItem,
    /// Always at least 1
    pub quantity: i64,
}

impl CartLine {
    /// Price × quantity for this line.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        line_subtotal(self.item.price, self.quantity)
    }
}

/// One line of a recorded purchase, snapshotted from the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    /// Catalog id of the item at the time of purchase
    pub item_id: i64,
    /// Item name at the time of purchase
    pub name: String,
    /// Unit price paid
    pub price: f64,
    /// Units bought
    pub quantity: i64,
}

impl PurchaseLine {
    /// Price × quantity for this line.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        line_subtotal(self.price, self.quantity)
    }
}

impl From<&CartLine> for PurchaseLine {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item.id,
            name: line.item.name.clone(),
            price: line.item.price,
            quantity: line.quantity,
        }
    }
}

/// A purchase that has been assembled but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    /// Snapshotted lines, never empty
    pub lines: Vec<PurchaseLine>,
    /// Sum of the line subtotals
    pub total: f64,
    /// Confirmation time
    pub purchased_at: DateTime<Utc>,
}

/// An immutable record of a completed purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Store-assigned identifier
    pub id: i64,
    /// Lines as they were at confirmation
    pub lines: Vec<PurchaseLine>,
    /// Sum of the line subtotals at confirmation
    pub total: f64,
    /// Confirmation time
    pub purchased_at: DateTime<Utc>,
}

impl Purchase {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

// Cast is safe in practice: quantities stay far below 2^53.
#[allow(clippy::cast_precision_loss)]
fn line_subtotal(price: f64, quantity: i64) -> f64 {
    price * quantity as f64
}
