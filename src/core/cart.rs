//! Shopping cart logic.
//!
//! A cart lives only in a user's session and is never persisted. Lines keep the order
//! in which items were first added, and every line always has a quantity of at least 1.

use crate::models::{CartLine, CatalogItem};

/// The items and quantities a user intends to buy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, inserting a new line if it is not in the cart yet.
    pub fn add(&mut self, item: &CatalogItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            });
        }
    }

    /// Replaces the quantity of the line for `item_id`.
    ///
    /// A quantity of zero or less removes the line. Unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Removes the line for `item_id`, returning whether one was present.
    pub fn remove(&mut self, item_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item.id != item_id);
        self.lines.len() != before
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Quantity of `item_id` in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, item_id: i64) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.item.id == item_id)
            .map(|line| line.quantity)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::catalog_item;

    #[test]
    fn test_repeated_add_counts_calls() {
        let coffee = catalog_item(1, "Coffee", 25.0);
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(&coffee);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(1), Some(5));
    }

    #[test]
    fn test_set_quantity_zero_is_remove() {
        let coffee = catalog_item(1, "Coffee", 25.0);
        let tea = catalog_item(2, "Tea", 20.0);

        let mut via_zero = Cart::new();
        via_zero.add(&coffee);
        via_zero.add(&tea);
        via_zero.set_quantity(1, 0);

        let mut via_remove = Cart::new();
        via_remove.add(&coffee);
        via_remove.add(&tea);
        via_remove.remove(1);

        assert_eq!(via_zero, via_remove);
        assert_eq!(via_zero.quantity_of(1), None);
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add(&catalog_item(1, "Coffee", 25.0));
        cart.set_quantity(1, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_replaces_and_ignores_unknown() {
        let mut cart = Cart::new();
        cart.add(&catalog_item(1, "Coffee", 25.0));
        cart.set_quantity(1, 4);
        cart.set_quantity(99, 2);

        assert_eq!(cart.quantity_of(1), Some(4));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_total_follows_every_mutation() {
        let coffee = catalog_item(1, "Coffee", 25.0);
        let samosa = catalog_item(5, "Samosa", 15.0);
        let mut cart = Cart::new();
        assert_eq!(cart.total(), 0.0);

        cart.add(&coffee);
        cart.add(&coffee);
        cart.add(&samosa);
        assert_eq!(cart.total(), 65.0);
        assert_eq!(cart.item_count(), 3);

        cart.set_quantity(5, 3);
        assert_eq!(cart.total(), 95.0);

        cart.remove(1);
        assert_eq!(cart.total(), 45.0);

        cart.clear();
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&catalog_item(3, "Sandwich", 80.0));
        cart.add(&catalog_item(1, "Coffee", 25.0));
        cart.add(&catalog_item(3, "Sandwich", 80.0));

        let ids: Vec<i64> = cart.lines().iter().map(|line| line.item.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut cart = Cart::new();
        cart.add(&catalog_item(1, "Coffee", 25.0));
        assert!(cart.remove(1));
        assert!(!cart.remove(1));
    }
}
