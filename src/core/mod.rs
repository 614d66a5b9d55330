//! Core business logic - framework-agnostic catalog, cart, checkout, reporting and
//! session operations.

/// Shopping cart held in a user's session
pub mod cart;
/// Catalog management on top of a [`crate::store::CatalogStore`]
pub mod catalog;
/// Turning a cart into a recorded purchase
pub mod checkout;
/// Daily sales reports and amount formatting
pub mod report;
/// Per-user view state
pub mod session;
