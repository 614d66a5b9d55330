//! Persistence adapters.
//!
//! The rest of the crate talks to storage only through [`CatalogStore`] and
//! [`PurchaseStore`]. Two implementations exist: [`MemoryStore`] keeps everything in
//! process memory, [`DatabaseStore`] persists through `SeaORM`. The bot receives one of
//! them as an `Arc<dyn Store>` chosen at startup.

use crate::{
    errors::Result,
    models::{CatalogItem, NewItem, NewPurchase, Purchase},
};
use async_trait::async_trait;

/// `SeaORM`-backed store
pub mod database;
/// In-process store
pub mod memory;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

/// Catalog persistence contract.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Lists all active items, ordered by name.
    async fn list_items(&self) -> Result<Vec<CatalogItem>>;

    /// Creates a new item and returns it with its assigned id.
    async fn create_item(&self, item: &NewItem) -> Result<CatalogItem>;

    /// Replaces the name and price of an existing item.
    ///
    /// Fails with `ItemNotFound` if the id is unknown or deleted.
    async fn update_item(&self, id: i64, item: &NewItem) -> Result<CatalogItem>;

    /// Removes an item from the catalog.
    ///
    /// Fails with `ItemNotFound` if the id is unknown or already deleted.
    async fn delete_item(&self, id: i64) -> Result<()>;
}

/// Purchase persistence contract.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Stores a purchase header and all of its lines atomically.
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<Purchase>;

    /// Lists every recorded purchase, oldest first.
    async fn list_purchases(&self) -> Result<Vec<Purchase>>;
}

/// Everything the application needs from storage.
pub trait Store: CatalogStore + PurchaseStore {}

impl<T: CatalogStore + PurchaseStore> Store for T {}
