//! In-memory store.
//!
//! Holds the catalog and the purchase history behind a single async lock. Data lives
//! as long as the process; this is the backend selected with `STORE_BACKEND=memory`.

use crate::{
    errors::{Error, Result},
    models::{CatalogItem, NewItem, NewPurchase, Purchase},
    store::{CatalogStore, PurchaseStore},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

#[derive(Debug, Default)]
struct MemoryState {
    items: BTreeMap<i64, CatalogItem>,
    purchases: Vec<Purchase>,
    last_item_id: i64,
    last_purchase_id: i64,
}

/// Catalog and purchase store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_items(&self) -> Result<Vec<CatalogItem>> {
        let state = self.state.read().await;
        let mut items: Vec<CatalogItem> = state.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn create_item(&self, item: &NewItem) -> Result<CatalogItem> {
        let mut state = self.state.write().await;
        state.last_item_id += 1;
        let created = CatalogItem {
            id: state.last_item_id,
            name: item.name().to_string(),
            price: item.price(),
        };
        state.items.insert(created.id, created.clone());
        info!("Added item '{}' (ID: {})", created.name, created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn update_item(&self, id: i64, item: &NewItem) -> Result<CatalogItem> {
        let mut state = self.state.write().await;
        let existing = state
            .items
            .get_mut(&id)
            .ok_or(Error::ItemNotFound { id })?;
        existing.name = item.name().to_string();
        existing.price = item.price();
        info!("Updated item {id} to '{}' at {}", existing.name, existing.price);
        Ok(existing.clone())
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let removed = state.items.remove(&id).ok_or(Error::ItemNotFound { id })?;
        info!("Deleted item '{}' (ID: {id})", removed.name);
        Ok(())
    }
}

#[async_trait]
impl PurchaseStore for MemoryStore {
    #[instrument(skip(self, purchase), fields(lines = purchase.lines.len(), total = purchase.total))]
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<Purchase> {
        let mut state = self.state.write().await;
        state.last_purchase_id += 1;
        let recorded = Purchase {
            id: state.last_purchase_id,
            lines: purchase.lines.clone(),
            total: purchase.total,
            purchased_at: purchase.purchased_at,
        };
        state.purchases.push(recorded.clone());
        info!("Recorded purchase {}", recorded.id);
        Ok(recorded)
    }

    async fn list_purchases(&self) -> Result<Vec<Purchase>> {
        let state = self.state.read().await;
        debug!("Listing {} purchases", state.purchases.len());
        Ok(state.purchases.clone())
    }
}
