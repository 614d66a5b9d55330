//! Shared test utilities for `RefreshBuddy`.
//!
//! This module provides common helper functions for setting up test stores and
//! building test values with sensible defaults, plus two store doubles for the
//! failure and in-flight paths.

use crate::{
    config::catalog::ItemConfig,
    core::catalog,
    errors::{Error, Result},
    models::{CatalogItem, NewItem, NewPurchase, Purchase},
    store::{CatalogStore, DatabaseStore, MemoryStore, PurchaseStore},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a [`DatabaseStore`] over a fresh in-memory `SQLite` database.
pub async fn setup_database_store() -> Result<DatabaseStore> {
    Ok(DatabaseStore::new(setup_test_db().await?))
}

/// The catalog the counter ships with.
pub fn seed_items() -> Vec<ItemConfig> {
    [
        ("Coffee", 25.0),
        ("Tea", 20.0),
        ("Sandwich", 80.0),
        ("Cookies", 30.0),
        ("Samosa", 15.0),
        ("Biscuits", 10.0),
        ("Chips", 20.0),
        ("Cold Drink", 25.0),
    ]
    .into_iter()
    .map(|(name, price)| ItemConfig {
        name: name.to_string(),
        price,
    })
    .collect()
}

/// Creates a [`MemoryStore`] holding the seed catalog.
pub async fn setup_seeded_memory_store() -> Result<MemoryStore> {
    let store = MemoryStore::new();
    catalog::seed_catalog(&store, &seed_items()).await?;
    Ok(store)
}

/// Builds a catalog item without going through a store.
pub fn catalog_item(id: i64, name: &str, price: f64) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        price,
    }
}

/// Shorthand for a calendar date.
///
/// # Panics
/// Panics if the date does not exist.
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A fixed "today" so session tests do not depend on the clock.
pub fn today() -> NaiveDate {
    date(2024, 1, 1)
}

/// A single-line purchase with the given id, RFC 3339 timestamp and total.
///
/// # Panics
/// Panics if the timestamp is not valid RFC 3339.
#[allow(clippy::expect_used)]
pub fn purchase_on(id: i64, timestamp: &str, total: f64) -> Purchase {
    let purchased_at: DateTime<Utc> = DateTime::parse_from_rfc3339(timestamp)
        .expect("valid test timestamp")
        .with_timezone(&Utc);
    Purchase {
        id,
        lines: vec![crate::models::PurchaseLine {
            item_id: 1,
            name: "Coffee".to_string(),
            price: total,
            quantity: 1,
        }],
        total,
        purchased_at,
    }
}

/// Store whose every call fails with a persistence error.
#[derive(Debug, Default)]
pub struct FailingStore {
    calls: AtomicUsize,
}

impl FailingStore {
    /// Creates the store.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many store calls were attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Persistence {
            message: "store unavailable".to_string(),
        })
    }
}

#[async_trait]
impl CatalogStore for FailingStore {
    async fn list_items(&self) -> Result<Vec<CatalogItem>> {
        self.fail()
    }

    async fn create_item(&self, _item: &NewItem) -> Result<CatalogItem> {
        self.fail()
    }

    async fn update_item(&self, _id: i64, _item: &NewItem) -> Result<CatalogItem> {
        self.fail()
    }

    async fn delete_item(&self, _id: i64) -> Result<()> {
        self.fail()
    }
}

#[async_trait]
impl PurchaseStore for FailingStore {
    async fn record_purchase(&self, _purchase: &NewPurchase) -> Result<Purchase> {
        self.fail()
    }

    async fn list_purchases(&self) -> Result<Vec<Purchase>> {
        self.fail()
    }
}

/// Purchase store that holds every `record_purchase` call until [`GatedStore::release`].
#[derive(Debug, Default)]
pub struct GatedStore {
    inner: MemoryStore,
    started: Notify,
    gate: Notify,
    recorded: AtomicUsize,
}

impl GatedStore {
    /// Creates the store with the gate closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until a `record_purchase` call is parked at the gate.
    pub async fn wait_until_recording(&self) {
        self.started.notified().await;
    }

    /// Lets one parked `record_purchase` call through.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Number of purchases actually recorded.
    pub fn recorded(&self) -> usize {
        self.recorded.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PurchaseStore for GatedStore {
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<Purchase> {
        self.started.notify_one();
        self.gate.notified().await;
        let recorded = self.inner.record_purchase(purchase).await?;
        self.recorded.fetch_add(1, Ordering::SeqCst);
        Ok(recorded)
    }

    async fn list_purchases(&self) -> Result<Vec<Purchase>> {
        self.inner.list_purchases().await
    }
}
