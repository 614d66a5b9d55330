//! `SeaORM`-backed store.
//!
//! Items are soft deleted, purchase headers and lines are written inside one database
//! transaction, and lines carry their own copy of the item name and price.

use crate::{
    entities::{Item, Purchase as PurchaseEntity, PurchaseItem, item, purchase, purchase_item},
    errors::{Error, Result},
    models::{CatalogItem, NewItem, NewPurchase, Purchase, PurchaseLine},
    store::{CatalogStore, PurchaseStore},
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Store that persists the catalog and purchases through a `SeaORM` connection.
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    /// Wraps an open connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Fetches an item that exists and has not been soft deleted.
    async fn find_active_item(&self, id: i64) -> Result<item::Model> {
        Item::find_by_id(id)
            .one(&self.db)
            .await?
            .filter(|found| !found.is_deleted)
            .ok_or(Error::ItemNotFound { id })
    }
}

impl From<item::Model> for CatalogItem {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

impl From<purchase_item::Model> for PurchaseLine {
    fn from(model: purchase_item::Model) -> Self {
        Self {
            item_id: model.item_id,
            name: model.name,
            price: model.price,
            quantity: model.quantity,
        }
    }
}

fn into_purchase(header: purchase::Model, lines: Vec<purchase_item::Model>) -> Purchase {
    Purchase {
        id: header.id,
        lines: lines.into_iter().map(PurchaseLine::from).collect(),
        total: header.total,
        purchased_at: header.purchased_at,
    }
}

#[async_trait]
impl CatalogStore for DatabaseStore {
    async fn list_items(&self) -> Result<Vec<CatalogItem>> {
        let items = Item::find()
            .filter(item::Column::IsDeleted.eq(false))
            .order_by_asc(item::Column::Name)
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await?;
        Ok(items.into_iter().map(CatalogItem::from).collect())
    }

    #[instrument(skip(self))]
    async fn create_item(&self, new_item: &NewItem) -> Result<CatalogItem> {
        let now = chrono::Utc::now().naive_utc();

        let model = item::ActiveModel {
            name: Set(new_item.name().to_string()),
            price: Set(new_item.price()),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Added item '{}' (ID: {})", model.name, model.id);
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn update_item(&self, id: i64, new_item: &NewItem) -> Result<CatalogItem> {
        let mut active: item::ActiveModel = self.find_active_item(id).await?.into();

        active.name = Set(new_item.name().to_string());
        active.price = Set(new_item.price());
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let model = active.update(&self.db).await?;
        info!("Updated item {id} to '{}' at {}", model.name, model.price);
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: i64) -> Result<()> {
        let mut active: item::ActiveModel = self.find_active_item(id).await?.into();

        active.is_deleted = Set(true);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(&self.db).await?;

        info!("Deleted item {id}");
        Ok(())
    }
}

#[async_trait]
impl PurchaseStore for DatabaseStore {
    #[instrument(skip(self, new_purchase), fields(lines = new_purchase.lines.len(), total = new_purchase.total))]
    async fn record_purchase(&self, new_purchase: &NewPurchase) -> Result<Purchase> {
        // Header and lines commit together; dropping `txn` on error rolls back.
        let txn = self.db.begin().await?;

        let header = purchase::ActiveModel {
            total: Set(new_purchase.total),
            purchased_at: Set(new_purchase.purchased_at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut lines = Vec::with_capacity(new_purchase.lines.len());
        for line in &new_purchase.lines {
            let stored = purchase_item::ActiveModel {
                purchase_id: Set(header.id),
                item_id: Set(line.item_id),
                name: Set(line.name.clone()),
                price: Set(line.price),
                quantity: Set(line.quantity),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            lines.push(stored);
        }

        txn.commit().await?;

        info!("Recorded purchase {} with {} lines", header.id, lines.len());
        Ok(into_purchase(header, lines))
    }

    async fn list_purchases(&self) -> Result<Vec<Purchase>> {
        let rows = PurchaseEntity::find()
            .order_by_asc(purchase::Column::PurchasedAt)
            .order_by_asc(purchase::Column::Id)
            .find_with_related(PurchaseItem)
            .all(&self.db)
            .await?;

        debug!("Loaded {} purchases", rows.len());
        Ok(rows
            .into_iter()
            .map(|(header, lines)| into_purchase(header, lines))
            .collect())
    }
}
