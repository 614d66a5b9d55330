//! Database configuration module for `RefreshBuddy`.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`, so the
//! schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Item, Purchase, PurchaseItem};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/refresh_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back to a
/// local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the parent directory of a file-backed `SQLite` URL, since `SQLite` only
/// creates the file itself.
fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or_default();
    if file.is_empty() || file.contains(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    ensure_sqlite_dir(&database_url)?;
    info!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the items, purchases and purchase lines tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut item_table = schema.create_table_from_entity(Item);
    let mut purchase_table = schema.create_table_from_entity(Purchase);
    let mut purchase_item_table = schema.create_table_from_entity(PurchaseItem);
    item_table.if_not_exists();
    purchase_table.if_not_exists();
    purchase_item_table.if_not_exists();

    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&purchase_table)).await?;
    db.execute(builder.build(&purchase_item_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ItemModel, PurchaseItemModel, PurchaseModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ItemModel> = Item::find().limit(1).all(&db).await?;
        let _: Vec<PurchaseModel> = Purchase::find().limit(1).all(&db).await?;
        let _: Vec<PurchaseItemModel> = PurchaseItem::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_ensure_sqlite_dir_ignores_memory_and_other_backends() -> Result<()> {
        ensure_sqlite_dir("sqlite::memory:")?;
        ensure_sqlite_dir("sqlite://:memory:")?;
        ensure_sqlite_dir("postgres://localhost/refresh")?;
        Ok(())
    }

    #[test]
    fn test_ensure_sqlite_dir_creates_parent() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("refresh_buddy_{}", std::process::id()));
        let url = format!("sqlite://{}/counter.sqlite?mode=rwc", dir.display());

        ensure_sqlite_dir(&url)?;
        assert!(dir.is_dir());

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
