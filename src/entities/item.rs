//! Item entity - Represents a purchasable catalog item.
//!
//! Items are soft deleted so that the rows referenced by historical purchase lines
//! stay in place; deleted items never appear in the catalog again.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Coffee", "Samosa")
    pub name: String,
    /// Current unit price
    pub price: f64,
    /// Soft delete flag - if true, the item is hidden from the catalog
    pub is_deleted: bool,
    /// When the item was created
    pub created_at: DateTime,
    /// When the item was last modified
    pub updated_at: DateTime,
}

/// Items have no outgoing relations; purchase lines carry their own snapshot.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
