//! Purchase item entity - One line of a completed purchase.
//!
//! Name and price are copied from the catalog when the purchase is recorded, so later
//! edits or deletions of the item never change what a report shows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_items")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the purchase this line belongs to
    pub purchase_id: i64,
    /// ID of the catalog item at the time of purchase
    pub item_id: i64,
    /// Item name at the time of purchase
    pub name: String,
    /// Unit price paid
    pub price: f64,
    /// Number of units bought
    pub quantity: i64,
}

/// Defines relationships between `PurchaseItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one purchase
    #[sea_orm(
        belongs_to = "super::purchase::Entity",
        from = "Column::PurchaseId",
        to = "super::purchase::Column::Id"
    )]
    Purchase,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
