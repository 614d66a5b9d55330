//! Purchase entity - The header row of a completed purchase.
//!
//! `total` is denormalized from the purchase lines and written in the same
//! database transaction as the lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase header database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Unique identifier for the purchase
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sum of price × quantity over the purchase lines
    pub total: f64,
    /// When the purchase was confirmed
    pub purchased_at: DateTimeUtc,
}

/// Defines relationships between Purchase and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One purchase has many lines
    #[sea_orm(has_many = "super::purchase_item::Entity")]
    PurchaseItems,
}

impl Related<super::purchase_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
