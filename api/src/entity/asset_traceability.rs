use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TraceabilityKind;

/// One lifecycle event; `asset_id` becomes null once the asset is deleted
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_traceability")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_id: Option<i32>,
    pub asset_label: String,
    pub kind: TraceabilityKind,
    pub user_id: Option<i32>,
    pub username: String,
    pub zone_from: Option<String>,
    pub zone_to: Option<String>,
    pub status_before: Option<String>,
    pub status_after: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
