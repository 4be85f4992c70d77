use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AssetStatus, Position};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    // Device identifiers
    pub imei1: Option<String>,
    pub imei2: Option<String>,
    pub serial_number: Option<String>,
    pub mac_address: Option<String>,
    pub iccid: Option<String>,
    pub carrier: Option<String>,
    // Assignment
    pub document: Option<String>,
    pub holder_name: Option<String>,
    pub position: Position,
    pub responsible: Option<String>,
    pub identification: Option<String>,
    // Classification
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub status: AssetStatus,
    // Location and cost center
    pub zone: String,
    #[sea_orm(column_type = "Text")]
    pub observation: String,
    pub point_of_sale: Option<String>,
    pub cost_center_code: Option<String>,
    pub cost_center_name: Option<String>,
    pub warehouse_exit_date: Option<chrono::NaiveDate>,
    pub confirmed_on: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Model {
    /// Short human label kept on traceability rows after the asset is gone
    pub fn label(&self) -> String {
        match self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => format!("Asset {} - {}", self.id, name),
            None => format!("Asset {}", self.id),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Categories,
    #[sea_orm(
        belongs_to = "super::brands::Entity",
        from = "Column::BrandId",
        to = "super::brands::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Brands,
    #[sea_orm(has_many = "super::asset_history::Entity")]
    AssetHistory,
}

impl Related<super::asset_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssetHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
