// Lifecycle event log of assets

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::db::error::DbError;
use crate::entity::asset_traceability::{ActiveModel, Column, Entity as Traceability, Model};
use crate::entity::sea_orm_active_enums::TraceabilityKind;

#[derive(Clone)]
pub struct TraceabilityRepository {
    conn: DatabaseConnection,
}

impl TraceabilityRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Events of one asset, newest first
    pub async fn find_by_asset(&self, asset_id: i32) -> Result<Vec<Model>, DbError> {
        Traceability::find()
            .filter(Column::AssetId.eq(asset_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Events newest first, optionally narrowed to one asset or kind
    pub async fn find_recent(
        &self,
        asset_id: Option<i32>,
        kind: Option<TraceabilityKind>,
        limit: u64,
    ) -> Result<Vec<Model>, DbError> {
        let mut query = Traceability::find();
        if let Some(asset_id) = asset_id {
            query = query.filter(Column::AssetId.eq(asset_id));
        }
        if let Some(kind) = kind {
            query = query.filter(Column::Kind.eq(kind));
        }

        query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn insert<C: ConnectionTrait>(db: &C, event: ActiveModel) -> Result<Model, DbError> {
        event.insert(db).await.map_err(Into::into)
    }
}
