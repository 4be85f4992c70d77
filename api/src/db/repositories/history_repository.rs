// Per-field change history of assets

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::db::error::DbError;
use crate::entity::asset_history::{ActiveModel, Column, Entity as AssetHistory, Model};

#[derive(Clone)]
pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// History of one asset, newest first
    pub async fn find_by_asset(&self, asset_id: i32) -> Result<Vec<Model>, DbError> {
        AssetHistory::find()
            .filter(Column::AssetId.eq(asset_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Insert every change row; an empty batch is a no-op
    pub async fn insert_many<C: ConnectionTrait>(
        db: &C,
        rows: Vec<ActiveModel>,
    ) -> Result<(), DbError> {
        if rows.is_empty() {
            return Ok(());
        }
        AssetHistory::insert_many(rows)
            .exec(db)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    /// Remove the history of an asset ahead of the asset itself
    pub async fn delete_by_asset<C: ConnectionTrait>(
        db: &C,
        asset_id: i32,
    ) -> Result<u64, DbError> {
        AssetHistory::delete_many()
            .filter(Column::AssetId.eq(asset_id))
            .exec(db)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }
}
