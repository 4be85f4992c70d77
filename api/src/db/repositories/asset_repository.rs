// Asset database operations
// Write methods take the connection explicitly so they can join a transaction.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::db::error::DbError;
use crate::entity::assets::{ActiveModel, Column, Entity as Asset, Model};
use crate::entity::sea_orm_active_enums::AssetStatus;
use crate::models::asset::AssetFilter;

/// Repository for asset database operations
#[derive(Clone)]
pub struct AssetRepository {
    conn: DatabaseConnection,
}

impl AssetRepository {
    /// Create a new asset repository instance
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns a reference to the underlying database connection
    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    fn filtered(filter: &AssetFilter) -> Select<Asset> {
        let mut query = Asset::find();

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(zone) = &filter.zone {
            query = query.filter(Column::Zone.eq(zone.as_str()));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(Column::CategoryId.eq(category_id));
        }
        if let Some(brand_id) = filter.brand_id {
            query = query.filter(Column::BrandId.eq(brand_id));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(Column::Name.contains(search))
                    .add(Column::Imei1.contains(search))
                    .add(Column::Imei2.contains(search))
                    .add(Column::SerialNumber.contains(search))
                    .add(Column::Document.contains(search))
                    .add(Column::HolderName.contains(search)),
            );
        }

        query
    }

    /// Find asset by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        Asset::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Find one page of assets matching the filter, ordered by item number
    pub async fn find_filtered(
        &self,
        filter: &AssetFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Model>, DbError> {
        Self::filtered(filter)
            .order_by_asc(Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Find every asset matching the filter, ordered by item number
    pub async fn find_all_filtered(&self, filter: &AssetFilter) -> Result<Vec<Model>, DbError> {
        Self::filtered(filter)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Count assets matching the filter
    pub async fn count_filtered(&self, filter: &AssetFilter) -> Result<u64, DbError> {
        Self::filtered(filter)
            .count(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Number of assets per status
    pub async fn count_by_status(&self) -> Result<Vec<(AssetStatus, i64)>, DbError> {
        Asset::find()
            .select_only()
            .column(Column::Status)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Status)
            .order_by_asc(Column::Status)
            .into_tuple::<(AssetStatus, i64)>()
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Number of assets per zone name
    pub async fn count_by_zone(&self) -> Result<Vec<(String, i64)>, DbError> {
        Asset::find()
            .select_only()
            .column(Column::Zone)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Zone)
            .order_by_asc(Column::Zone)
            .into_tuple::<(String, i64)>()
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Insert a new asset
    pub async fn insert<C: ConnectionTrait>(db: &C, asset: ActiveModel) -> Result<Model, DbError> {
        asset.insert(db).await.map_err(Into::into)
    }

    /// Write the set columns of an existing asset
    pub async fn update<C: ConnectionTrait>(db: &C, asset: ActiveModel) -> Result<Model, DbError> {
        asset.update(db).await.map_err(Into::into)
    }

    /// Delete an asset, returning the number of removed rows
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbError> {
        Asset::delete_by_id(id)
            .exec(db)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }

    /// Drop the category link of every asset in the category
    pub async fn clear_category<C: ConnectionTrait>(
        db: &C,
        category_id: i32,
    ) -> Result<u64, DbError> {
        Asset::update_many()
            .col_expr(Column::CategoryId, Expr::value(Option::<i32>::None))
            .filter(Column::CategoryId.eq(category_id))
            .exec(db)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }

    /// Drop the brand link of every asset of the brand
    pub async fn clear_brand<C: ConnectionTrait>(db: &C, brand_id: i32) -> Result<u64, DbError> {
        Asset::update_many()
            .col_expr(Column::BrandId, Expr::value(Option::<i32>::None))
            .filter(Column::BrandId.eq(brand_id))
            .exec(db)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }
}
