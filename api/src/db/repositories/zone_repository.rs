// Zone database operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::db::error::DbError;
use crate::entity::zones::{ActiveModel, Column, Entity as Zone, Model};

#[derive(Clone)]
pub struct ZoneRepository {
    conn: DatabaseConnection,
}

impl ZoneRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All zones ordered by name
    pub async fn find_all(&self) -> Result<Vec<Model>, DbError> {
        Zone::find()
            .order_by_asc(Column::Name)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        Zone::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Whether a zone with exactly this name exists
    pub async fn exists_by_name(&self, name: &str) -> Result<bool, DbError> {
        Zone::find()
            .filter(Column::Name.eq(name))
            .count(&self.conn)
            .await
            .map(|count| count > 0)
            .map_err(Into::into)
    }

    /// Whether another zone already uses the name
    pub async fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbError> {
        let mut query = Zone::find().filter(Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        query
            .count(&self.conn)
            .await
            .map(|count| count > 0)
            .map_err(Into::into)
    }

    pub async fn insert(&self, zone: ActiveModel) -> Result<Model, DbError> {
        zone.insert(&self.conn).await.map_err(Into::into)
    }

    pub async fn update(&self, zone: ActiveModel) -> Result<Model, DbError> {
        zone.update(&self.conn).await.map_err(Into::into)
    }

    /// Asset rows keep their zone text when the zone goes away
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        Zone::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }
}
