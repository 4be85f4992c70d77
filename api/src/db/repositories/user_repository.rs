// User account database operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::db::error::DbError;
use crate::entity::users::{ActiveModel, Column, Entity as User, Model};

#[derive(Clone)]
pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All accounts ordered by username
    pub async fn find_all(&self) -> Result<Vec<Model>, DbError> {
        User::find()
            .order_by_asc(Column::Username)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        User::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Model>, DbError> {
        User::find()
            .filter(Column::Username.eq(username))
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Whether another account already uses the username
    pub async fn username_taken(
        &self,
        username: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbError> {
        let mut query = User::find().filter(Column::Username.eq(username));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        query
            .count(&self.conn)
            .await
            .map(|count| count > 0)
            .map_err(Into::into)
    }

    pub async fn count(&self) -> Result<u64, DbError> {
        User::find().count(&self.conn).await.map_err(Into::into)
    }

    pub async fn insert(&self, user: ActiveModel) -> Result<Model, DbError> {
        user.insert(&self.conn).await.map_err(Into::into)
    }

    pub async fn update(&self, user: ActiveModel) -> Result<Model, DbError> {
        user.update(&self.conn).await.map_err(Into::into)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        User::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }
}
