// Category database operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::db::error::DbError;
use crate::entity::categories::{ActiveModel, Column, Entity as Category, Model};

#[derive(Clone)]
pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// All categories ordered by name
    pub async fn find_all(&self) -> Result<Vec<Model>, DbError> {
        Category::find()
            .order_by_asc(Column::Name)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        Category::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Whether another category already uses the name
    pub async fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbError> {
        let mut query = Category::find().filter(Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        query
            .count(&self.conn)
            .await
            .map(|count| count > 0)
            .map_err(Into::into)
    }

    pub async fn insert(&self, category: ActiveModel) -> Result<Model, DbError> {
        category.insert(&self.conn).await.map_err(Into::into)
    }

    pub async fn update(&self, category: ActiveModel) -> Result<Model, DbError> {
        category.update(&self.conn).await.map_err(Into::into)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbError> {
        Category::delete_by_id(id)
            .exec(db)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }
}
