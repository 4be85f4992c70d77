// Brand database operations

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::db::error::DbError;
use crate::entity::brands::{ActiveModel, Column, Entity as Brand, Model};

#[derive(Clone)]
pub struct BrandRepository {
    conn: DatabaseConnection,
}

impl BrandRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Brands ordered by name, limited to one category when given
    pub async fn find_all(&self, category_id: Option<i32>) -> Result<Vec<Model>, DbError> {
        let mut query = Brand::find();
        if let Some(category_id) = category_id {
            query = query.filter(Column::CategoryId.eq(category_id));
        }
        query
            .order_by_asc(Column::Name)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        Brand::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Whether another brand of the same category already uses the name
    pub async fn name_taken(
        &self,
        category_id: Option<i32>,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbError> {
        let mut query = Brand::find().filter(Column::Name.eq(name));
        query = match category_id {
            Some(category_id) => query.filter(Column::CategoryId.eq(category_id)),
            None => query.filter(Column::CategoryId.is_null()),
        };
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        query
            .count(&self.conn)
            .await
            .map(|count| count > 0)
            .map_err(Into::into)
    }

    pub async fn insert(&self, brand: ActiveModel) -> Result<Model, DbError> {
        brand.insert(&self.conn).await.map_err(Into::into)
    }

    pub async fn update(&self, brand: ActiveModel) -> Result<Model, DbError> {
        brand.update(&self.conn).await.map_err(Into::into)
    }

    /// Detach every brand from a category that is being removed
    pub async fn clear_category<C: ConnectionTrait>(
        db: &C,
        category_id: i32,
    ) -> Result<u64, DbError> {
        Brand::update_many()
            .col_expr(Column::CategoryId, Expr::value(Option::<i32>::None))
            .filter(Column::CategoryId.eq(category_id))
            .exec(db)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbError> {
        Brand::delete_by_id(id)
            .exec(db)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }
}
