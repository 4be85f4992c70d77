// Login session storage
// A session carries an optional one-shot flash message for the home page.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::db::error::DbError;
use crate::entity::user_sessions::{ActiveModel, Column, Entity as UserSession, Model};

#[derive(Clone)]
pub struct SessionRepository {
    conn: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        session_id: String,
        user_id: i32,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Model, DbError> {
        ActiveModel {
            session_id: Set(session_id),
            user_id: Set(user_id),
            created_at: Set(now),
            expires_at: Set(expires_at),
            is_active: Set(true),
            flash: Set(None),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(Into::into)
    }

    /// Active, unexpired session by its public id
    pub async fn find_active(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Model>, DbError> {
        UserSession::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::ExpiresAt.gt(now))
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn deactivate(&self, session_id: &str) -> Result<u64, DbError> {
        UserSession::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::SessionId.eq(session_id))
            .exec(&self.conn)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }

    /// Ends every session of a user, used when an account is disabled
    pub async fn deactivate_for_user(&self, user_id: i32) -> Result<u64, DbError> {
        UserSession::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into)
    }

    pub async fn set_flash(&self, session_id: &str, message: &str) -> Result<(), DbError> {
        UserSession::update_many()
            .col_expr(Column::Flash, Expr::value(Some(message.to_string())))
            .filter(Column::SessionId.eq(session_id))
            .exec(&self.conn)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    /// Returns the pending flash message and clears it
    pub async fn take_flash(&self, session_id: &str) -> Result<Option<String>, DbError> {
        let flash = UserSession::find()
            .filter(Column::SessionId.eq(session_id))
            .one(&self.conn)
            .await?
            .and_then(|session| session.flash);

        if flash.is_some() {
            UserSession::update_many()
                .col_expr(Column::Flash, Expr::value(Option::<String>::None))
                .filter(Column::SessionId.eq(session_id))
                .exec(&self.conn)
                .await?;
        }

        Ok(flash)
    }
}
