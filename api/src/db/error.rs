// Error types for database operations

use thiserror::Error;

/// Error types for database connection and query operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Error occurred during database connection attempt
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A row expected by the operation does not exist
    #[error("{0} not found")]
    NotFound(String),
}

impl From<sea_orm::DbErr> for DbError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(what) => DbError::NotFound(what),
            sea_orm::DbErr::RecordNotUpdated => DbError::NotFound("Record".to_string()),
            sea_orm::DbErr::Conn(e) => DbError::ConnectionError(e.to_string()),
            other => DbError::QueryError(other.to_string()),
        }
    }
}
