use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;
use crate::models::FieldErrors;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("Validation failed")]
    Validation(FieldErrors),
    #[error("Authentication required")]
    Unauthenticated,
    /// The flash message has already been stored on the session
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// 303 See Other to `location`
pub fn see_other(location: &'static str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let (status, err_msg) = match self {
            InventoryError::Unauthenticated => return see_other(LOGIN_PATH),
            InventoryError::PermissionDenied(_) => return see_other(HOME_PATH),
            InventoryError::Validation(errors) => {
                let body = Json(json!({
                    "error": "validation failed",
                    "errors": errors,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            InventoryError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            InventoryError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            InventoryError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            InventoryError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            InventoryError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": err_msg
        }));

        (status, body).into_response()
    }
}

impl From<DbError> for InventoryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionError(msg) | DbError::QueryError(msg) => {
                InventoryError::DatabaseError(msg)
            }
            DbError::NotFound(what) => InventoryError::NotFound(what),
        }
    }
}

impl From<sea_orm::DbErr> for InventoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        DbError::from(err).into()
    }
}

impl From<FieldErrors> for InventoryError {
    fn from(errors: FieldErrors) -> Self {
        InventoryError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_redirects_to_login() {
        let response = InventoryError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[test]
    fn permission_denied_redirects_home() {
        let response = InventoryError::PermissionDenied("no".into()).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], HOME_PATH);
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let errors = FieldErrors::single("zone", "Select a valid zone.");
        let response = InventoryError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn oversized_bodies_are_payload_too_large() {
        let response =
            InventoryError::PayloadTooLarge("length limit exceeded".into()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        let err: InventoryError = DbError::NotFound("Asset".into()).into();
        assert!(matches!(err, InventoryError::NotFound(_)));
    }
}
