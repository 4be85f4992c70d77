// Handlers for user administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::{require_role, CurrentUser, ADMIN_ONLY};
use crate::entity::users;
use crate::error::InventoryResult;
use crate::handlers::{body::JsonBody, AppState};
use crate::models::user::{ResetPasswordForm, UserForm};
use crate::services::user_service;

const USERS_DENIED: &str = "You do not have permission to manage users.";

/// Handler for GET /users
pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
) -> InventoryResult<Json<Vec<users::Model>>> {
    require_role(&state, &current, ADMIN_ONLY, USERS_DENIED).await?;
    Ok(Json(user_service::list_users(&state).await?))
}

/// Handler for POST /users
pub async fn create_user(
    State(state): State<AppState>,
    current: CurrentUser,
    body: JsonBody,
) -> InventoryResult<(StatusCode, Json<users::Model>)> {
    require_role(&state, &current, ADMIN_ONLY, USERS_DENIED).await?;
    let form: UserForm = body.parse()?;
    let user = user_service::create_user(&state, &current, form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    body: JsonBody,
) -> InventoryResult<Json<users::Model>> {
    require_role(&state, &current, ADMIN_ONLY, USERS_DENIED).await?;
    let form: UserForm = body.parse()?;
    Ok(Json(
        user_service::update_user(&state, &current, id, form).await?,
    ))
}

/// Handler for DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<StatusCode> {
    require_role(&state, &current, ADMIN_ONLY, USERS_DENIED).await?;
    user_service::delete_user(&state, &current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    body: JsonBody,
) -> InventoryResult<StatusCode> {
    require_role(&state, &current, ADMIN_ONLY, USERS_DENIED).await?;
    let form: ResetPasswordForm = body.parse()?;
    user_service::reset_password(&state, &current, id, form).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /users/{id}/toggle-active
pub async fn toggle_active(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<Json<users::Model>> {
    require_role(&state, &current, ADMIN_ONLY, USERS_DENIED).await?;
    Ok(Json(user_service::toggle_active(&state, &current, id).await?))
}
