// Handlers for login, logout, the current user and the home page

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};

use crate::auth::{dashboard_path, session_id_from_headers, CurrentUser};
use crate::error::InventoryResult;
use crate::handlers::{body::JsonBody, AppState};
use crate::models::asset::{AssetFilter, HomeResponse};
use crate::models::user::{CurrentUserResponse, LoginForm, LoginResponse};
use crate::models::PaginationParams;
use crate::services::{asset_service, auth_service};

/// Handler for POST /login - Opens a session and sets the session cookie
pub async fn login(
    State(state): State<AppState>,
    body: JsonBody,
) -> InventoryResult<impl IntoResponse> {
    let form: LoginForm = body.parse()?;
    let (user, session) = auth_service::login(&state, form).await?;
    let cookie = auth_service::session_cookie(&session.session_id, state.config.session_ttl_hours);

    let body = LoginResponse {
        session_id: session.session_id,
        expires_at: session.expires_at,
        redirect_to: dashboard_path(user.role),
        current: user.into(),
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

/// Handler for POST /logout - Ends the session when there is one
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> InventoryResult<impl IntoResponse> {
    if let Some(session_id) = session_id_from_headers(&headers) {
        auth_service::logout(&state, &session_id).await?;
    }
    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, auth_service::clear_session_cookie())],
    ))
}

/// Handler for GET /me - Returns the signed-in user with role flags
pub async fn me(current: CurrentUser) -> Json<CurrentUserResponse> {
    Json(current.user.into())
}

/// Handler for GET / - Returns pending notices and the filtered asset list
pub async fn home(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(filter): Query<AssetFilter>,
    Query(pagination): Query<PaginationParams>,
) -> InventoryResult<Json<HomeResponse>> {
    let messages = state
        .repositories
        .session
        .take_flash(&current.session_id)
        .await?
        .into_iter()
        .collect();
    let list = asset_service::list_assets(&state, filter, pagination).await?;
    Ok(Json(HomeResponse { messages, list }))
}

/// Handler for GET /dashboard - Sends each role to its own dashboard
pub async fn dashboard_redirect(current: CurrentUser) -> Redirect {
    Redirect::to(dashboard_path(current.role()))
}
