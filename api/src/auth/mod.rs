// Session resolution and role-based access checks

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use chrono::Utc;

use crate::entity::sea_orm_active_enums::Role;
use crate::entity::users;
use crate::error::{InventoryError, InventoryResult};
use crate::handlers::AppState;

pub const SESSION_COOKIE: &str = "session_id";

/// Zone/category/brand management, user management and every delete
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Asset creation, movements, traceability and the logistics views
pub const LOGISTICS: &[Role] = &[Role::Admin, Role::Logistics];
/// Roles allowed to edit an existing asset
pub const ASSET_EDITORS: &[Role] = &[Role::Admin, Role::Logistics, Role::Assigner];

/// The user behind the request's session
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: users::Model,
    pub session_id: String,
}

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Session id from `Authorization: Bearer <id>`, falling back to the session cookie
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = InventoryError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id =
            session_id_from_headers(&parts.headers).ok_or(InventoryError::Unauthenticated)?;

        let session = state
            .repositories
            .session
            .find_active(&session_id, Utc::now())
            .await?
            .ok_or(InventoryError::Unauthenticated)?;

        let user = state
            .repositories
            .user
            .find_by_id(session.user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(InventoryError::Unauthenticated)?;

        Ok(CurrentUser { user, session_id })
    }
}

/// Checks the caller's role against `allowed`; a denial leaves `message` as a
/// flash notice on the session
pub async fn require_role(
    state: &AppState,
    current: &CurrentUser,
    allowed: &[Role],
    message: &str,
) -> InventoryResult<()> {
    if current.role().is_one_of(allowed) {
        return Ok(());
    }

    tracing::warn!(
        user = current.username(),
        role = current.role().as_str(),
        "Permission denied: {}",
        message
    );
    state
        .repositories
        .session
        .set_flash(&current.session_id, message)
        .await?;

    Err(InventoryError::PermissionDenied(message.to_string()))
}

/// Landing page of each role
pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard/admin",
        Role::Logistics => "/dashboard/logistics",
        Role::ReadOnly => "/dashboard/read-only",
        Role::Assigner => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn admin_is_in_every_allow_list() {
        for allowed in [ADMIN_ONLY, LOGISTICS, ASSET_EDITORS] {
            assert!(Role::Admin.is_one_of(allowed));
        }
    }

    #[test]
    fn read_only_cannot_edit_or_delete() {
        assert!(!Role::ReadOnly.is_one_of(ASSET_EDITORS));
        assert!(!Role::ReadOnly.is_one_of(ADMIN_ONLY));
        assert!(!Role::Logistics.is_one_of(ADMIN_ONLY));
        assert!(Role::Assigner.is_one_of(ASSET_EDITORS));
        assert!(!Role::Assigner.is_one_of(LOGISTICS));
    }

    #[test]
    fn bearer_token_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session_id=xyz"));
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_id=xyz; lang=es"),
        );
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("xyz"));
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn each_role_has_a_landing_page() {
        assert_eq!(dashboard_path(Role::Admin), "/dashboard/admin");
        assert_eq!(dashboard_path(Role::Logistics), "/dashboard/logistics");
        assert_eq!(dashboard_path(Role::ReadOnly), "/dashboard/read-only");
        assert_eq!(dashboard_path(Role::Assigner), "/");
    }
}
