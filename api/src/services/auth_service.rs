// Password hashing, login and logout

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use sea_orm::{ActiveValue::Set, IntoActiveModel};
use uuid::Uuid;

use crate::auth::SESSION_COOKIE;
use crate::config::MAX_SESSION_TTL_HOURS;
use crate::entity::{user_sessions, users};
use crate::error::{InventoryError, InventoryResult};
use crate::handlers::AppState;
use crate::models::user::{LoginForm, MIN_PASSWORD_LENGTH};
use crate::models::FieldErrors;

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> InventoryResult<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldErrors::single(
            "password",
            format!(
                "Password must be at least {} characters long.",
                MIN_PASSWORD_LENGTH
            ),
        )
        .into());
    }

    hash(password, DEFAULT_COST)
        .map_err(|e| InventoryError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a hash; a malformed hash never matches
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or_else(|e| {
        tracing::warn!("Stored password hash could not be checked: {}", e);
        false
    })
}

pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Session lifetime bounded to `1..=MAX_SESSION_TTL_HOURS`
pub fn session_ttl(ttl_hours: i64) -> Duration {
    Duration::hours(ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS))
}

/// `Set-Cookie` value carrying the session id
pub fn session_cookie(session_id: &str, ttl_hours: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        session_id,
        session_ttl(ttl_hours).num_seconds()
    )
}

/// `Set-Cookie` value removing the session cookie
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Checks the credentials and opens a session for an active account
pub async fn login(
    state: &AppState,
    form: LoginForm,
) -> InventoryResult<(users::Model, user_sessions::Model)> {
    let repos = &state.repositories;
    let username = form.username.trim();

    let user = match repos.user.find_by_username(username).await? {
        Some(user) if user.is_active && verify_password(&form.password, &user.password_hash) => {
            user
        }
        _ => {
            tracing::warn!(user = username, "Failed login attempt");
            return Err(LoginForm::invalid_credentials().into());
        }
    };

    let now = Utc::now();
    let session = repos
        .session
        .create(
            generate_session_id(),
            user.id,
            now,
            now + session_ttl(state.config.session_ttl_hours),
        )
        .await?;

    let mut active = user.into_active_model();
    active.last_login_at = Set(Some(now));
    let user = repos.user.update(active).await?;

    tracing::info!(user = %user.username, "User logged in");
    Ok((user, session))
}

pub async fn logout(state: &AppState, session_id: &str) -> InventoryResult<()> {
    state.repositories.session.deactivate(session_id).await?;
    tracing::info!("Session closed");
    Ok(())
}
