// User account administration

use chrono::Utc;
use sea_orm::{ActiveValue::Set, IntoActiveModel};

use crate::auth::CurrentUser;
use crate::entity::sea_orm_active_enums::Role;
use crate::entity::users;
use crate::error::{InventoryError, InventoryResult};
use crate::handlers::AppState;
use crate::models::user::{ResetPasswordForm, UserFields, UserForm};
use crate::models::{FieldErrors, NON_FIELD_ERRORS};
use crate::services::auth_service;

pub async fn list_users(state: &AppState) -> InventoryResult<Vec<users::Model>> {
    Ok(state.repositories.user.find_all().await?)
}

pub async fn get_user(state: &AppState, id: i32) -> InventoryResult<users::Model> {
    state
        .repositories
        .user
        .find_by_id(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("User {} not found", id)))
}

async fn clean_user(
    state: &AppState,
    form: UserForm,
    exclude_id: Option<i32>,
) -> InventoryResult<UserFields> {
    let fields = form.clean(exclude_id.is_none())?;
    if state
        .repositories
        .user
        .username_taken(&fields.username, exclude_id)
        .await?
    {
        return Err(FieldErrors::single(
            "username",
            "A user with that username already exists.",
        )
        .into());
    }
    Ok(fields)
}

pub async fn create_user(
    state: &AppState,
    actor: &CurrentUser,
    form: UserForm,
) -> InventoryResult<users::Model> {
    let fields = clean_user(state, form, None).await?;
    let password = fields.password.as_deref().unwrap_or_default();

    let user = state
        .repositories
        .user
        .insert(users::ActiveModel {
            username: Set(fields.username),
            first_name: Set(fields.first_name),
            last_name: Set(fields.last_name),
            email: Set(fields.email),
            role: Set(fields.role),
            password_hash: Set(auth_service::hash_password(password)?),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_login_at: Set(None),
            ..Default::default()
        })
        .await?;

    tracing::info!(
        user = actor.username(),
        created = %user.username,
        role = user.role.as_str(),
        "User created"
    );
    Ok(user)
}

/// Updates profile and role; the password only changes when one was submitted
pub async fn update_user(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    form: UserForm,
) -> InventoryResult<users::Model> {
    let existing = get_user(state, id).await?;
    let fields = clean_user(state, form, Some(id)).await?;

    let mut active = existing.into_active_model();
    active.username = Set(fields.username);
    active.first_name = Set(fields.first_name);
    active.last_name = Set(fields.last_name);
    active.email = Set(fields.email);
    active.role = Set(fields.role);
    if let Some(password) = fields.password {
        active.password_hash = Set(auth_service::hash_password(&password)?);
    }
    let user = state.repositories.user.update(active).await?;

    tracing::info!(user = actor.username(), user_id = id, "User updated");
    Ok(user)
}

pub async fn reset_password(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    form: ResetPasswordForm,
) -> InventoryResult<()> {
    let existing = get_user(state, id).await?;
    let password = form.clean()?;

    let mut active = existing.into_active_model();
    active.password_hash = Set(auth_service::hash_password(&password)?);
    state.repositories.user.update(active).await?;

    tracing::info!(user = actor.username(), user_id = id, "Password reset");
    Ok(())
}

fn refuse_self(actor: &CurrentUser, id: i32, message: &str) -> InventoryResult<()> {
    if actor.id() == id {
        return Err(FieldErrors::single(NON_FIELD_ERRORS, message).into());
    }
    Ok(())
}

/// Flips `is_active`; disabling an account ends its sessions
pub async fn toggle_active(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
) -> InventoryResult<users::Model> {
    refuse_self(actor, id, "You cannot deactivate your own account.")?;
    let existing = get_user(state, id).await?;
    let is_active = !existing.is_active;

    let mut active = existing.into_active_model();
    active.is_active = Set(is_active);
    let user = state.repositories.user.update(active).await?;
    if !is_active {
        state.repositories.session.deactivate_for_user(id).await?;
    }

    tracing::info!(user = actor.username(), user_id = id, is_active, "User active flag toggled");
    Ok(user)
}

pub async fn delete_user(state: &AppState, actor: &CurrentUser, id: i32) -> InventoryResult<()> {
    refuse_self(actor, id, "You cannot delete your own account.")?;
    get_user(state, id).await?;
    state.repositories.user.delete(id).await?;

    tracing::info!(user = actor.username(), user_id = id, "User deleted");
    Ok(())
}

/// Creates the configured first admin when no account exists yet
pub async fn bootstrap_admin(state: &AppState) -> InventoryResult<Option<users::Model>> {
    let Some(initial) = &state.config.initial_admin else {
        return Ok(None);
    };
    if state.repositories.user.count().await? > 0 {
        tracing::debug!("Users already present, skipping admin bootstrap");
        return Ok(None);
    }

    let user = state
        .repositories
        .user
        .insert(users::ActiveModel {
            username: Set(initial.username.clone()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            email: Set(String::new()),
            role: Set(Role::Admin),
            password_hash: Set(auth_service::hash_password(&initial.password)?),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_login_at: Set(None),
            ..Default::default()
        })
        .await?;

    tracing::info!(user = %user.username, "Initial admin account created");
    Ok(Some(user))
}
