// User account forms

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_max_len, check_required, clean_text, FieldErrors, NON_FIELD_ERRORS};
use crate::entity::sea_orm_active_enums::Role;
use crate::entity::users;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Create or update form for a user account
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    /// Required on create, optional on update
    pub password: Option<String>,
}

/// Validated user values
#[derive(Debug, Clone, PartialEq)]
pub struct UserFields {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: Option<String>,
}

pub(crate) fn check_password(errors: &mut FieldErrors, field: &str, password: &Option<String>) {
    if let Some(password) = password {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                field,
                format!(
                    "Password must be at least {} characters long.",
                    MIN_PASSWORD_LENGTH
                ),
            );
        }
    }
}

impl UserForm {
    pub fn clean(self, creating: bool) -> Result<UserFields, FieldErrors> {
        let username = clean_text(self.username);
        let email = clean_text(self.email);
        // Passwords are not trimmed, only blank input counts as absent
        let password = self.password.filter(|p| !p.trim().is_empty());

        let mut errors = FieldErrors::new();
        check_required(&mut errors, "username", &username);
        check_max_len(&mut errors, "username", &username, 150);
        if let Some(name) = &username {
            if !name
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
            {
                errors.add(
                    "username",
                    "Letters, digits and @/./+/-/_ only.",
                );
            }
        }
        if let Some(email) = &email {
            if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
                errors.add("email", "Enter a valid email address.");
            }
        }
        check_max_len(&mut errors, "email", &email, 254);
        if creating {
            check_required(&mut errors, "password", &password);
        }
        check_password(&mut errors, "password", &password);
        errors.into_result()?;

        Ok(UserFields {
            username: username.unwrap_or_default(),
            first_name: clean_text(self.first_name).unwrap_or_default(),
            last_name: clean_text(self.last_name).unwrap_or_default(),
            email: email.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            password,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordForm {
    pub new_password: Option<String>,
}

impl ResetPasswordForm {
    pub fn clean(self) -> Result<String, FieldErrors> {
        let password = self.new_password.filter(|p| !p.trim().is_empty());
        let mut errors = FieldErrors::new();
        check_required(&mut errors, "new_password", &password);
        check_password(&mut errors, "new_password", &password);
        errors.into_result()?;
        Ok(password.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn invalid_credentials() -> FieldErrors {
        FieldErrors::single(NON_FIELD_ERRORS, "Invalid username or password.")
    }
}

/// The signed-in user with role flags for the client
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: users::Model,
    pub role_label: &'static str,
    pub is_admin: bool,
    pub is_logistics: bool,
    pub is_read_only: bool,
    pub is_assigner: bool,
}

impl From<users::Model> for CurrentUserResponse {
    fn from(user: users::Model) -> Self {
        let role = user.role;
        Self {
            role_label: role.label(),
            is_admin: role == Role::Admin,
            is_logistics: role == Role::Logistics,
            is_read_only: role == Role::ReadOnly,
            is_assigner: role == Role::Assigner,
            user,
        }
    }
}

/// Successful login: the session id doubles as a bearer token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
    pub redirect_to: &'static str,
    #[serde(flatten)]
    pub current: CurrentUserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_required_only_on_create() {
        let form = UserForm {
            username: Some("warehouse".into()),
            ..Default::default()
        };
        assert!(form.clone().clean(true).unwrap_err().contains("password"));
        let fields = form.clean(false).unwrap();
        assert_eq!(fields.role, Role::ReadOnly);
        assert_eq!(fields.password, None);
    }

    #[test]
    fn short_password_is_rejected() {
        let form = UserForm {
            username: Some("warehouse".into()),
            password: Some("short".into()),
            ..Default::default()
        };
        assert!(form.clean(false).unwrap_err().contains("password"));
    }

    #[test]
    fn username_characters_are_restricted() {
        let form = UserForm {
            username: Some("ware house".into()),
            password: Some("long-enough".into()),
            ..Default::default()
        };
        assert!(form.clean(true).unwrap_err().contains("username"));
    }

    #[test]
    fn reset_password_requires_minimum_length() {
        let form = ResetPasswordForm {
            new_password: Some("1234".into()),
        };
        assert!(form.clean().unwrap_err().contains("new_password"));
    }
}
