use chrono::{DateTime, Utc};
use model::{entities::user, UserManager, MAX_PASSWORD_BYTES};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ApiError, FieldErrors};

pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match.";
pub const EMAIL_TAKEN: &str = "user with this email already exists.";

fn password_too_long() -> String {
    format!("Ensure this field has no more than {} bytes.", MAX_PASSWORD_BYTES)
}

/// Request body for registering a new account
#[derive(Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Login email, unique across accounts
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub password: Option<String>,
    /// Confirmation, must equal `password`
    #[validate(required(message = "This field is required."))]
    pub password2: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated registration data, ready for `UserManager::create_user`
pub struct Registration {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Check field rules, password confirmation and email uniqueness.
    ///
    /// All field problems are collected before returning, so the caller sees
    /// every failing field at once.
    pub async fn into_registration<C>(self, db: &C) -> Result<Registration, ApiError>
    where
        C: ConnectionTrait,
    {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(validation_errors) => FieldErrors::from(validation_errors),
        };

        if let Some(password) = self.password.as_deref() {
            if password.len() > MAX_PASSWORD_BYTES {
                errors.insert("password", password_too_long());
            }
        }

        if let (Some(password), Some(password2)) = (&self.password, &self.password2) {
            if password != password2 {
                debug!("Password confirmation does not match");
                errors.insert("password", PASSWORDS_MUST_MATCH);
            }
        }

        if let Some(email) = self.email.as_deref().filter(|_| !errors.contains("email")) {
            if UserManager::email_exists(db, email).await? {
                debug!("Registration for taken email {}", email);
                errors.insert("email", EMAIL_TAKEN);
            }
        }

        errors.into_result()?;

        match (self.email, self.password) {
            (Some(email), Some(password)) => Ok(Registration { email, password }),
            _ => Err(FieldErrors::required("email").into()),
        }
    }
}

/// Account as returned by the API. The password hash never leaves the store.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            is_active: model.is_active,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            date_joined: model.date_joined,
            last_login: model.last_login,
        }
    }
}
