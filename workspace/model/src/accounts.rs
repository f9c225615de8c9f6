//! Account store: creation and lookup of users keyed by email.
//!
//! Passwords only ever reach the database as bcrypt hashes. The manager owns
//! the hashing cost so that tests can run with a cheap cost while the server
//! uses the configured one.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use tracing::{debug, info, instrument, warn};

use bcrypt::BcryptError;

use crate::entities::user;
use crate::error::{AccountError, Result};

/// Longest password bcrypt hashes in full. Its input is the password plus a
/// NUL terminator, capped at 72 bytes.
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Optional overrides applied on top of the defaults when creating a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraFields {
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Creates, looks up and authenticates users.
#[derive(Debug, Clone, Copy)]
pub struct UserManager {
    hash_cost: u32,
}

impl Default for UserManager {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

/// Lowercases the domain part of an email address and trims surrounding whitespace.
///
/// The local part is left untouched, since some mail servers treat it as case sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

impl UserManager {
    pub fn new(hash_cost: u32) -> Self {
        Self { hash_cost }
    }

    pub fn hash_cost(&self) -> u32 {
        self.hash_cost
    }

    /// Create and save a user with the given email and password.
    ///
    /// Defaults to an active, non-staff, non-superuser account unless `extra`
    /// says otherwise.
    #[instrument(skip(self, db, password))]
    pub async fn create_user<C>(
        &self,
        db: &C,
        email: &str,
        password: &str,
        extra: ExtraFields,
    ) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        if email.trim().is_empty() {
            return Err(AccountError::validation("email", "You must provide an email."));
        }
        if password.is_empty() {
            return Err(AccountError::validation("password", "You must set a password."));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AccountError::validation(
                "password",
                format!("Ensure this field has no more than {} bytes.", MAX_PASSWORD_BYTES),
            ));
        }

        let email = normalize_email(email);
        let password_hash = bcrypt::non_truncating_hash(password, self.hash_cost)?;

        let new_user = user::ActiveModel {
            email: Set(email.clone()),
            password: Set(password_hash),
            is_active: Set(extra.is_active.unwrap_or(true)),
            is_staff: Set(extra.is_staff.unwrap_or(false)),
            is_superuser: Set(extra.is_superuser.unwrap_or(false)),
            last_login: Set(None),
            ..Default::default()
        };

        match new_user.insert(db).await {
            Ok(model) => {
                info!("Created user {} with ID {}", model.email, model.id);
                Ok(model)
            }
            Err(db_error) => match db_error.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    warn!("Email {} is already registered", email);
                    Err(AccountError::DuplicateEmail(email))
                }
                _ => Err(db_error.into()),
            },
        }
    }

    /// Create and save a superuser. Staff, superuser and active flags are
    /// forced on; an explicit `false` for any of them is rejected.
    #[instrument(skip(self, db, password))]
    pub async fn create_superuser<C>(
        &self,
        db: &C,
        email: &str,
        password: &str,
        extra: ExtraFields,
    ) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        if extra.is_staff == Some(false) {
            return Err(AccountError::validation("is_staff", "Superuser must have is_staff=True."));
        }
        if extra.is_superuser == Some(false) {
            return Err(AccountError::validation(
                "is_superuser",
                "Superuser must have is_superuser=True.",
            ));
        }
        if extra.is_active == Some(false) {
            return Err(AccountError::validation("is_active", "Superuser must have is_active=True."));
        }

        let elevated = ExtraFields {
            is_active: Some(true),
            is_staff: Some(true),
            is_superuser: Some(true),
        };
        self.create_user(db, email, password, elevated).await
    }

    pub async fn find_by_id<C>(db: &C, id: i32) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        let email = normalize_email(email);
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await?)
    }

    pub async fn email_exists<C>(db: &C, email: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let email = normalize_email(email);
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// Returns the user when the email exists, the password verifies and the
    /// account is active. Any other combination yields `None`.
    #[instrument(skip(self, db, password))]
    pub async fn authenticate<C>(
        &self,
        db: &C,
        email: &str,
        password: &str,
    ) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        let Some(user) = Self::find_by_email(db, email).await? else {
            debug!("No user registered under {}", email);
            return Ok(None);
        };

        let verified = match bcrypt::non_truncating_verify(password, &user.password) {
            Ok(verified) => verified,
            // Stored passwords never exceed the limit, so a longer one cannot match.
            Err(BcryptError::Truncation(_)) => false,
            Err(e) => return Err(e.into()),
        };
        if !verified {
            debug!("Password mismatch for user {}", user.id);
            return Ok(None);
        }

        if !user.is_active {
            debug!("User {} is inactive", user.id);
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Stamp `last_login` with the current time.
    pub async fn record_login<C>(db: &C, user: user::Model) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        let mut active = user.into_active_model();
        active.last_login = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }
}
