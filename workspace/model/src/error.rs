use thiserror::Error;

/// Error types for the account store
#[derive(Error, Debug)]
pub enum AccountError {
    /// A field failed validation before anything was written
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The email is already registered
    #[error("user with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Error from hashing or verifying a password
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl AccountError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AccountError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Type alias for Result with AccountError
pub type Result<T> = std::result::Result<T, AccountError>;
