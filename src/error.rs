//! Error type returned by the HTTP handlers and its mapping onto status codes.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_valid::ValidRejection;
use model::AccountError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::schemas::{ErrorResponse, MessageResponse};

/// Message for a required field that was absent or null.
pub const FIELD_REQUIRED: &str = "This field is required.";
/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field name mapped to the first validation message for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::single(field, FIELD_REQUIRED)
    }

    /// Record a message for `field`. The first message recorded for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            let key = if field == "__all__" { NON_FIELD_ERRORS.to_string() } else { field };
            if let Some(err) = errs.first() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                field_errors.insert(key, message);
            }
        }
        field_errors
    }
}

/// Errors surfaced by the request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more fields are missing, malformed or mismatched
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// The request lacks data the endpoint needs, answered with a plain message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Email/password combination did not authenticate
    #[error("Invalid credentials")]
    InvalidCredential,

    /// Missing, invalid or revoked bearer token
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The requested singleton resource does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Error while signing a token
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Error while hashing or verifying a password
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

/// Message returned when login credentials do not match
pub const INVALID_CREDENTIALS: &str = "Invalid email and password combinations.";

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation { field, message } => {
                ApiError::Validation(FieldErrors::single(field, message))
            }
            AccountError::DuplicateEmail(_) => ApiError::Validation(FieldErrors::single(
                "email",
                "user with this email already exists.",
            )),
            AccountError::Database(db_err) => ApiError::Database(db_err),
            AccountError::PasswordHash(hash_err) => ApiError::PasswordHash(hash_err),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(FieldErrors::single(NON_FIELD_ERRORS, rejection.body_text()))
    }
}

impl From<ValidRejection<QueryRejection>> for ApiError {
    fn from(rejection: ValidRejection<QueryRejection>) -> Self {
        match rejection {
            ValidRejection::Valid(errors) => ApiError::Validation(FieldErrors::from(errors)),
            ValidRejection::Inner(rejection) => ApiError::Validation(FieldErrors::single(
                NON_FIELD_ERRORS,
                rejection.body_text(),
            )),
        }
    }
}

fn error_body(error: impl Into<String>, code: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.into(),
        code: code.to_string(),
        success: false,
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(MessageResponse::new(msg))).into_response()
            }
            ApiError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse::new(INVALID_CREDENTIALS)),
            )
                .into_response(),
            ApiError::Unauthenticated(reason) => {
                (StatusCode::UNAUTHORIZED, error_body(reason, "NOT_AUTHENTICATED")).into_response()
            }
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                error_body(format!("{} not found", resource), "NOT_FOUND"),
            )
                .into_response(),
            ApiError::Database(ref db_error) => {
                error!("Database error: {}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("Internal server error", "DATABASE_ERROR"),
                )
                    .into_response()
            }
            ApiError::Token(ref token_error) => {
                error!("Failed to sign token: {}", token_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("Internal server error", "TOKEN_ERROR"),
                )
                    .into_response()
            }
            ApiError::PasswordHash(ref hash_error) => {
                error!("Password hashing failed: {}", hash_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("Internal server error", "PASSWORD_HASH_ERROR"),
                )
                    .into_response()
            }
        }
    }
}
