//! Authentication: token issuing, the login session registry and the
//! request-scoped identity of the caller.

pub mod sessions;
pub mod tokens;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use model::{entities::user, UserManager};
use std::fmt;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::schemas::AppState;
use tokens::{Claims, TokenType};

/// Message for requests that carry no bearer token
pub const CREDENTIALS_NOT_PROVIDED: &str = "Authentication credentials were not provided.";
/// Message for tokens that fail verification or whose session is gone
pub const TOKEN_NOT_VALID: &str = "Given token not valid for any token type";

/// The caller of an authenticated request.
///
/// Handlers take this as an argument instead of reading any shared session
/// object; it is resolved once per request from the bearer token.
#[derive(Clone)]
pub struct AuthenticatedUser {
    pub user: user::Model,
    pub session_id: String,
}

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }
}

impl fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("id", &self.user.id)
            .field("email", &self.user.email)
            .field("session_id", &self.session_id)
            .finish()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verify `token` as an `expected` token and resolve the user it was issued to.
///
/// Fails when the signature or expiry is invalid, the token is of the other
/// kind, its session was closed, or the user is gone or inactive.
pub async fn resolve_token(
    state: &AppState,
    token: &str,
    expected: TokenType,
) -> Result<(user::Model, Claims), ApiError> {
    let claims = state.tokens.verify(token, expected).map_err(|e| {
        warn!("Rejected {} token: {}", expected, e);
        ApiError::Unauthenticated(TOKEN_NOT_VALID.to_string())
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        warn!("Token subject is not a user id: {}", claims.sub);
        ApiError::Unauthenticated(TOKEN_NOT_VALID.to_string())
    })?;

    if !state.sessions.is_active(&claims.sid, user_id).await {
        debug!("Session {} of user {} is no longer active", claims.sid, user_id);
        return Err(ApiError::Unauthenticated(TOKEN_NOT_VALID.to_string()));
    }

    let user = UserManager::find_by_id(&state.db, user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| {
            warn!("User {} from token is missing or inactive", user_id);
            ApiError::Unauthenticated("User not found".to_string())
        })?;

    Ok((user, claims))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            debug!("Request without bearer token");
            ApiError::Unauthenticated(CREDENTIALS_NOT_PROVIDED.to_string())
        })?;

        let (user, claims) = resolve_token(state, token, TokenType::Access).await?;
        Ok(AuthenticatedUser {
            user,
            session_id: claims.sid,
        })
    }
}
