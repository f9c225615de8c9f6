use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use model::UserManager;
use tracing::{debug, info, instrument, trace, warn};

use crate::auth::{resolve_token, tokens::TokenType, AuthenticatedUser};
use crate::error::ApiError;
use crate::schemas::{AppState, MessageResponse};
use crate::transfer::session::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};

pub const LOGIN_SUCCESS: &str = "You have successfully logged in.";
pub const MISSING_CREDENTIALS: &str = "Please provide your email and/or password.";
pub const LOGOUT_SUCCESS: &str = "You have successfully logged out.";
pub const MISSING_REFRESH_TOKEN: &str = "Please provide a refresh token.";

/// Log in with email and password
///
/// Opens a login session and returns an access/refresh token pair bound to it.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    trace!("Entering login function");
    let Json(request) = payload?;

    let Some((email, password)) = request.credentials() else {
        debug!("Login attempt without email or password");
        return Err(ApiError::BadRequest(MISSING_CREDENTIALS.to_string()));
    };

    let Some(user) = state.users.authenticate(&state.db, email, password).await? else {
        warn!("Failed login attempt for {}", email);
        return Err(ApiError::InvalidCredential);
    };

    let user = UserManager::record_login(&state.db, user).await?;
    let session_id = state.sessions.open(user.id).await;
    let tokens = state.tokens.issue_tokens(&user, &session_id)?;

    info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        msg: LOGIN_SUCCESS.to_string(),
        access: tokens.access,
        refresh: tokens.refresh,
    }))
}

/// Log out
///
/// Closes the login session of the presented access token, which revokes every
/// token issued for it. Succeeds even without a valid token.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    caller: Option<AuthenticatedUser>,
) -> Json<MessageResponse> {
    match caller {
        Some(caller) => {
            state.sessions.close(&caller.session_id).await;
            info!("User {} logged out", caller.id());
        }
        None => debug!("Logout without an active session"),
    }

    Json(MessageResponse::new(LOGOUT_SUCCESS))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/v1/token/refresh",
    tag = "auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 400, description = "Refresh token missing", body = MessageResponse),
        (status = 401, description = "Refresh token invalid, expired or logged out", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, ApiError> {
    trace!("Entering refresh_token function");
    let Json(request) = payload?;

    let Some(token) = request.refresh.as_deref().filter(|t| !t.is_empty()) else {
        return Err(ApiError::BadRequest(MISSING_REFRESH_TOKEN.to_string()));
    };

    let (user, claims) = resolve_token(&state, token, TokenType::Refresh).await?;
    let access = state.tokens.issue_access_token(&user, &claims.sid)?;

    debug!("Issued new access token for user {}", user.id);
    Ok(Json(RefreshResponse { access }))
}
