use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use model::ExtraFields;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::ApiError;
use crate::schemas::AppState;
use crate::transfer::users::{RegisterRequest, UserResponse};

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Field errors", body = FieldErrors),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    trace!("Entering register function");
    let Json(request) = payload?;

    let registration = request.into_registration(&state.db).await.map_err(|e| {
        warn!("Registration rejected: {}", e);
        e
    })?;
    debug!("Registration data for {} is valid", registration.email);

    let user = state
        .users
        .create_user(
            &state.db,
            &registration.email,
            &registration.password,
            ExtraFields::default(),
        )
        .await?;

    info!("Registered user {} with ID {}", user.email, user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
