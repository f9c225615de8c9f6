use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use model::entities::user_profile;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, SqlErr,
};
use tracing::{debug, info, instrument, trace, warn};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, FieldErrors, NON_FIELD_ERRORS};
use crate::schemas::AppState;
use crate::transfer::profiles::{ProfilePayload, ProfileResponse};

pub const PROFILE_EXISTS: &str = "Profile already exists for this user.";

async fn find_profile<C>(db: &C, user_id: i32) -> Result<Option<user_profile::Model>, ApiError>
where
    C: ConnectionTrait,
{
    Ok(user_profile::Entity::find()
        .filter(user_profile::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

async fn require_profile<C>(db: &C, user_id: i32) -> Result<user_profile::Model, ApiError>
where
    C: ConnectionTrait,
{
    find_profile(db, user_id).await?.ok_or_else(|| {
        warn!("User {} has no profile", user_id);
        ApiError::NotFound("Profile")
    })
}

/// Write the fields present in `payload` onto the caller's existing profile
async fn apply_update<C>(
    db: &C,
    user_id: i32,
    payload: ProfilePayload,
) -> Result<user_profile::Model, ApiError>
where
    C: ConnectionTrait,
{
    let existing = require_profile(db, user_id).await?;

    let updated = payload.apply_to(existing.clone());
    if !updated.is_changed() {
        debug!("No profile fields sent for profile {}", existing.id);
        return Ok(existing);
    }

    Ok(updated.update(db).await?)
}

fn validated(payload: Result<Json<ProfilePayload>, JsonRejection>) -> Result<ProfilePayload, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(FieldErrors::from)?;
    Ok(payload)
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Profile retrieved", body = ProfileResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "No profile yet", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    trace!("Entering get_profile function");
    let profile = require_profile(&state.db, caller.id()).await?;
    debug!("Retrieved profile {} of user {}", profile.id, caller.id());
    Ok(Json(ProfileResponse::from(profile)))
}

/// Create the caller's profile
#[utoipa::path(
    post,
    path = "/api/v1/profile",
    tag = "profile",
    request_body = ProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Field errors, or the profile already exists", body = FieldErrors),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, payload))]
pub async fn create_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    trace!("Entering create_profile function");
    let payload = validated(payload)?;

    if find_profile(&state.db, caller.id()).await?.is_some() {
        warn!("User {} already has a profile", caller.id());
        return Err(FieldErrors::single(NON_FIELD_ERRORS, PROFILE_EXISTS).into());
    }

    let profile = match payload.new_profile(caller.id()).insert(&state.db).await {
        Ok(profile) => profile,
        Err(db_error) => {
            return Err(match db_error.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    warn!("Concurrent profile creation for user {}", caller.id());
                    FieldErrors::single(NON_FIELD_ERRORS, PROFILE_EXISTS).into()
                }
                _ => db_error.into(),
            });
        }
    };

    info!("Created profile {} for user {}", profile.id, caller.id());
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

/// Update the caller's profile
///
/// Fields sent as `null` are cleared. Fields missing from the body keep their value.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "profile",
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Field errors", body = FieldErrors),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "No profile yet", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    trace!("Entering update_profile function");
    let payload = validated(payload)?;

    let profile = apply_update(&state.db, caller.id(), payload).await?;
    info!("Updated profile {} of user {}", profile.id, caller.id());
    Ok(Json(ProfileResponse::from(profile)))
}

/// Partially update the caller's profile
///
/// Same field handling as PUT: only fields present in the body change.
#[utoipa::path(
    patch,
    path = "/api/v1/profile",
    tag = "profile",
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Field errors", body = FieldErrors),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "No profile yet", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, payload))]
pub async fn partial_update_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    trace!("Entering partial_update_profile function");
    let payload = validated(payload)?;

    let profile = apply_update(&state.db, caller.id(), payload).await?;
    info!("Partially updated profile {} of user {}", profile.id, caller.id());
    Ok(Json(ProfileResponse::from(profile)))
}
