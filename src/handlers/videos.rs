use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use axum_valid::{Valid, ValidRejection};
use model::entities::user_video;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, info, instrument, trace};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, FieldErrors};
use crate::schemas::AppState;
use crate::transfer::videos::{MethodEchoResponse, VideoListQuery, VideoPayload, VideoResponse};

const DEFAULT_PAGE_SIZE: u64 = 50;

/// List the caller's videos, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "videos",
    params(VideoListQuery),
    responses(
        (status = 200, description = "Videos of the caller, possibly empty", body = Vec<VideoResponse>),
        (status = 400, description = "Invalid paging parameters", body = FieldErrors),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_videos(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    query: Result<Valid<Query<VideoListQuery>>, ValidRejection<QueryRejection>>,
) -> Result<Json<Vec<VideoResponse>>, ApiError> {
    trace!("Entering list_videos function");
    let Valid(Query(query)) = query?;

    let select = user_video::Entity::find()
        .filter(user_video::Column::UserId.eq(caller.id()))
        .order_by_asc(user_video::Column::Id);

    let videos = match query.page {
        Some(page) => {
            let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
            debug!("Fetching videos page {} (limit {}) of user {}", page, limit, caller.id());
            select.paginate(&state.db, limit).fetch_page(page - 1).await?
        }
        None => select.all(&state.db).await?,
    };

    debug!("Retrieved {} videos of user {}", videos.len(), caller.id());
    Ok(Json(videos.into_iter().map(VideoResponse::from).collect()))
}

/// Add a video record owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "videos",
    request_body = VideoPayload,
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "Field errors", body = FieldErrors),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, payload))]
pub async fn create_video(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    payload: Result<Json<VideoPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<VideoResponse>), ApiError> {
    trace!("Entering create_video function");
    let Json(payload) = payload?;
    payload.validate().map_err(FieldErrors::from)?;

    let video = payload.new_video(caller.id()).insert(&state.db).await?;
    info!("Created video {} for user {}", video.id, caller.id());
    Ok((StatusCode::CREATED, Json(VideoResponse::from(video))))
}

/// Replace a video (placeholder, echoes the method)
#[utoipa::path(
    put,
    path = "/api/v1/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Method echo", body = MethodEchoResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument]
pub async fn update_video(caller: AuthenticatedUser) -> Json<MethodEchoResponse> {
    debug!("Video PUT by user {} is not implemented", caller.id());
    Json(MethodEchoResponse::new("put"))
}

/// Partially update a video (placeholder, echoes the method)
#[utoipa::path(
    patch,
    path = "/api/v1/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Method echo", body = MethodEchoResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument]
pub async fn partial_update_video(caller: AuthenticatedUser) -> Json<MethodEchoResponse> {
    debug!("Video PATCH by user {} is not implemented", caller.id());
    Json(MethodEchoResponse::new("patch"))
}
