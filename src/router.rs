use crate::handlers::{
    health::health_check,
    profile::{create_profile, get_profile, partial_update_profile, update_profile},
    registration::register,
    session::{login, logout, refresh_token},
    videos::{create_video, list_videos, partial_update_video, update_video},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Registration and session routes
        .route("/api/v1/register", post(register))
        .route("/api/v1/login", post(login))
        .route("/api/v1/logout", post(logout))
        .route("/api/v1/token/refresh", post(refresh_token))
        // Profile of the caller
        .route(
            "/api/v1/profile",
            get(get_profile)
                .post(create_profile)
                .put(update_profile)
                .patch(partial_update_profile),
        )
        // Videos of the caller
        .route(
            "/api/v1/videos",
            get(list_videos)
                .post(create_video)
                .put(update_video)
                .patch(partial_update_video),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
