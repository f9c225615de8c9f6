use model::UserManager;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::auth::{sessions::SessionStore, tokens::TokenService};
use crate::config::AppConfig;
use crate::error::FieldErrors;
use crate::transfer::{
    profiles::{ProfilePayload, ProfileResponse},
    session::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse},
    users::{RegisterRequest, UserResponse},
    videos::{MethodEchoResponse, VideoPayload, VideoResponse},
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Account store operations
    pub users: UserManager,
    /// Issues and verifies access/refresh tokens
    pub tokens: TokenService,
    /// Server-side registry of live login sessions
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let refresh_ttl = Duration::from_secs(config.refresh_token_ttl_secs);
        Self {
            db,
            users: UserManager::new(config.password_hash_cost),
            tokens: TokenService::new(
                &config.jwt_secret,
                Duration::from_secs(config.access_token_ttl_secs),
                refresh_ttl,
            ),
            sessions: SessionStore::new(refresh_ttl),
        }
    }
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Plain message response used by the session endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Registers the bearer token scheme referenced by the protected endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::registration::register,
        crate::handlers::session::login,
        crate::handlers::session::logout,
        crate::handlers::session::refresh_token,
        crate::handlers::profile::get_profile,
        crate::handlers::profile::create_profile,
        crate::handlers::profile::update_profile,
        crate::handlers::profile::partial_update_profile,
        crate::handlers::videos::list_videos,
        crate::handlers::videos::create_video,
        crate::handlers::videos::update_video,
        crate::handlers::videos::partial_update_video,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            HealthResponse,
            FieldErrors,
            RegisterRequest,
            UserResponse,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            RefreshResponse,
            ProfilePayload,
            ProfileResponse,
            VideoPayload,
            VideoResponse,
            MethodEchoResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and session endpoints"),
        (name = "profile", description = "Profile of the authenticated user"),
        (name = "videos", description = "Videos of the authenticated user"),
    ),
    info(
        title = "Reelvault API",
        description = "User accounts with a personal profile and a list of video records",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
