use anyhow::Result;
use ::config::{Config, Environment};
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::schemas::AppState;

/// Signing secret used when `JWT_SECRET` is not configured. Only suitable for local development.
pub const DEVELOPMENT_JWT_SECRET: &str = "reelvault-development-secret";

/// Runtime configuration, layered from defaults and environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Database URL, e.g. `sqlite://reelvault.db?mode=rwc` or `postgresql://user:pw@host/db`
    pub database_url: String,
    /// Address the HTTP server binds to, `IP:PORT`
    pub bind_address: String,
    /// HMAC secret for signing access and refresh tokens
    pub jwt_secret: String,
    /// Lifetime of access tokens in seconds
    pub access_token_ttl_secs: u64,
    /// Lifetime of refresh tokens and of the login session in seconds
    pub refresh_token_ttl_secs: u64,
    /// bcrypt cost factor for password hashes
    pub password_hash_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://reelvault.db?mode=rwc".to_string(),
            bind_address: "0.0.0.0:3000".to_string(),
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            access_token_ttl_secs: 5 * 60,
            refresh_token_ttl_secs: 24 * 60 * 60,
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment on top of the defaults.
    ///
    /// Recognised variables: `DATABASE_URL`, `BIND_ADDRESS`, `JWT_SECRET`,
    /// `ACCESS_TOKEN_TTL_SECS`, `REFRESH_TOKEN_TTL_SECS`, `PASSWORD_HASH_COST`.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("access_token_ttl_secs", defaults.access_token_ttl_secs as i64)?
            .set_default("refresh_token_ttl_secs", defaults.refresh_token_ttl_secs as i64)?
            .set_default("password_hash_cost", defaults.password_hash_cost as i64)?
            .add_source(Environment::default())
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        if config.jwt_secret == DEVELOPMENT_JWT_SECRET {
            warn!("JWT_SECRET is not set, falling back to the development secret");
        }
        debug!("Loaded configuration for database {}", config.database_url);
        Ok(config)
    }

    /// Apply command line overrides for the database URL and bind address.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }
}

/// Initialize application state with the configured database
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    Ok(AppState::new(db, config))
}
