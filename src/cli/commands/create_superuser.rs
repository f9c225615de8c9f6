use anyhow::Result;
use model::{ExtraFields, UserManager};
use sea_orm::Database;
use tracing::{debug, error, info, trace};

use crate::config::AppConfig;

/// Create a superuser account in the configured database
pub async fn create_superuser(config: &AppConfig, email: &str, password: &str) -> Result<()> {
    trace!("Entering create_superuser function");
    debug!("Database URL: {}", config.database_url);

    let db = Database::connect(&config.database_url).await?;
    let manager = UserManager::new(config.password_hash_cost);

    match manager
        .create_superuser(&db, email, password, ExtraFields::default())
        .await
    {
        Ok(user) => {
            info!("Superuser {} created with ID {}", user.email, user.id);
            Ok(())
        }
        Err(e) => {
            error!("Failed to create superuser {}: {}", email, e);
            Err(e.into())
        }
    }
}
