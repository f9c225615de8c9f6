use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info, instrument};

/// Apply the migrations `db` has not seen yet and return their names, oldest first
pub async fn apply_migrations(db: &DatabaseConnection) -> Result<Vec<String>> {
    let pending: Vec<String> = Migrator::get_pending_migrations(db)
        .await
        .context("failed to read migration status")?
        .iter()
        .map(|migration| migration.name().to_string())
        .collect();

    if pending.is_empty() {
        info!("Account schema is up to date");
        return Ok(pending);
    }

    for name in &pending {
        debug!("Pending migration {}", name);
    }
    Migrator::up(db, None)
        .await
        .context("failed to apply account migrations")?;
    info!("Applied {} migration(s)", pending.len());

    Ok(pending)
}

/// Connect to `database_url` and bring the account schema up to date
#[instrument]
pub async fn init_database(database_url: &str) -> Result<()> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("failed to connect to database '{}'", database_url))?;

    apply_migrations(&db).await?;
    info!("Database initialization completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_migrations_runs_each_once() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        let applied = apply_migrations(&db).await.unwrap();
        assert_eq!(applied.len(), Migrator::migrations().len());
        assert!(applied.iter().any(|name| name.contains("create_accounts")));

        assert!(apply_migrations(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_database_reports_bad_url() {
        let err = init_database("not-a-database://nowhere").await.unwrap_err();
        assert!(err.to_string().contains("failed to connect"));
    }
}
