use crate::infrastructure::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect, verify the connection, and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to PostgreSQL database at {}:{}", config.host, config.port);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.connection_url())
            .await
            .context("failed to open PostgreSQL pool")?;

        let database = Self { pool };
        database.health_check().await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&database.pool)
                .await
                .context("failed to apply migrations")?;
            info!("Database migrations applied");
        }

        Ok(database)
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _ = sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        if !self.pool.is_closed() {
            info!("Closing database connection pool");
            self.pool.close().await;
        }
    }
}
