use super::connection::SeaOrmConnection;
use crate::config::DatabaseConfig;
use crate::storage::database::{ConnectionFactory, DbConnection};
use crate::utils::error::{ApiError, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;
use tracing::{debug, info};

/// Connection pool shared by all requests
#[derive(Debug, Clone)]
pub struct SeaOrmDatabase {
    db: DatabaseConnection,
    schema: Option<String>,
}

impl SeaOrmDatabase {
    /// Connect to PostgreSQL with the configured pool limits
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(config.sql_logging)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt).await.map_err(ApiError::Database)?;
        info!(
            max_connections = config.max_connections,
            "Database connection pool established"
        );

        Ok(Self {
            db,
            schema: config.schema.clone(),
        })
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");
        self.db
            .execute(Statement::from_string(self.db.get_database_backend(), "SELECT 1"))
            .await
            .map_err(ApiError::Database)?;
        debug!("Database health check passed");
        Ok(())
    }

    fn checkout(&self, read_only: bool) -> SeaOrmConnection {
        SeaOrmConnection::new(self.db.clone(), self.schema.clone(), read_only)
    }
}

impl ConnectionFactory for SeaOrmDatabase {
    fn connection(&self) -> Box<dyn DbConnection> {
        Box::new(self.checkout(false))
    }

    fn api_user_connection(&self) -> Box<dyn DbConnection> {
        Box::new(self.checkout(true))
    }
}
