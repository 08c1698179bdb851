use crate::storage::database::{DbConnection, QueryResponse, SqlStatement};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, FromQueryResult,
    JsonValue, Statement, TransactionTrait,
};
use tracing::debug;

/// One request's view of the pool: at most one open transaction
pub struct SeaOrmConnection {
    pool: DatabaseConnection,
    schema: Option<String>,
    read_only: bool,
    transaction: Option<DatabaseTransaction>,
}

impl SeaOrmConnection {
    pub fn new(pool: DatabaseConnection, schema: Option<String>, read_only: bool) -> Self {
        Self {
            pool,
            schema,
            read_only,
            transaction: None,
        }
    }

    fn transaction(&self) -> Result<&DatabaseTransaction> {
        self.transaction
            .as_ref()
            .ok_or_else(|| ApiError::internal("Database connection is not open"))
    }
}

#[async_trait]
impl DbConnection for SeaOrmConnection {
    async fn open(&mut self) -> Result<()> {
        if self.transaction.is_some() {
            return Err(ApiError::internal("Database connection is already open"));
        }

        let access_mode = if self.read_only {
            AccessMode::ReadOnly
        } else {
            AccessMode::ReadWrite
        };
        let transaction = self.pool.begin_with_config(None, Some(access_mode)).await?;

        if let Some(schema) = &self.schema {
            let search_path = format!("{},public", schema);
            transaction
                .execute(Statement::from_sql_and_values(
                    transaction.get_database_backend(),
                    "SELECT set_config('search_path', $1, true)",
                    [search_path.into()],
                ))
                .await?;
        }

        debug!(read_only = self.read_only, "Database transaction opened");
        self.transaction = Some(transaction);
        Ok(())
    }

    async fn query(&mut self, statement: &SqlStatement) -> Result<QueryResponse> {
        let transaction = self.transaction()?;
        let rows = JsonValue::find_by_statement(
            statement.to_statement(transaction.get_database_backend()),
        )
        .all(transaction)
        .await?;

        debug!(rows = rows.len(), "Statement executed");
        Ok(QueryResponse::from_rows(rows))
    }

    async fn commit(&mut self) -> Result<()> {
        let transaction = self
            .transaction
            .take()
            .ok_or_else(|| ApiError::internal("Database connection is not open"))?;
        transaction.commit().await?;
        debug!("Database transaction committed");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        if let Some(transaction) = self.transaction.take() {
            transaction.rollback().await?;
            debug!("Database transaction rolled back");
        }
        Ok(())
    }

    fn release(&mut self) {
        // Dropping an uncommitted transaction rolls it back and returns the
        // underlying connection to the pool.
        if self.transaction.take().is_some() {
            debug!("Released connection with an unfinished transaction");
        }
    }
}
