//! Connection abstraction used by every request
//!
//! A [`DbConnection`] wraps a single pooled connection for the lifetime of one
//! request. Handlers never talk to the pool directly; they receive a
//! connection from a [`ConnectionFactory`] and drive it through
//! [`run_in_transaction`](super::run_in_transaction).

use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::{DbBackend, Statement, Value};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Parameterized SQL text plus its bound values
///
/// Placeholders use the PostgreSQL `$n` form. Values are never interpolated
/// into the text.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    text: String,
    values: Vec<Value>,
}

impl SqlStatement {
    /// Statement with no bound values yet
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            values: Vec::new(),
        }
    }

    /// Statement whose text already contains `$1..$n` placeholders
    pub fn with_values(text: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            values,
        }
    }

    /// Append raw SQL text
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.text.push_str(sql);
        self
    }

    /// Bind a value and append its placeholder
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.values.push(value.into());
        let placeholder = format!("${}", self.values.len());
        self.text.push_str(&placeholder);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Convert into a sea-orm statement for execution
    pub fn to_statement(&self, backend: DbBackend) -> Statement {
        Statement::from_sql_and_values(backend, self.text.clone(), self.values.clone())
    }
}

/// Rows returned by a statement, one JSON object per row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub rows: Vec<JsonValue>,
    pub row_count: u64,
}

impl QueryResponse {
    pub fn from_rows(rows: Vec<JsonValue>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn first(&self) -> Option<&JsonValue> {
        self.rows.first()
    }

    /// Deserialize the first row, if any
    pub fn first_as<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.rows.first().map(decode_row).transpose()
    }

    /// Deserialize every row
    pub fn rows_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows.iter().map(decode_row).collect()
    }

    /// Integer column of the first row, typically a `RETURNING id`
    pub fn first_i64(&self, column: &str) -> Option<i64> {
        self.rows.first().and_then(|row| row.get(column)).and_then(JsonValue::as_i64)
    }
}

/// A row that does not fit its type is a server fault, never the client's
fn decode_row<T: DeserializeOwned>(row: &JsonValue) -> Result<T> {
    serde_json::from_value(row.clone()).map_err(|e| ApiError::row_decode(std::any::type_name::<T>(), e))
}

/// A single database connection checked out for one request
#[async_trait]
pub trait DbConnection: Send {
    /// Acquire a connection and begin a transaction
    async fn open(&mut self) -> Result<()>;

    /// Execute a statement inside the open transaction
    async fn query(&mut self, statement: &SqlStatement) -> Result<QueryResponse>;

    async fn commit(&mut self) -> Result<()>;

    async fn rollback(&mut self) -> Result<()>;

    /// Return the connection to the pool. Safe to call in any state.
    fn release(&mut self);
}

/// Hands out per-request connections
pub trait ConnectionFactory: Send + Sync {
    /// Connection acting on behalf of an authenticated user
    fn connection(&self) -> Box<dyn DbConnection>;

    /// Read-only connection for unauthenticated public routes
    fn api_user_connection(&self) -> Box<dyn DbConnection>;
}
