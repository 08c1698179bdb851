//! In-memory connection that replays scripted results
//!
//! Used by unit and integration tests to drive services and handlers without a
//! database. Every call is recorded so tests can assert on the exact
//! open/query/commit/rollback/release sequence.

use super::connection::{ConnectionFactory, DbConnection, QueryResponse, SqlStatement};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::sync::Arc;

/// One observed call on a [`RecordingConnection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCall {
    Open,
    Query(String),
    Commit,
    Rollback,
    Release,
}

#[derive(Debug)]
enum Scripted {
    Rows(QueryResponse),
    Fail(String),
}

#[derive(Debug, Default)]
struct Recording {
    calls: Vec<ConnectionCall>,
    statements: Vec<SqlStatement>,
    script: VecDeque<Scripted>,
    fail_open: bool,
    fail_commit: bool,
}

/// Scripted fake connection. Clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnection {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next query
    pub fn with_rows(self, rows: Vec<JsonValue>) -> Self {
        self.inner
            .lock()
            .script
            .push_back(Scripted::Rows(QueryResponse::from_rows(rows)));
        self
    }

    /// Queue a query that returns no rows
    pub fn with_empty(self) -> Self {
        self.with_rows(Vec::new())
    }

    /// Queue a query that fails
    pub fn with_query_error(self, message: &str) -> Self {
        self.inner
            .lock()
            .script
            .push_back(Scripted::Fail(message.to_string()));
        self
    }

    pub fn failing_open(self) -> Self {
        self.inner.lock().fail_open = true;
        self
    }

    pub fn failing_commit(self) -> Self {
        self.inner.lock().fail_commit = true;
        self
    }

    pub fn calls(&self) -> Vec<ConnectionCall> {
        self.inner.lock().calls.clone()
    }

    /// Statements executed so far, in order
    pub fn statements(&self) -> Vec<SqlStatement> {
        self.inner.lock().statements.clone()
    }

    pub fn count(&self, call: &ConnectionCall) -> usize {
        self.inner.lock().calls.iter().filter(|c| *c == call).count()
    }

    /// Number of queued results not yet consumed
    pub fn remaining(&self) -> usize {
        self.inner.lock().script.len()
    }
}

#[async_trait]
impl DbConnection for RecordingConnection {
    async fn open(&mut self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.calls.push(ConnectionCall::Open);
        if inner.fail_open {
            return Err(ApiError::internal("connection refused"));
        }
        Ok(())
    }

    async fn query(&mut self, statement: &SqlStatement) -> Result<QueryResponse> {
        let mut inner = self.inner.lock();
        inner
            .calls
            .push(ConnectionCall::Query(statement.text().to_string()));
        inner.statements.push(statement.clone());
        match inner.script.pop_front() {
            Some(Scripted::Rows(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(ApiError::Database(sea_orm::DbErr::Custom(message))),
            None => Ok(QueryResponse::default()),
        }
    }

    async fn commit(&mut self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.calls.push(ConnectionCall::Commit);
        if inner.fail_commit {
            return Err(ApiError::internal("commit failed"));
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.inner.lock().calls.push(ConnectionCall::Rollback);
        Ok(())
    }

    fn release(&mut self) {
        self.inner.lock().calls.push(ConnectionCall::Release);
    }
}

/// Factory handing out clones of one [`RecordingConnection`]
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    pub connection: RecordingConnection,
}

impl RecordingFactory {
    pub fn new(connection: RecordingConnection) -> Self {
        Self { connection }
    }
}

impl ConnectionFactory for RecordingFactory {
    fn connection(&self) -> Box<dyn DbConnection> {
        Box::new(self.connection.clone())
    }

    fn api_user_connection(&self) -> Box<dyn DbConnection> {
        Box::new(self.connection.clone())
    }
}
