//! Per-request transaction wrapper

use super::connection::DbConnection;
use crate::utils::error::Result;
use futures::future::BoxFuture;
use tracing::{debug, error};

/// Lifecycle of the transaction wrapped around one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    Open,
    Committed,
    RolledBack,
    Released,
}

fn advance(state: &mut TransactionState, next: TransactionState) {
    debug!(from = ?*state, to = ?next, "transaction state");
    *state = next;
}

/// Run `operations` inside a transaction on `connection`
///
/// On success the transaction is committed and the connection released, each
/// exactly once. If an operation or the commit fails, the transaction is
/// rolled back once, the connection is released once and the original error
/// is returned. If the connection cannot be opened it is released and the
/// error returned without a rollback. Nothing is retried.
///
/// ```rust,ignore
/// let id = run_in_transaction(connection.as_mut(), move |conn| {
///     Box::pin(async move { project_service::update_publish_status(conn, project_id, true).await })
/// })
/// .await?;
/// ```
pub async fn run_in_transaction<T, F>(connection: &mut dyn DbConnection, operations: F) -> Result<T>
where
    F: for<'c> FnOnce(&'c mut dyn DbConnection) -> BoxFuture<'c, Result<T>>,
{
    let mut state = TransactionState::Idle;

    if let Err(e) = connection.open().await {
        error!("Failed to open database connection: {}", e);
        connection.release();
        advance(&mut state, TransactionState::Released);
        return Err(e);
    }
    advance(&mut state, TransactionState::Open);

    let outcome = match operations(&mut *connection).await {
        Ok(value) => connection.commit().await.map(|()| value),
        Err(e) => Err(e),
    };

    let result = match outcome {
        Ok(value) => {
            advance(&mut state, TransactionState::Committed);
            Ok(value)
        }
        Err(e) => {
            error!("Rolling back transaction: {}", e);
            if let Err(rollback_error) = connection.rollback().await {
                error!("Rollback failed: {}", rollback_error);
            }
            advance(&mut state, TransactionState::RolledBack);
            Err(e)
        }
    };

    connection.release();
    advance(&mut state, TransactionState::Released);
    result
}
