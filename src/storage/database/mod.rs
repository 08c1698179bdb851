//! Database access
//!
//! Everything above this module talks to the database through the
//! [`DbConnection`] trait and the [`run_in_transaction`] wrapper.

mod connection;
pub mod seaorm_db;
pub mod testing;
mod transaction;

pub use connection::{ConnectionFactory, DbConnection, QueryResponse, SqlStatement};
pub use seaorm_db::{SeaOrmConnection, SeaOrmDatabase};
pub use transaction::{TransactionState, run_in_transaction};
