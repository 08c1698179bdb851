//! PostgreSQL access through sea-orm
//!
//! The pool is owned by [`SeaOrmDatabase`]; each request gets a
//! [`SeaOrmConnection`] that holds one transaction at a time.

mod connection;
mod pool;

pub use connection::SeaOrmConnection;
pub use pool::SeaOrmDatabase;
