//! Storage layer: the relational database and the attachment object store

pub mod database;
pub mod files;

pub use database::{ConnectionFactory, DbConnection, SeaOrmDatabase, run_in_transaction};
pub use files::{AttachmentStore, FileStorage};
