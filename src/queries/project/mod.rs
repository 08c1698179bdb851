//! Project queries

pub mod create;
pub mod delete;
pub mod publish;
pub mod update;
pub mod view;
