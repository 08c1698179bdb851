//! Utility modules shared across the API

pub mod error;
pub mod logging;
