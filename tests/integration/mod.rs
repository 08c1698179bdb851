//! Integration tests for biohub-rs
//!
//! Requests go through the real actix application; only the database
//! connection and the object store are replaced.

pub mod attachment_routes_tests;
pub mod authorization_tests;
pub mod config_tests;
pub mod permit_routes_tests;
pub mod project_routes_tests;
pub mod public_routes_tests;
pub mod survey_routes_tests;
