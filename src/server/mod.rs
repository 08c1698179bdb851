//! HTTP server and routing

pub mod authorize;
pub mod builder;
pub mod extractors;
mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod tests;

pub use server::{HttpServer, create_app};
pub use state::AppState;
