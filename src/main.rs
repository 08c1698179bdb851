//! BioHub API server
//!
//! Loads `config/api.yaml` (or defaults plus environment overrides) and serves the REST API.

#![allow(missing_docs)]

use biohub_rs::server;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    server::builder::run_server().await?;
    Ok(())
}
