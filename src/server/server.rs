//! HTTP server core

use crate::auth::JwtVerifier;
use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::handlers::{health_check, version};
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::{FileStorage, SeaOrmDatabase};
use crate::utils::error::{ApiError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Connect to the database and object store and build the shared state
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let database = SeaOrmDatabase::new(config.database()).await?;
        if let Err(e) = database.health_check().await {
            warn!("Database health check failed at startup: {}", e);
        }

        let files = FileStorage::new(config.object_storage()).await?;
        let jwt = JwtVerifier::new(config.auth()).await?;

        let state = AppState::new(config.clone(), Arc::new(database), jwt, Arc::new(files));

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Start the HTTP server and wait for shutdown
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| ApiError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        server
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// The actix application with middleware and every route
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = build_cors(&state.config.server().cors);
    let json_config = web::JsonConfig::default()
        .limit(state.config.server().max_body_size)
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into());

    App::new()
        .app_data(state)
        .app_data(json_config)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .wrap(RequestIdMiddleware)
        .wrap(DefaultHeaders::new().add(("Server", "BioHub-RS")))
        .route("/health", web::get().to(health_check))
        .route("/api/version", web::get().to(version))
        .configure(routes::configure_routes)
}

fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default();

    if config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<actix_web::http::Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    cors = cors.allow_any_header().max_age(config.max_age as usize);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
