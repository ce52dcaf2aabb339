use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{Config, ConfigError};
use ideaflow_api::DbState;

pub mod health;

/// CORS for the configured origin, or for any origin when none is set
pub fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match &config.cors_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?;
            Ok(cors.allow_origin(origin))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}

/// Full application router: health check plus the ideas API
pub fn create_router(db: DbState, config: &Config) -> Result<Router, ConfigError> {
    let router = Router::new()
        .route("/api/health", get(health::health_check))
        .merge(ideaflow_api::create_router(db))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config)?);

    Ok(router)
}
