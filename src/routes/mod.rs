//! Router assembly: common routes, `/api` resources, and the tower-http layers.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router with CORS, body limit and request tracing.
pub fn build_router(state: AppState, config: &AppConfig) -> Result<Router, ConfigError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);
    let cors = match &config.cors_origin {
        Some(origin) => {
            let value = HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                key: "CORS_ORIGIN",
                value: origin.clone(),
            })?;
            cors.allow_origin(value)
        }
        None => cors.allow_origin(Any),
    };

    Ok(Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
