//! # Blog API Server
//!
//! actix-web front end for the blog services. The binary in `main.rs` only
//! loads configuration and starts the server; everything mountable lives here
//! so tests can build the same app.

pub mod config;
pub mod handlers;
pub mod mapper;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

use actix_web::{Error, HttpRequest, web};

use middleware::error::AppError;

/// Register extractor configuration and every route.
///
/// Bodies, query strings and path segments that fail to parse become 400
/// problem responses instead of actix's plain-text defaults.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| bad_request(err, req)))
        .app_data(web::QueryConfig::default().error_handler(|err, req| bad_request(err, req)))
        .app_data(web::PathConfig::default().error_handler(|err, req| bad_request(err, req)));

    handlers::configure_routes(cfg);
}

fn bad_request(err: impl std::fmt::Display, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected malformed request");
    AppError::BadRequest(err.to_string()).into()
}
