// Route exports
pub mod admin;
pub mod calculator;
pub mod hearts;
pub mod results;

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{CalculationStore, MatchResultStore, StoreError, SubmissionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<dyn SubmissionStore>,
    pub match_results: Arc<dyn MatchResultStore>,
    pub calculations: Arc<dyn CalculationStore>,
    /// Upper bound on calculation history returned in one response
    pub history_limit: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(calculator::configure)
            .configure(hearts::configure)
            .configure(admin::configure)
            .configure(results::configure),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

/// Map a storage failure onto an HTTP error
pub(crate) fn store_error_response(error: &str, e: &StoreError) -> HttpResponse {
    let status = match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Request(_) | StoreError::Api { .. } | StoreError::InvalidResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        StoreError::Io(_) | StoreError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error_response(status, error, e.to_string())
}
