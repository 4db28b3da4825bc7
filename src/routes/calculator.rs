use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{flames, CalculationStats};
use crate::models::{CalculateRequest, CalculateResponse, CompatibilityRecord, HistoryQuery, HistoryResponse};
use crate::routes::{error_response, store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/calculator", web::post().to(calculate))
        .route("/calculator/history", web::get().to(history));
}

/// Love calculator endpoint
///
/// POST /api/v1/calculator
///
/// Request body:
/// ```json
/// { "firstName": "string", "secondName": "string" }
/// ```
///
/// The score is returned even when it cannot be stored; `persisted` says
/// whether a store accepted it.
async fn calculate(state: web::Data<AppState>, req: web::Json<CalculateRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for calculate request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let first = req.first_name.trim();
    let second = req.second_name.trim();

    let record = CompatibilityRecord::compute(first, second);
    let fate = flames(first, second);

    let saved = state.calculations.save(&record).await;
    let (record, persisted) = match saved {
        Ok(stored) => (stored, true),
        Err(e) => {
            tracing::warn!("Calculation computed but not stored: {}", e);
            (record, false)
        }
    };

    tracing::info!(
        "Calculated {} for {} + {}",
        record.percentage(),
        record.first_name(),
        record.second_name()
    );

    let band = record.band();
    HttpResponse::Ok().json(CalculateResponse {
        message: band.label().to_string(),
        band,
        flames: fate,
        persisted,
        record,
    })
}

/// Calculation history, newest first
///
/// GET /api/v1/calculator/history?limit={n}
async fn history(state: web::Data<AppState>, query: web::Query<HistoryQuery>) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(state.history_limit)
        .min(state.history_limit);

    match state.calculations.list(limit).await {
        Ok(calculations) => {
            let stats = CalculationStats::from_records(&calculations);
            HttpResponse::Ok().json(HistoryResponse {
                average_display: stats.average_display(),
                calculations,
                stats,
            })
        }
        Err(e) => {
            tracing::error!("Failed to list calculations: {}", e);
            store_error_response("Failed to fetch calculations", &e)
        }
    }
}
