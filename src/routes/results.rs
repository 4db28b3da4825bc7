use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::flames;
use crate::models::{MatchLookupQuery, MatchLookupResponse};
use crate::routes::{error_response, store_error_response, AppState};

const NO_MATCH_MESSAGE: &str = "No match found. You may not have been paired this Valentine's Day, but your love story is just beginning!";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/results", web::get().to(lookup_match));
}

/// Reveal the pre-seeded pairing for a visitor
///
/// GET /api/v1/results?name={name}&class={class}
async fn lookup_match(state: web::Data<AppState>, query: web::Query<MatchLookupQuery>) -> impl Responder {
    if query.validate().is_err() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "Please enter your name and class",
        );
    }

    match state.match_results.find(&query.name, &query.class).await {
        Ok(Some(result)) => {
            let fate = flames(&result.name, &result.match_name);
            HttpResponse::Ok().json(MatchLookupResponse { result, fate })
        }
        Ok(None) => error_response(StatusCode::NOT_FOUND, "No match found", NO_MATCH_MESSAGE),
        Err(e) => {
            tracing::error!("Error searching match for {}: {}", query.name.trim(), e);
            store_error_response("Failed to search match", &e)
        }
    }
}
