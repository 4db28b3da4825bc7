use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::SubmitHeartRequest;
use crate::routes::{error_response, store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/hearts", web::post().to(submit_heart));
}

/// Heart submission endpoint
///
/// POST /api/v1/hearts
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "gender": "male|female|non-binary",
///   "targetGender": "male|female|non-binary|endhelum-madhi",
///   "pickupLine": "string",
///   "class": "string"
/// }
/// ```
async fn submit_heart(state: web::Data<AppState>, req: web::Json<SubmitHeartRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let submission = req.into_inner().into_new_submission();

    match state.submissions.insert(&submission).await {
        Ok(stored) => {
            tracing::info!("Heart submitted by {} ({})", stored.name, stored.class);
            HttpResponse::Created().json(stored)
        }
        Err(e) => {
            tracing::error!("Error submitting heart: {}", e);
            store_error_response("Failed to submit heart", &e)
        }
    }
}
