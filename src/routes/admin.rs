use actix_web::{http::header, http::StatusCode, web, HttpResponse, Responder};

use crate::core::{export_filename, submissions_csv, SubmissionStats};
use crate::models::{DeleteResponse, SubmissionsResponse};
use crate::routes::{error_response, store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/hearts", web::get().to(list_submissions))
        .route("/admin/hearts", web::delete().to(delete_all_submissions))
        .route("/admin/hearts/export", web::get().to(export_submissions))
        .route("/admin/hearts/{id}", web::delete().to(delete_submission));
}

/// All submissions, newest first, with counts
///
/// GET /api/v1/admin/hearts
async fn list_submissions(state: web::Data<AppState>) -> impl Responder {
    match state.submissions.list().await {
        Ok(submissions) => {
            let today = chrono::Utc::now().date_naive();
            let stats = SubmissionStats::from_submissions(&submissions, today);
            HttpResponse::Ok().json(SubmissionsResponse { submissions, stats })
        }
        Err(e) => {
            tracing::error!("Error loading submissions: {}", e);
            store_error_response("Failed to fetch submissions", &e)
        }
    }
}

/// CSV download of all submissions
///
/// GET /api/v1/admin/hearts/export
async fn export_submissions(state: web::Data<AppState>) -> impl Responder {
    let submissions = match state.submissions.list().await {
        Ok(submissions) => submissions,
        Err(e) => {
            tracing::error!("Error loading submissions for export: {}", e);
            return store_error_response("Failed to fetch submissions", &e);
        }
    };

    let body = match submissions_csv(&submissions) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to render CSV export: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Export failed", e.to_string());
        }
    };

    let filename = export_filename(chrono::Utc::now().date_naive());
    tracing::info!("Exporting {} submissions as {}", submissions.len(), filename);

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body)
}

/// DELETE /api/v1/admin/hearts/{id}
async fn delete_submission(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.submissions.delete(&id).await {
        Ok(()) => {
            tracing::info!("Deleted submission {}", id);
            HttpResponse::Ok().json(DeleteResponse { success: true })
        }
        Err(e) => {
            tracing::error!("Error deleting submission {}: {}", id, e);
            store_error_response("Failed to delete submission", &e)
        }
    }
}

/// DELETE /api/v1/admin/hearts
async fn delete_all_submissions(state: web::Data<AppState>) -> impl Responder {
    match state.submissions.delete_all().await {
        Ok(()) => {
            tracing::warn!("All submissions deleted");
            HttpResponse::Ok().json(DeleteResponse { success: true })
        }
        Err(e) => {
            tracing::error!("Error deleting all submissions: {}", e);
            store_error_response("Failed to delete all submissions", &e)
        }
    }
}
