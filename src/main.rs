use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tinker_hearts::config::{LoggingSettings, Settings};
use tinker_hearts::routes::{self, AppState};
use tinker_hearts::services::{
    FallbackCalculationStore, LocalCalculationStore, MemoryStore, SupabaseClient, SupabaseTables,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// RUST_LOG wins over the configured level when set
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

fn build_state(settings: &Settings) -> std::io::Result<AppState> {
    let local = LocalCalculationStore::new(&settings.storage.local_calculations_path);
    let history_limit = settings.storage.history_limit;

    if !settings.supabase.is_configured() {
        warn!("Supabase is not configured, submissions and results are kept in memory");
        let memory = Arc::new(MemoryStore::new());
        return Ok(AppState {
            submissions: memory.clone(),
            match_results: memory,
            calculations: Arc::new(local),
            history_limit,
        });
    }

    let tables = SupabaseTables {
        submissions: settings.supabase.tables.submissions.clone(),
        match_results: settings.supabase.tables.match_results.clone(),
        calculations: settings.supabase.tables.calculations.clone(),
    };

    let remote = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.api_key.clone(),
        tables,
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    info!(
        "Supabase client initialized (local fallback: {})",
        settings.storage.local_calculations_path
    );

    let remote = Arc::new(remote);
    Ok(AppState {
        submissions: remote.clone(),
        match_results: remote.clone(),
        calculations: Arc::new(FallbackCalculationStore::new(remote.as_ref().clone(), local)),
        history_limit,
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);
    info!("Starting Tinker Hearts service...");

    let app_state = build_state(&settings)?;

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
