// numpick - Web Server
// JSON API over the same recommender the CLI uses

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use clap::Parser;
use numpick::{Code, Error, FilterArgs, FilterCriteria, Recommender, StorageArgs, DEFAULT_GENERATE_COUNT};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "numpick-server", version, about = "HTTP API for the 5-digit code recommender")]
struct ServerArgs {
    #[command(flatten)]
    storage: StorageArgs,

    /// Address to listen on
    #[arg(long, env = "NUMPICK_BIND", default_value = "127.0.0.1:3000")]
    bind: String,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    // Serializes read-filter-append within this process only
    recommender: Arc<Mutex<Recommender>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response()
    }
}

/// Map a core error onto a status code and an error body
fn error_response(err: Error) -> Response {
    let status = match &err {
        Error::EmptyAfterHistoryOrSequentialFilter | Error::EmptyAfterAttributeFilter => {
            StatusCode::CONFLICT
        }
        Error::InvalidCount(_) | Error::InvalidFilter(_) | Error::UnknownLanguage(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

/// POST /api/generate body
#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(default = "default_count")]
    count: usize,
    #[serde(default)]
    criteria: FilterCriteria,
}

fn default_count() -> usize {
    DEFAULT_GENERATE_COUNT
}

#[derive(Serialize)]
struct HistoryResponse {
    total: usize,
    codes: Vec<Code>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    ApiResponse::ok("OK")
}

/// GET /api/candidates?digits=..&magnitude=..&parity=.. - Stage counts and candidates
async fn get_candidates(State(state): State<AppState>, Query(filters): Query<FilterArgs>) -> Response {
    let criteria = match filters.to_criteria() {
        Ok(criteria) => criteria,
        Err(e) => return error_response(e),
    };

    let recommender = state.recommender.lock().unwrap_or_else(|p| p.into_inner());
    match recommender.evaluate(&criteria) {
        Ok(report) => ApiResponse::ok(report),
        Err(e) => error_response(e),
    }
}

/// POST /api/generate - Draw codes and append them to history
async fn generate(State(state): State<AppState>, Json(request): Json<GenerateRequest>) -> Response {
    let recommender = state.recommender.lock().unwrap_or_else(|p| p.into_inner());
    let mut rng = rand::thread_rng();

    match recommender.generate(&request.criteria, request.count, &mut rng) {
        Ok(generation) => {
            info!("Served {} generated codes", generation.selection.len());
            ApiResponse::ok(generation)
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/history - Saved selections
async fn get_history(State(state): State<AppState>) -> Response {
    let recommender = state.recommender.lock().unwrap_or_else(|p| p.into_inner());
    match recommender.load_history() {
        Ok(history) => ApiResponse::ok(HistoryResponse {
            total: history.len(),
            codes: history.codes().to_vec(),
        }),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/history - Remove the history file
async fn clear_history(State(state): State<AppState>) -> Response {
    let recommender = state.recommender.lock().unwrap_or_else(|p| p.into_inner());
    match recommender.clear_history() {
        Ok(()) => ApiResponse::ok("cleared"),
        Err(e) => error_response(e),
    }
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/candidates", get(get_candidates))
        .route("/generate", axum::routing::post(generate))
        .route("/history", get(get_history).delete(clear_history))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ServerArgs::parse();
    info!("Starting numpick-server v{}", numpick::VERSION);

    let recommender = args.storage.recommender();

    // Missing pool halts before serving anything
    let report = recommender.evaluate(&FilterCriteria::default())?;
    info!(
        "Pool {}: {} codes, {} available",
        recommender.pool_path().display(),
        report.pool_total,
        report.after_attributes
    );

    let state = AppState {
        recommender: Arc::new(Mutex::new(recommender)),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("numpick-server listening on http://{}", args.bind);
    info!("Candidates: http://{}/api/candidates", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
