//! HTTP API handlers for Dermalens.
//!
//! Two analyze routes share one generator:
//!
//! - **POST /api/v1/analyze**: returns the full [`SkinReport`] envelope.
//! - **POST /analyze**: legacy shape, returns the bare result list.
//!
//! Both take a multipart upload with a `file` field and reject anything
//! whose content type is not `image/*` before touching the bytes. The side
//! endpoints (`/`, `/health`, `/info`) return static status payloads.
//!
//! [`router`] is the single source of truth for routes and middleware;
//! `main.rs` and the integration tests both build the app from it.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::analyzer::SkinAnalyzer;
use crate::config::ServiceConfig;
use crate::error::AnalysisError;
use crate::model::{AnalysisResult, ServiceInfo, SkinReport};

/// Maximum accepted upload size (16 MB, with multipart overhead headroom).
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SkinAnalyzer>,
    pub config: Arc<ServiceConfig>,
}

/// JSON error body returned alongside non-2xx statuses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Build the application router.
///
/// Used by both the binary and the integration tests so the wired routes
/// cannot drift between them.
pub fn router(state: AppState) -> Router {
    let analyze_v1 = format!("{}/analyze", state.config.api_prefix);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/info", get(service_info))
        .route("/analyze", post(analyze_legacy))
        .route(&analyze_v1, post(analyze_v1_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Service banner.
///
/// # Response
///
/// ```json
/// {"status": "online", "service": "Skin Analysis Service"}
/// ```
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": state.config.service_name,
    }))
}

/// GET /health - Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// GET /info - Service configuration summary.
///
/// Lets the frontend check whether it is talking to the mock generator or
/// a real model before rendering results.
///
/// # Response
///
/// ```json
/// {
///     "service": "Skin Analysis Service",
///     "mock_mode": true,
///     "api_version": "/api/v1",
///     "message": "MOCK MODE ACTIVE - Data is simulated"
/// }
/// ```
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let message = if state.config.mock_mode {
        "MOCK MODE ACTIVE - Data is simulated"
    } else {
        "PRODUCTION MODE - Using real ML model"
    };

    Json(ServiceInfo {
        service: state.config.service_name.clone(),
        mock_mode: state.config.mock_mode,
        api_version: state.config.api_prefix.clone(),
        message: message.to_string(),
    })
}

/// POST /api/v1/analyze - Analyze an uploaded skin image.
///
/// # Request
///
/// Multipart form with a `file` part carrying the image. The part's
/// content type must start with `image/`.
///
/// # Response
///
/// ```json
/// {
///     "overall_score": 62,
///     "results": [
///         {
///             "condition": "Sebum",
///             "score": {"value": 62, "level": "Moderate"},
///             "mask_base64": "iVBORw0...",
///             "overlay_color": "#0000ff"
///         }
///     ],
///     "is_mock": true
/// }
/// ```
#[instrument(skip(state, multipart))]
pub async fn analyze_v1_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SkinReport>, ApiError> {
    let file_bytes = extract_image_upload(multipart).await?;
    let report = run_analysis(&state, &file_bytes)?;
    Ok(Json(report))
}

/// POST /analyze - Legacy route shape: bare result list, no envelope.
///
/// Same validation and generator as the versioned route; only the response
/// body differs.
#[instrument(skip(state, multipart))]
pub async fn analyze_legacy(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<AnalysisResult>>, ApiError> {
    let file_bytes = extract_image_upload(multipart).await?;
    let report = run_analysis(&state, &file_bytes)?;
    Ok(Json(report.results))
}

/// Pull the image bytes out of the multipart form.
///
/// Rejects a non-`image/*` content type before reading the part body, so a
/// `text/plain` upload never reaches the decoder.
async fn extract_image_upload(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or("").to_string();
        if !content_type.starts_with("image/") {
            warn!(content_type = %content_type, "Rejected non-image upload");
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "File must be an image",
            ));
        }

        return match field.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(e) => {
                warn!(error = %e, "Failed to read upload bytes");
                Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "Failed to read file data",
                ))
            }
        };
    }

    Err(api_error(
        StatusCode::BAD_REQUEST,
        "Missing 'file' field in multipart form",
    ))
}

/// Run the analyzer and map core errors onto HTTP statuses.
fn run_analysis(state: &AppState, file_bytes: &[u8]) -> Result<SkinReport, ApiError> {
    let mut rng = rand::thread_rng();

    match state.analyzer.analyze(file_bytes, &mut rng) {
        Ok(report) => {
            info!(
                overall_score = report.overall_score,
                conditions = report.results.len(),
                is_mock = report.is_mock,
                "Analysis completed"
            );
            Ok(report)
        }
        Err(e @ AnalysisError::InvalidImage(_)) => {
            warn!(error = %e, "Rejected undecodable upload");
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e @ AnalysisError::NotImplemented) => {
            warn!("Analyze called with mock mode disabled and no model loaded");
            Err(api_error(StatusCode::NOT_IMPLEMENTED, e.to_string()))
        }
        Err(e) => {
            warn!(error = %e, "Analysis failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Analysis failed: {e}"),
            ))
        }
    }
}
