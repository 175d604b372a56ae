//! Dermalens - a mock skin-analysis HTTP service.
//!
//! # Overview
//!
//! Accepts an uploaded skin image and returns a simulated analysis report:
//! a fixed catalog of conditions (Sebum, Pore, Wrinkle, Acne, ...), each
//! with a random severity score, a tier label, and a random blob mask
//! encoded as base64 PNG. No real inference happens; the real-model path
//! fails with 501 until one is wired in.
//!
//! # API Endpoints
//!
//! - `POST /api/v1/analyze` - Analyze an uploaded image (full report)
//! - `POST /analyze` - Legacy shape (bare result list)
//! - `GET /info` - Service configuration summary
//! - `GET /health` - Health check
//! - `GET /` - Service banner

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dermalens::analyzer::{AnalyzerConfig, SkinAnalyzer};
use dermalens::api::{AppState, router};
use dermalens::config::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("dermalens=info".parse()?))
        .init();

    // Load configuration from environment
    let config = ServiceConfig::from_env();
    let port = config.port;

    info!(port, mock_mode = config.mock_mode, "Starting Dermalens server");

    let analyzer = SkinAnalyzer::new(AnalyzerConfig::default(), config.mock_mode);

    // Create application state
    let state = AppState {
        analyzer: Arc::new(analyzer),
        config: Arc::new(config.clone()),
    };

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Dermalens is listening");
    if config.mock_mode {
        info!("Analysis mode: MOCK (simulated scores and masks)");
    } else {
        info!("Analysis mode: REAL (analyze requests will fail until a model is loaded)");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
