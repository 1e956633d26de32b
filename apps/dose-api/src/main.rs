//! Dose API Server - daily dose reminders over HTTP
//!
//! Provides REST endpoints for:
//! - Reading and replacing the full schedule
//! - Listing items that are due and not yet taken
//! - Marking an item as taken
//!
//! The whole schedule lives in one JSON file. Completion flags are cleared once
//! a day, the first time the due list is requested before the earliest
//! scheduled time.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, put},
    Router,
};
use clap::Parser;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;

use api::{
    handle_due, handle_get_settings, handle_health, handle_mark_taken, handle_replace_settings,
};
use state::AppState;

#[cfg(windows)]
const DEFAULT_SETTINGS_PATH: &str = "C:\\temp\\settings.json";
#[cfg(not(windows))]
const DEFAULT_SETTINGS_PATH: &str = "/tmp/settings.json";

/// Command-line arguments for the dose API server
#[derive(Parser, Debug)]
#[command(name = "dose-api")]
#[command(about = "Daily dose schedule and reminder server")]
struct Args {
    /// Path of the JSON schedule file
    #[arg(long, env = "DT_SETTINGS_FILE_PATH", default_value = DEFAULT_SETTINGS_PATH)]
    settings_path: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "DT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Request timeout in seconds
    #[arg(long, env = "DT_TIMEOUT_SECS", default_value = "15")]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the router with all routes and middleware
pub fn build_router(state: Arc<AppState>, timeout: Duration) -> Router {
    Router::new()
        // Liveness probe
        .route("/api/v1", get(handle_health).post(handle_health))
        // Schedule endpoints
        .route(
            "/api/v1/drugs/settings",
            get(handle_get_settings).post(handle_replace_settings),
        )
        .route("/api/v1/drugs", get(handle_due))
        .route("/api/v1/drugs/:person_name/:drug_name", put(handle_mark_taken))
        // Add middleware
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_level.into())
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Initializing dose API...");
    let state = Arc::new(AppState::new(args.settings_path));

    let app = build_router(state, Duration::from_secs(args.timeout_secs));

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Request timeout: {}s", args.timeout_secs);

    axum::serve(listener, app).await?;

    Ok(())
}
