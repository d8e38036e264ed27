// In crates/web-server/src/lib.rs

use std::sync::Arc;

use app_config::ServerSettings;
use axum::{extract::State, response::Json, routing::get, Router};
use tokio::net::TcpListener;
use tracker::{TrackReport, Tracker};

pub mod error;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // The endpoint is read-only, so any origin may call it.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/track", get(track_handler))
        .route("/health", get(health_check_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /track`.
///
/// Runs one full cycle and answers with the report as soon as it exists;
/// the alert, if any, is still in flight.
async fn track_handler(State(state): State<AppState>) -> Result<Json<TrackReport>> {
    let outcome = state.tracker.track().await?;
    Ok(Json(outcome.report))
}

/// Binds the configured address and serves the router until the process
/// is terminated.
pub async fn run(settings: ServerSettings, tracker: Arc<Tracker>) -> Result<()> {
    let app = create_router(AppState { tracker });

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on {}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::Serve)
}
