// In crates/web-server/src/lib.rs

use app_config::types::ServerSettings;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use core_types::{Mode, Notifier};
use database::JsonOrderStore;
use engine::{Engine, StatusSnapshot};
use std::sync::Arc;
use tokio::net::TcpListener;
use types::{HistoryResponse, ModeRequest, ModeResponse, ModeSwitched};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub store: Arc<JsonOrderStore>,
    pub notifier: Arc<dyn Notifier>,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // The dashboard is served from a different origin.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/health", get(health_check_handler))
        .route("/status", get(status_handler))
        .route("/mode", get(get_mode_handler).post(set_mode_handler))
        .route("/history", get(history_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// `GET /status`: positions, last prices, mode and trends from one snapshot.
async fn status_handler(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.engine.status().await)
}

async fn get_mode_handler(State(state): State<AppState>) -> Json<ModeResponse> {
    Json(ModeResponse {
        mode: state.engine.mode(),
    })
}

/// `POST /mode`. Anything but `"paper"` or `"live"` leaves the mode untouched.
async fn set_mode_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ModeRequest>, JsonRejection>,
) -> Result<Json<ModeSwitched>> {
    let requested = match payload {
        Ok(Json(ModeRequest { mode: Some(mode) })) => mode,
        Ok(Json(ModeRequest { mode: None })) => return Err(Error::InvalidMode("<missing>".to_string())),
        Err(rejection) => return Err(Error::InvalidMode(rejection.body_text())),
    };
    let mode: Mode = requested.parse().map_err(|_| Error::InvalidMode(requested))?;

    state.engine.set_mode(mode);

    let notifier = state.notifier.clone();
    let text = format!("⚡ Mode switched to: {} MODE", mode.as_str().to_uppercase());
    tokio::spawn(async move { notifier.notify(&text).await });

    Ok(Json(ModeSwitched {
        success: true,
        mode,
    }))
}

/// `GET /history`: every recorded order, oldest first.
async fn history_handler(State(state): State<AppState>) -> Result<Json<HistoryResponse>> {
    let orders = state.store.load_all().await?;
    Ok(Json(HistoryResponse { orders }))
}

/// The main entry point for running the web server.
///
/// Runs until the process is terminated; failing to bind the address is fatal.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on {}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)?;

    Ok(())
}
