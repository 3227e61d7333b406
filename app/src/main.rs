// In app/src/main.rs

use anyhow::Result;
use api_client::{KiteClient, KiteTicker, TelegramNotifier};
use clap::{Parser, Subcommand};
use database::JsonOrderStore;
use engine::{Engine, FeedTask};
use execution::{LiveExecutor, ModeGate, OrderDispatcher, SimulatedExecutor};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use web_server::AppState;

mod env_file;
mod report;

/// The dotenv entry `refresh-token` rewrites.
const ACCESS_TOKEN_VAR: &str = "APP_KITE__ACCESS_TOKEN";

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A moving-average crossover trading bot for Kite Connect.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the trading engine and the control server.
    Run,

    /// Exchanges a login request token for a fresh access token and stores it in `.env`.
    RefreshToken {
        /// The `request_token` from the Kite login redirect.
        #[arg(short, long)]
        request_token: String,
    },

    /// Emails an HTML summary of the most recent orders.
    Report,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = app_config::load_settings();
    let level = settings
        .as_ref()
        .ok()
        .and_then(|s| s.app.log_level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_target("tungstenite", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();

    let settings = settings?;
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    match cli.command {
        Commands::Run => run_app(settings).await,
        Commands::RefreshToken { request_token } => refresh_token(settings, &request_token).await,
        Commands::Report => run_report(settings).await,
    }
}

// --- "Run" Subcommand Logic ---

/// Wires every component together and runs until the feed or the server stops.
async fn run_app(settings: app_config::Settings) -> Result<()> {
    // --- 1. Initialization ---
    let live_config = app_config::load_live_config()?;
    tracing::info!(count = live_config.instruments.len(), "Instrument configuration loaded.");

    // --- 2. Component Instantiation ---
    let notifier = Arc::new(TelegramNotifier::new(&settings.telegram)?);
    if !notifier.is_configured() {
        tracing::warn!("Telegram is not configured; notifications will be skipped.");
    }
    let store = Arc::new(JsonOrderStore::new(&settings.storage.orders_path));
    let api_client = api_client::new(&settings.kite)?;

    let mode = ModeGate::new(settings.app.default_mode);
    if settings.app.default_mode == core_types::Mode::Live {
        tracing::warn!("LIVE TRADING IS ENABLED. REAL ORDERS WILL BE PLACED.");
    }

    let dispatcher = OrderDispatcher::new(
        Arc::new(SimulatedExecutor::new()),
        Arc::new(LiveExecutor::new(api_client)),
        store.clone(),
        notifier.clone(),
    );

    // --- 3. Create the Trading Engine ---
    let engine = Arc::new(Engine::new(live_config.instruments, mode, dispatcher)?);
    let feed = FeedTask::new(engine.clone(), KiteTicker::new(&settings.kite));

    // --- 4. Launch Concurrent Tasks ---
    tracing::info!("Launching concurrent feed and web server tasks...");

    let feed_handle = tokio::spawn(async move { feed.run().await });

    let app_state = AppState {
        engine,
        store,
        notifier,
    };
    let server_handle = tokio::spawn(async move { web_server::run(settings.server, app_state).await });

    // In a healthy state, neither should complete. If one does, it's likely an error.
    tokio::select! {
        feed_result = feed_handle => {
            tracing::error!(?feed_result, "Feed task has terminated unexpectedly.");
        }
        server_result = server_handle => {
            tracing::error!(?server_result, "Web server task has terminated unexpectedly.");
        }
    }

    anyhow::bail!("A critical task terminated. Shutting down.");
}

// --- "RefreshToken" Subcommand Logic ---

async fn refresh_token(settings: app_config::Settings, request_token: &str) -> Result<()> {
    let client = KiteClient::new(&settings.kite)?;
    let session = client.generate_session(request_token).await?;

    env_file::write_var(".env", ACCESS_TOKEN_VAR, &session.access_token)?;
    tracing::info!(user_id = ?session.user_id, "Access token refreshed and written to .env.");

    Ok(())
}

// --- "Report" Subcommand Logic ---

async fn run_report(settings: app_config::Settings) -> Result<()> {
    let store = JsonOrderStore::new(&settings.storage.orders_path);
    let orders = store.load_all().await?;
    tracing::info!(count = orders.len(), "Order history loaded for the report.");

    report::send_report(&settings.email, report::render_report(&orders)).await
}
