//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] installs the tracing subscriber, loads and validates
//! [`Config`], builds the Sui adapters and serves [`create_router`].

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, Request, Response},
    routing::{get, post},
    Router,
};
use lib_core::{Config, RunMode};
use lib_sui::SuiState;
use lib_utils::get_env_or;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Span};

use crate::handlers;
use crate::middleware::{log_requests, map_res, mw_req_stamp::request_id, stamp_req};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sui: SuiState,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SuiState {
    fn from_ref(state: &AppState) -> Self {
        state.sui.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind host; the port comes from `PORT`
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Filter directive for a `LOG_LEVEL` value; unknown levels fall back to `info`.
fn log_level_directive(raw: &str) -> String {
    let level = raw.trim().to_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info".to_string(),
    }
}

/// Install the global tracing subscriber, filtered by `LOG_LEVEL` (default `info`).
fn init_tracing() -> anyhow::Result<String> {
    let log_level = log_level_directive(&get_env_or("LOG_LEVEL", "info"));
    let filter = tracing_subscriber::EnvFilter::new(&log_level);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .with_file(true)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration is malformed or fails validation
/// - An HTTP client cannot be built
/// - Server binding fails
pub async fn start_server(server: ServerConfig) -> anyhow::Result<()> {
    // LOG_LEVEL may live in .env
    dotenvy::dotenv().ok();
    let log_level = init_tracing()?;

    info!(" SUITENT BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!(" Connecting to Sui {}...", config.network);
    let sui = SuiState::new(&config)?;

    let bind_address = format!("{}:{}", server.host, config.port);
    let state = AppState {
        config: config.clone(),
        sui,
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info(&config);

    // ConnectInfo is required by the WebSocket handler
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

/// Create the application router with all routes and layers.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.frontend_url);
    let run_mode: RunMode = state.config.run_mode;

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/", get(handlers::system::service_info))
        .route("/api/health", get(handlers::system::health))
        .route("/api/pools", get(handlers::pools::list_pools))
        .route("/api/pools/{base}/{quote}", get(handlers::pools::get_pool))
        .route("/api/price/quote", post(handlers::price::get_quote))
        .route("/api/swap/build", post(handlers::swap::build_swap))
        .route("/api/swap/execute", post(handlers::swap::execute_swap))
        .route("/api/swap/transaction/{digest}", get(handlers::swap::get_transaction))
        .route("/api/swap/balances/{wallet_address}", get(handlers::wallet::get_balances))
        .route(
            "/api/swap/balances/{wallet_address}/{token}",
            get(handlers::wallet::get_token_balance),
        )
        .route("/api/gas-price", get(handlers::wallet::get_gas_price))
        .route("/ws/quotes", get(handlers::websocket::quote_stream_websocket))
        .fallback(handlers::system::not_found)
        .with_state(state)
        // Innermost: sees the AppError stashed by handlers
        .layer(axum::middleware::from_fn_with_state(run_mode, map_res))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id(request),
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_failure(|error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                })
                .on_response(|_response: &Response<_>, _latency: Duration, _span: &Span| {
                    // [RESPONSE] lines come from log_requests
                }),
        )
        // Outermost after CORS so every span and log line has the id
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// CORS for the single configured frontend origin.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = match frontend_url.parse() {
        Ok(origin) => vec![origin],
        Err(_) => {
            warn!("[CORS] FRONTEND_URL {} is not a valid origin", frontend_url);
            Vec::new()
        }
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Log server information
fn log_server_info(config: &Config) {
    info!("   Port: {}", config.port);
    info!("   Network: {}", config.network);
    info!("   Environment: {}", config.run_mode.as_str());
    info!("   Frontend: {}", config.frontend_url);
    info!(" ENDPOINTS:");
    info!("   • GET  /api/health");
    info!("   • GET  /api/pools");
    info!("   • GET  /api/pools/{{base}}/{{quote}}");
    info!("   • POST /api/price/quote");
    info!("   • POST /api/swap/build");
    info!("   • POST /api/swap/execute");
    info!("   • GET  /api/swap/balances/{{walletAddress}}");
    info!("   • GET  /api/swap/balances/{{walletAddress}}/{{token}}");
    info!("   • GET  /api/swap/transaction/{{txDigest}}");
    info!("   • GET  /api/gas-price");
    info!(" STREAMS:");
    info!("   • WS   /ws/quotes");
}
// endregion: --- Server Setup
