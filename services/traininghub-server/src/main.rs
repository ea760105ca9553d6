//! TrainingHub API Server
//!
//! Headless REST API server for the TrainingHub platform. Serves account
//! registration with email verification, bearer-token authentication,
//! published content and lead capture.
//!
//! # Features
//!
//! - Signed bearer token authentication
//! - Email verification gate on login
//! - OpenAPI documentation with Swagger UI
//! - Graceful shutdown handling
//! - Health check endpoint
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (requires AUTH_TOKEN_SECRET)
//! AUTH_TOKEN_SECRET=... traininghub-server
//!
//! # Start with custom config
//! traininghub-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! TRAININGHUB__SERVER__PORT=8080 traininghub-server
//! ```

mod config;
mod seed;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use traininghub_api::{create_router, ApiConfig, AppState};
use traininghub_auth::{AuthConfig, AuthService};
use traininghub_store::{LogMailer, MemoryStore, SystemClock};

use crate::config::ServerConfig;
use crate::seed::SeedData;

// Development fallback secret, long enough to pass validation but loudly
// logged so it never reaches production unnoticed.
const DEV_SECRET: &str = "traininghub-dev-secret-do-not-use-in-production";

// =============================================================================
// CLI Arguments
// =============================================================================

/// TrainingHub API Server - headless platform backend
#[derive(Parser, Debug)]
#[command(name = "traininghub-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "TRAININGHUB_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "TRAININGHUB_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TRAININGHUB_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TRAININGHUB_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (json, pretty)
    #[arg(long, env = "TRAININGHUB_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    /// Token signing secret
    #[arg(long, env = "AUTH_TOKEN_SECRET")]
    token_secret: Option<String>,

    /// Address that receives lead and subscription notifications
    #[arg(long, env = "TRAININGHUB_ADMIN_EMAIL")]
    admin_email: Option<String>,

    /// JSON file with pages, menus and entries to load at startup
    #[arg(long, env = "TRAININGHUB_SEED_FILE")]
    seed_file: Option<std::path::PathBuf>,

    /// Enable development mode (relaxed security)
    #[arg(long, env = "TRAININGHUB_DEV_MODE")]
    dev_mode: bool,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut server_config = ServerConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        server_config.server.host = host;
    }
    if let Some(port) = args.port {
        server_config.server.port = port;
    }
    if let Some(secret) = args.token_secret {
        server_config.auth.token_secret = secret;
    }
    if let Some(admin_email) = args.admin_email {
        server_config.content.admin_email = admin_email;
    }
    if let Some(seed_file) = args.seed_file {
        server_config.content.seed_file = Some(seed_file);
    }
    server_config.logging.level = args.log_level;
    server_config.logging.format = args.log_format;

    // Initialize logging
    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting TrainingHub API Server"
    );

    // Initialize auth service configuration
    let auth_config = build_auth_config(&server_config, args.dev_mode)?;

    // Initialize store and seed content
    let store = init_store(&server_config).await?;

    // Wire the application state
    let mailer = Arc::new(LogMailer);
    let clock = Arc::new(SystemClock);
    let auth = Arc::new(AuthService::new(
        auth_config,
        store.clone(),
        mailer.clone(),
        clock,
    ));
    let state = Arc::new(AppState::new(
        auth,
        store.clone(),
        store,
        mailer,
        server_config.content.admin_email.clone(),
    ));

    // Create API configuration
    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        cors_origins: server_config.api.cors_origins.clone(),
        enable_tracing: server_config.api.enable_tracing,
    };

    // Create router
    let app = create_router(state, api_config);

    // Get bind address
    let addr = server_config.server.socket_addr()?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(server_config.server.shutdown_timeout()))
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }

    Ok(())
}

/// Assemble and validate the authentication configuration
fn build_auth_config(config: &ServerConfig, dev_mode: bool) -> anyhow::Result<AuthConfig> {
    let mut auth_config = AuthConfig::from_env();

    if !config.auth.token_secret.is_empty() {
        auth_config.token.secret = config.auth.token_secret.clone();
    }
    auth_config.token.issuer = config.auth.token_issuer.clone();
    auth_config.token.token_lifetime = Duration::from_secs(config.auth.token_lifetime_secs);
    auth_config.verification.code_ttl = Duration::from_secs(config.auth.code_ttl_secs);
    auth_config.verification.mail_from = config.auth.mail_from.clone();

    if auth_config.token.secret.is_empty() {
        if dev_mode {
            tracing::warn!("No token secret configured, using the development fallback");
            auth_config.token.secret = DEV_SECRET.to_string();
        } else {
            anyhow::bail!(
                "Token secret must be set in production. Set AUTH_TOKEN_SECRET or run with --dev-mode."
            );
        }
    }

    if let Err(errors) = auth_config.validate() {
        anyhow::bail!("Invalid auth configuration: {}", errors.join("; "));
    }

    Ok(auth_config)
}

/// Initialize the store and load seed content if configured
async fn init_store(config: &ServerConfig) -> anyhow::Result<Arc<MemoryStore>> {
    let store = Arc::new(MemoryStore::new());

    if let Some(path) = &config.content.seed_file {
        tracing::info!(file = %path.display(), "Loading content seed");
        SeedData::load(path)?.apply(&store).await;
    }

    Ok(store)
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    // Allow time for in-flight requests to complete
    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "Waiting for in-flight requests to complete..."
    );

    tokio::time::sleep(timeout).await;
}

// =============================================================================
// Tests
// =============================================================================
