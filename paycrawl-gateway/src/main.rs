//! Pay-per-crawl edge gateway server.
//!
//! # Usage
//!
//! ```bash
//! # Gate an origin site behind the payment exchange
//! ORIGIN_URL=https://example.org cargo run -p paycrawl-gateway --release
//!
//! # Charge ClaudeBot a custom price, block Bytespider
//! CRAWLER_RULES='{"crawlers":[
//!   {"name":"ClaudeBot","action":"charge","price":0.05},
//!   {"name":"Bytespider","action":"block"}
//! ]}' ORIGIN_URL=https://example.org cargo run -p paycrawl-gateway
//!
//! # Configure logging level
//! RUST_LOG=debug cargo run -p paycrawl-gateway
//! ```
//!
//! # Environment Variables
//!
//! - `HOST` — Bind address (default: `0.0.0.0`)
//! - `PORT` — Bind port (default: `8402`)
//! - `ORIGIN_URL` — Base URL of the proxied origin site
//! - `CRAWLER_RULES` — JSON policy document, re-read on every request
//! - `DEFAULT_PRICE` — Price charged when a rule has none (default: `0.01`)
//! - `RUST_LOG` — Log level filter (default: `info`)

use std::net::SocketAddr;

use axum::http::Method;
use axum::routing::any;
use axum::{Json, Router};
use paycrawl_http::{CrawlGateLayer, EnvPolicy};
use tower::Layer;
use tower_http::cors;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use paycrawl_gateway::config::{CRAWLER_RULES_VAR, GatewayConfig};
use paycrawl_gateway::{ProxyState, demo, proxy};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing with RUST_LOG env filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Gateway failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::load()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        origin = config.origin_url.as_ref().map_or("<none>", url::Url::as_str),
        default_price = %config.default_price,
        "Loaded configuration"
    );

    if config.origin_url.is_none() {
        tracing::warn!("ORIGIN_URL not set — proxied paths will answer 404");
    }

    let state = ProxyState::new(config.origin_url.clone());

    let gate = CrawlGateLayer::new()
        .with_default_price(config.default_price)
        .with_policy(EnvPolicy::new(CRAWLER_RULES_VAR));

    // The gate wraps only the origin proxy; the demo surface stays open.
    let gated_origin = gate.layer(any(proxy::forward).with_state(state));

    let app = Router::new()
        .merge(demo::demo_router())
        .route("/health", axum::routing::get(health))
        .fallback_service(gated_origin)
        .layer(TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(cors::Any),
        );

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Gateway listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway shut down gracefully");
    Ok(())
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Waits for Ctrl-C or SIGTERM (Unix) to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down..."),
            _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down..."),
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.expect("failed to listen for Ctrl-C");
        tracing::info!("Received Ctrl-C, shutting down...");
    }
}
