//! GlitchCore · landing page backend
//!
//! - Quiz gate with a one-time reward code for the correct answer
//! - Axum HTTP + WebSocket API (one quiz session per WebSocket connection)
//! - Share links, contact form hand-off
//! - Static landing page fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   SITE_CONFIG_PATH : path to TOML config (quiz, reward prefix, page copy)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod seeds;
mod quiz;
mod reward;
mod presenter;
mod share;
mod contact;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: site config, code generator, HTTP session store.
  let state = Arc::new(AppState::new());

  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "glitchcore", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "glitchcore", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "glitchcore", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
