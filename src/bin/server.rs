//! Booking HTTP Server Binary
//!
//! Entry point for the salon booking REST API server. It initializes the
//! repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with local (in-memory) repository (default)
//! cargo run --bin salon-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `WAITLIST_PROMOTION`: Promotion policy, `first-only` or `in-order`
//!   (default: first-only)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use salon_booking::db;
use salon_booking::http::{create_router, AppState};
use salon_booking::services::PromotionPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting booking HTTP server");

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    let promotion_policy = env::var("WAITLIST_PROMOTION")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    info!(?promotion_policy, "Waitlist promotion policy");

    // Create application state and router
    let state = AppState::new(repository).with_promotion_policy(promotion_policy);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
