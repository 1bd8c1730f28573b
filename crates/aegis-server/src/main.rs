//! Aegis server - decision-support API for air defense engagements.

use aegis_server::{api, config::Config, state::AppState};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aegis_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting aegis server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(ranker_url = %config.ranker_url, "using external ranker");
    let state = Arc::new(AppState::new(config));

    // CORS stays permissive for the browser demo client.
    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
