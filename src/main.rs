use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tracing::{info, warn};

use tutor_backend::{
    config::Settings,
    logger,
    routes::{self, cors_layer},
    services::completion::CompletionClient,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().context("reading settings from environment")?;
    logger::init(&settings.log_level)?;

    if settings.api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set, chat will answer in demo mode");
    }

    let client = CompletionClient::new(&settings).context("building completion client")?;
    let state = Arc::new(AppState::new(Arc::new(client)));

    let app: Router = routes::create_router()
        .with_state(state)
        .layer(cors_layer(&settings.cors_origins));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;

    info!(addr = %settings.bind_addr, model = %settings.model, "tutor backend listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
