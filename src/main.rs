// src/main.rs
use std::sync::Arc;

use anyhow::Context as _;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use digital_twin_backend::{config::Config, routes, services::report_generator, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        gemini_enabled = config.gemini.is_enabled(),
        openai_enabled = config.openai.is_enabled(),
        "starting digital twin backend",
    );

    let state = Arc::new(AppState::new(config)?);

    // The download_resume action points at this file; a failure here only
    // degrades that one action.
    if let Err(err) = report_generator::generate_resume_pdf(&state.resume).await {
        tracing::warn!("could not generate resume PDF: {err}");
    }

    let app = routes::create_router(state).layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on http://{bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
