use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidrec_client::{
    api::{create_router, AppState},
    session::SessionController,
    view::Renderer,
    Config, HttpGateway,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;

    tracing::info!(
        api_url = %config.api_url,
        user_id = config.user_id,
        "Configuration loaded"
    );

    let gateway = HttpGateway::new(config.api_url.clone(), config.request_timeout())
        .context("Failed to create recommendation gateway")?;

    let session = SessionController::new(Arc::new(gateway), config.user_id)
        .with_limits(config.recommendation_limit, config.video_limit);

    // First load runs in the background; the page shows "Loading..." until it settles.
    let mount = session.clone();
    tokio::spawn(async move { mount.mount().await });

    let renderer = Renderer::new().context("Failed to load templates")?;
    let app = create_router(AppState::with_session(session, renderer));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidrec_client=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
