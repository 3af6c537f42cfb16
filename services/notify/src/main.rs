use anyhow::Context as _;
use tracing::{info, warn};

use celucol_notify::config::NotifyConfig;
use celucol_notify::router::build_router;
use celucol_notify::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    celucol_core::tracing::init_tracing();

    let config = NotifyConfig::from_env();
    let state = AppState::from_config(&config, reqwest::Client::new());
    if state.email.is_none() {
        warn!("RESEND_API_KEY not set; /send-email will answer 500");
    }
    if state.whatsapp.is_none() {
        warn!("WhatsApp credentials not set; /whatsapp-notify will answer 500");
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.notify_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind")?;

    info!("notify service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
