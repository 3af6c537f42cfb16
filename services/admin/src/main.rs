use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use celucol_admin::config::AdminConfig;
use celucol_admin::infra::identity::SupabaseIdentityClient;
use celucol_admin::router::build_router;
use celucol_admin::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    celucol_core::tracing::init_tracing();

    let config = AdminConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let identity = SupabaseIdentityClient::new(
        reqwest::Client::new(),
        &config.supabase_url,
        &config.supabase_service_role_key,
    );

    let state = AppState {
        db,
        identity,
        admin_role_name: config.admin_role_name.into(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.admin_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind")?;

    info!("admin service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
