use anyhow::Context as _;

/// Admin service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// PostgreSQL connection URL of the hosted store.
    pub database_url: String,
    /// Base URL of the identity provider (e.g. "https://xyz.supabase.co").
    pub supabase_url: String,
    /// Service-role key used for the provider's admin API.
    pub supabase_service_role_key: String,
    /// TCP port for the HTTP server (default 3120). Env var: `ADMIN_PORT`.
    pub admin_port: u16,
    /// Name of the trust-anchor role (default "administrador"). Env var: `ADMIN_ROLE_NAME`.
    pub admin_role_name: String,
}

impl AdminConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL")?,
            supabase_url: std::env::var("SUPABASE_URL")
                .context("SUPABASE_URL")?
                .trim_end_matches('/')
                .to_owned(),
            supabase_service_role_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY")
                .context("SUPABASE_SERVICE_ROLE_KEY")?,
            admin_port: std::env::var("ADMIN_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            admin_role_name: std::env::var("ADMIN_ROLE_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "administrador".to_owned()),
        })
    }
}
