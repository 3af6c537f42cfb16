/// Notify service configuration loaded from environment variables.
///
/// Provider credentials are optional: a missing key only fails the requests
/// that need it.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// TCP port for the HTTP server (default 3121). Env var: `NOTIFY_PORT`.
    pub notify_port: u16,
    pub resend_api_key: Option<String>,
    /// Default "https://api.resend.com". Env var: `RESEND_API_URL`.
    pub resend_api_url: String,
    /// Sender for account mail. Env var: `EMAIL_FROM_ACCOUNTS`.
    pub email_from_accounts: String,
    /// Sender for order mail. Env var: `EMAIL_FROM_ORDERS`.
    pub email_from_orders: String,
    /// Storefront link used in mail bodies. Env var: `STORE_URL`.
    pub store_url: String,
    pub whatsapp_token: Option<String>,
    pub whatsapp_phone_number_id: Option<String>,
    /// Default "https://graph.facebook.com/v18.0". Env var: `WHATSAPP_API_URL`.
    pub whatsapp_api_url: String,
}

fn var_or(name: &str, default: &str) -> String {
    optional_var(name).unwrap_or_else(|| default.to_owned())
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self {
            notify_port: std::env::var("NOTIFY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3121),
            resend_api_key: optional_var("RESEND_API_KEY"),
            resend_api_url: var_or("RESEND_API_URL", "https://api.resend.com"),
            email_from_accounts: var_or("EMAIL_FROM_ACCOUNTS", "CeluCol <noreply@tudominio.com>"),
            email_from_orders: var_or("EMAIL_FROM_ORDERS", "CeluCol <pedidos@tudominio.com>"),
            store_url: var_or("STORE_URL", "https://tudominio.com"),
            whatsapp_token: optional_var("WHATSAPP_TOKEN"),
            whatsapp_phone_number_id: optional_var("WHATSAPP_PHONE_NUMBER_ID"),
            whatsapp_api_url: var_or("WHATSAPP_API_URL", "https://graph.facebook.com/v18.0"),
        }
    }
}
