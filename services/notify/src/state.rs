use std::sync::Arc;

use crate::config::NotifyConfig;
use crate::domain::email::EmailBranding;
use crate::infra::resend::ResendClient;
use crate::infra::whatsapp::WhatsAppCloudClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub email: Option<ResendClient>,
    pub whatsapp: Option<WhatsAppCloudClient>,
    pub branding: Arc<EmailBranding>,
}

impl AppState {
    /// Build provider clients for whichever credentials are present.
    pub fn from_config(config: &NotifyConfig, client: reqwest::Client) -> Self {
        let email = config
            .resend_api_key
            .as_deref()
            .map(|key| ResendClient::new(client.clone(), &config.resend_api_url, key));
        let whatsapp = match (&config.whatsapp_token, &config.whatsapp_phone_number_id) {
            (Some(token), Some(phone_number_id)) => Some(WhatsAppCloudClient::new(
                client,
                &config.whatsapp_api_url,
                token,
                phone_number_id,
            )),
            _ => None,
        };
        Self {
            email,
            whatsapp,
            branding: Arc::new(EmailBranding {
                from_accounts: config.email_from_accounts.clone(),
                from_orders: config.email_from_orders.clone(),
                store_url: config.store_url.clone(),
            }),
        }
    }
}
