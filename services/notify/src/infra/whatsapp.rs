use anyhow::Context as _;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::domain::port::WhatsAppSender;
use crate::domain::types::WhatsAppReceipt;
use crate::error::NotifyServiceError;
use crate::infra::ensure_success;

/// Client for the WhatsApp Cloud API, bound to one business phone number.
#[derive(Clone)]
pub struct WhatsAppCloudClient {
    client: Client,
    base_url: String,
    token: String,
    phone_number_id: String,
}

impl WhatsAppCloudClient {
    pub fn new(client: Client, base_url: &str, token: &str, phone_number_id: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            phone_number_id: phone_number_id.to_owned(),
        }
    }
}

#[derive(Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Deserialize)]
struct ContactRef {
    wa_id: String,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
    #[serde(default)]
    contacts: Vec<ContactRef>,
}

impl WhatsAppSender for WhatsAppCloudClient {
    async fn send_text(
        &self,
        phone: &str,
        body: &str,
    ) -> Result<WhatsAppReceipt, NotifyServiceError> {
        let resp = self
            .client
            .post(format!("{}/{}/messages", self.base_url, self.phone_number_id))
            .bearer_auth(&self.token)
            .json(&json!({
                "messaging_product": "whatsapp",
                "to": phone,
                "type": "text",
                "text": { "body": body },
            }))
            .send()
            .await
            .context("send whatsapp message")?;
        let sent: SendResponse = ensure_success("WhatsApp", resp)
            .await?
            .json()
            .await
            .context("decode whatsapp response")?;
        Ok(WhatsAppReceipt {
            message_id: sent.messages.into_iter().next().map(|m| m.id),
            whatsapp_id: sent.contacts.into_iter().next().map(|c| c.wa_id),
        })
    }
}
