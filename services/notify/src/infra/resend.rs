use anyhow::Context as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::port::EmailSender;
use crate::domain::types::OutgoingEmail;
use crate::error::NotifyServiceError;
use crate::infra::ensure_success;

/// Client for the Resend transactional email API.
#[derive(Clone)]
pub struct ResendClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ResendClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

impl EmailSender for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, NotifyServiceError> {
        let resp = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from: &email.from,
                to: [&email.to],
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await
            .context("send email")?;
        let sent: SendResponse = ensure_success("Resend", resp)
            .await?
            .json()
            .await
            .context("decode email response")?;
        Ok(sent.id)
    }
}
