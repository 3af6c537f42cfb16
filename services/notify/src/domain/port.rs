#![allow(async_fn_in_trait)]

use crate::domain::types::{OutgoingEmail, WhatsAppReceipt};
use crate::error::NotifyServiceError;

/// Transactional email provider.
pub trait EmailSender: Send + Sync {
    /// Deliver one email and return the provider's message id.
    async fn send(&self, email: &OutgoingEmail) -> Result<String, NotifyServiceError>;
}

/// WhatsApp Cloud API.
pub trait WhatsAppSender: Send + Sync {
    async fn send_text(&self, phone: &str, body: &str)
    -> Result<WhatsAppReceipt, NotifyServiceError>;
}
