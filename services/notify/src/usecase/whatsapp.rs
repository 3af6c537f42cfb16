use serde_json::Value;
use tracing::info;

use crate::domain::phone::is_valid_phone;
use crate::domain::port::WhatsAppSender;
use crate::domain::types::{WhatsAppReceipt, WhatsAppTemplate};
use crate::error::NotifyServiceError;

// ── SendWhatsApp ─────────────────────────────────────────────────────────────

pub struct SendWhatsAppInput {
    pub phone: Option<String>,
    pub message: Option<String>,
    pub template: Option<Value>,
}

pub struct SendWhatsAppUseCase<'a, S: WhatsAppSender> {
    /// `None` when the token or phone-number id is missing.
    pub sender: Option<&'a S>,
}

impl<S: WhatsAppSender> SendWhatsAppUseCase<'_, S> {
    /// Validates everything, then makes exactly one provider call.
    pub async fn execute(
        &self,
        input: SendWhatsAppInput,
    ) -> Result<WhatsAppReceipt, NotifyServiceError> {
        let phone = input
            .phone
            .filter(|p| !p.is_empty())
            .ok_or(NotifyServiceError::MissingData("phone"))?;
        let body = match (input.message, input.template) {
            (Some(message), _) => message,
            (None, Some(template)) => WhatsAppTemplate::parse(template)?.render(),
            (None, None) => return Err(NotifyServiceError::MissingData("message")),
        };
        if !is_valid_phone(&phone) {
            return Err(NotifyServiceError::InvalidPhone);
        }
        if body.trim().is_empty() {
            return Err(NotifyServiceError::EmptyMessage);
        }

        let sender = self
            .sender
            .ok_or(NotifyServiceError::NotConfigured("WhatsApp credentials"))?;
        let receipt = sender.send_text(&phone, &body).await?;
        info!(message_id = ?receipt.message_id, "whatsapp message sent");
        Ok(receipt)
    }
}
