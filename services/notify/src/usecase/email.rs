use serde_json::Value;
use tracing::info;

use crate::domain::email::EmailBranding;
use crate::domain::port::EmailSender;
use crate::domain::types::EmailKind;
use crate::error::NotifyServiceError;

// ── SendEmail ────────────────────────────────────────────────────────────────

pub struct SendEmailInput {
    pub to: Option<String>,
    pub kind: Option<String>,
    pub data: Option<Value>,
}

pub struct SendEmailUseCase<'a, S: EmailSender> {
    /// `None` when no provider key is configured.
    pub sender: Option<&'a S>,
    pub branding: &'a EmailBranding,
}

impl<S: EmailSender> SendEmailUseCase<'_, S> {
    /// Returns the provider's message id.
    pub async fn execute(&self, input: SendEmailInput) -> Result<String, NotifyServiceError> {
        let to = input
            .to
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or(NotifyServiceError::MissingData("to"))?;
        let kind = input
            .kind
            .filter(|k| !k.trim().is_empty())
            .ok_or(NotifyServiceError::MissingData("type"))?;
        let kind = EmailKind::parse(kind.trim(), input.data.unwrap_or(Value::Null))?;

        let sender = self
            .sender
            .ok_or(NotifyServiceError::NotConfigured("RESEND_API_KEY"))?;
        let email = kind.render(&to, self.branding);
        let message_id = sender.send(&email).await?;
        info!(%message_id, subject = %email.subject, "email sent");
        Ok(message_id)
    }
}
