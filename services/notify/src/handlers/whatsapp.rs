use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NotifyServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::whatsapp::{SendWhatsAppInput, SendWhatsAppUseCase};

// ── POST /whatsapp-notify ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct WhatsAppNotifyRequest {
    pub phone: Option<String>,
    pub message: Option<String>,
    pub template: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppNotifyResponse {
    pub success: bool,
    pub message: &'static str,
    pub message_id: Option<String>,
    pub whatsapp_id: Option<String>,
}

pub async fn whatsapp_notify(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WhatsAppNotifyRequest>,
) -> Result<Json<WhatsAppNotifyResponse>, NotifyServiceError> {
    let usecase = SendWhatsAppUseCase {
        sender: state.whatsapp.as_ref(),
    };
    let receipt = usecase
        .execute(SendWhatsAppInput {
            phone: body.phone,
            message: body.message,
            template: body.template,
        })
        .await?;
    Ok(Json(WhatsAppNotifyResponse {
        success: true,
        message: "Mensaje enviado exitosamente",
        message_id: receipt.message_id,
        whatsapp_id: receipt.whatsapp_id,
    }))
}
