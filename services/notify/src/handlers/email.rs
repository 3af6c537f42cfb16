use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NotifyServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::email::{SendEmailInput, SendEmailUseCase};

// ── POST /send-email ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendEmailRequest {
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: String,
}

pub async fn send_email(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, NotifyServiceError> {
    let usecase = SendEmailUseCase {
        sender: state.email.as_ref(),
        branding: &state.branding,
    };
    let message_id = usecase
        .execute(SendEmailInput {
            to: body.to,
            kind: body.kind,
            data: body.data,
        })
        .await?;
    Ok(Json(SendEmailResponse {
        success: true,
        message_id,
    }))
}
