pub mod caller;
pub mod roles;
pub mod users;

use axum::extract::FromRequest;
use serde::Serialize;

use crate::error::AdminServiceError;

/// `axum::Json` whose rejections answer with the `{kind, message}` error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AdminServiceError))]
pub struct JsonBody<T>(pub T);

/// `{"success": true}` acknowledgement for mutations without a payload.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> axum::Json<Self> {
        axum::Json(Self { success: true })
    }
}

/// `{"data": ...}` envelope used by list and create responses.
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}
