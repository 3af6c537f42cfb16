use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Notify service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum NotifyServiceError {
    #[error("missing {0}")]
    MissingData(&'static str),
    #[error("unknown email type: {0}")]
    UnknownEmailType(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("phone must be in international format (e.g. +573001234567)")]
    InvalidPhone,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl NotifyServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingData(_) => "MISSING_DATA",
            Self::UnknownEmailType(_) => "UNKNOWN_EMAIL_TYPE",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::NotConfigured(_) => "NOT_CONFIGURED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<JsonRejection> for NotifyServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidData(rejection.body_text())
    }
}

impl IntoResponse for NotifyServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingData(_)
            | Self::UnknownEmailType(_)
            | Self::InvalidData(_)
            | Self::InvalidPhone
            | Self::EmptyMessage => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
            }
            Self::NotConfigured(what) => {
                tracing::error!(missing = what, kind = "NOT_CONFIGURED", "provider not configured");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
