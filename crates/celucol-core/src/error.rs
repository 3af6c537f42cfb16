use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors raised by shared extractors and probes, before a service-specific
/// error type takes over.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("service unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Unavailable(_) => "UNAVAILABLE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        // TraceLayer already records method/uri/status; only the failing dependency is worth a line.
        if let Self::Unavailable(ref e) = self {
            tracing::error!(error = %e, kind = "UNAVAILABLE", "dependency unavailable");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
