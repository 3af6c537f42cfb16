use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Admin service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("missing {0}")]
    MissingData(&'static str),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("role not found")]
    RoleNotFound,
    #[error("permission not found")]
    PermissionNotFound,
    #[error("role already exists")]
    RoleAlreadyExists,
    #[error("role has associated users; cannot hard-delete")]
    RoleInUse,
    #[error("role is disabled")]
    RoleDisabled,
    #[error("the administrator role cannot be renamed or deleted")]
    ProtectedRole,
    #[error("cannot disable current logged user")]
    CannotDisableSelf,
    #[error("cannot delete currently logged user")]
    CannotDeleteSelf,
    #[error("cannot remove the last administrator")]
    LastAdministrator,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AdminServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingData(_) => "MISSING_DATA",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::PermissionNotFound => "PERMISSION_NOT_FOUND",
            Self::RoleAlreadyExists => "ROLE_ALREADY_EXISTS",
            Self::RoleInUse => "ROLE_IN_USE",
            Self::RoleDisabled => "ROLE_DISABLED",
            Self::ProtectedRole => "PROTECTED_ROLE",
            Self::CannotDisableSelf => "CANNOT_DISABLE_SELF",
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",
            Self::LastAdministrator => "LAST_ADMINISTRATOR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<celucol_core::error::AppError> for AdminServiceError {
    fn from(err: celucol_core::error::AppError) -> Self {
        match err {
            celucol_core::error::AppError::Unauthorized => Self::Unauthorized,
            celucol_core::error::AppError::Unavailable(e) => Self::Internal(e),
        }
    }
}

impl From<JsonRejection> for AdminServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidData(rejection.body_text())
    }
}

impl IntoResponse for AdminServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingData(_)
            | Self::InvalidData(_)
            | Self::RoleInUse
            | Self::RoleDisabled
            | Self::ProtectedRole
            | Self::CannotDisableSelf
            | Self::CannotDeleteSelf
            | Self::LastAdministrator => StatusCode::BAD_REQUEST,
            Self::RoleNotFound | Self::PermissionNotFound => StatusCode::NOT_FOUND,
            Self::RoleAlreadyExists => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only; TraceLayer records every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
