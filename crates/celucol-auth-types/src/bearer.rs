//! `Authorization: Bearer <token>` extractor.

use axum::extract::FromRequestParts;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::request::Parts;

use celucol_core::error::AppError;

/// Access token presented by the caller, as issued by the hosted identity provider.
///
/// Rejects with 401 if the header is absent, not a bearer credential, or empty.
/// Resolving the token to a user is the identity provider's job, not this extractor's.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lift a non-empty bearer credential out of `headers`.
    fn from_headers(headers: &http::HeaderMap) -> Option<Self> {
        headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_owned())
            .filter(|token| !token.is_empty())
            .map(Self)
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // Read the header synchronously and hand back a 'static future; an `async fn`
    // here would capture `parts` and trip E0195 against axum-core's signature.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = Self::from_headers(&parts.headers);
        async move { token.ok_or(AppError::Unauthorized) }
    }
}
