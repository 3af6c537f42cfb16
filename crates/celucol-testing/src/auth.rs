//! Mock auth helpers for integration tests.
//!
//! Services receive `Authorization: Bearer <token>` from the admin panel and ask the
//! identity provider who the token belongs to. In tests the provider is mocked, so
//! `MockAuth` mints a deterministic token per user that the mock can map back.

use axum::http::{HeaderName, HeaderValue, header};
use uuid::Uuid;

/// Prefix of every token minted by [`MockAuth`].
pub const MOCK_TOKEN_PREFIX: &str = "test-token-";

/// Caller identity used to authenticate test requests.
pub struct MockAuth {
    pub user_id: Uuid,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Bearer token a mock identity provider resolves back to `user_id`.
    pub fn token(&self) -> String {
        format!("{MOCK_TOKEN_PREFIX}{}", self.user_id)
    }

    /// Inverse of [`MockAuth::token`]; `None` for anything not minted here.
    pub fn user_id_from_token(token: &str) -> Option<Uuid> {
        token.strip_prefix(MOCK_TOKEN_PREFIX)?.parse().ok()
    }

    /// `Authorization` header as the admin panel would send it.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .expect("mock token is a valid header value");
        (header::AUTHORIZATION, value)
    }
}
