use anyhow::Context as _;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::repository::IdentityPort;
use crate::domain::types::{IdentityUser, UserMetadata};
use crate::error::AdminServiceError;

const PAGE_SIZE: usize = 1000;
/// Ban length the provider treats as permanent; "none" lifts it.
const PERMANENT_BAN: &str = "876000h";

/// Client for the identity provider's REST and admin API.
#[derive(Clone)]
pub struct SupabaseIdentityClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseIdentityClient {
    pub fn new(client: Client, base_url: &str, service_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_key: service_key.to_owned(),
        }
    }

    fn admin(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

/// User object as the provider serialises it. Older endpoints spell the
/// metadata field `raw_user_meta_data`.
#[derive(Deserialize)]
struct UserWire {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<Value>,
    #[serde(default)]
    raw_user_meta_data: Option<Value>,
}

impl From<UserWire> for IdentityUser {
    fn from(wire: UserWire) -> Self {
        let metadata = wire
            .user_metadata
            .filter(Value::is_object)
            .or(wire.raw_user_meta_data.filter(Value::is_object))
            .and_then(|v| serde_json::from_value::<UserMetadata>(v).ok());
        IdentityUser {
            id: wire.id,
            email: wire.email,
            metadata,
        }
    }
}

#[derive(Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<UserWire>,
}

impl IdentityPort for SupabaseIdentityClient {
    async fn user_id_from_token(&self, token: &str) -> Result<Option<Uuid>, AdminServiceError> {
        let resp = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await
            .context("resolve bearer token")?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let user: UserWire = resp.json().await.context("decode token user")?;
        Ok(Some(user.id))
    }

    async fn list_users(&self) -> Result<Vec<IdentityUser>, AdminServiceError> {
        let mut users = Vec::new();
        let mut page = 1;
        loop {
            let url = format!(
                "{}/auth/v1/admin/users?page={page}&per_page={PAGE_SIZE}",
                self.base_url
            );
            let batch: UserPage = self
                .admin(self.client.get(url))
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .context("list identity users")?
                .json()
                .await
                .context("decode identity users")?;
            let fetched = batch.users.len();
            users.extend(batch.users.into_iter().map(IdentityUser::from));
            if fetched < PAGE_SIZE {
                return Ok(users);
            }
            page += 1;
        }
    }

    async fn set_role_metadata(&self, user_id: Uuid, role: &str) -> Result<(), AdminServiceError> {
        self.admin(
            self.client
                .put(format!("{}/auth/v1/admin/users/{user_id}", self.base_url)),
        )
        .json(&json!({ "user_metadata": { "role": role } }))
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .context("update user metadata")?;
        Ok(())
    }

    async fn set_sign_in_enabled(
        &self,
        user_id: Uuid,
        enabled: bool,
    ) -> Result<(), AdminServiceError> {
        let ban_duration = if enabled { "none" } else { PERMANENT_BAN };
        self.admin(
            self.client
                .put(format!("{}/auth/v1/admin/users/{user_id}", self.base_url)),
        )
        .json(&json!({ "ban_duration": ban_duration }))
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .context("update user ban")?;
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AdminServiceError> {
        self.admin(
            self.client
                .delete(format!("{}/auth/v1/admin/users/{user_id}", self.base_url)),
        )
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .context("delete identity user")?;
        Ok(())
    }
}
