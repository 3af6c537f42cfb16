use anyhow::Context as _;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use uuid::Uuid;

use crate::domain::repository::SessionRepository;
use crate::error::AdminServiceError;

/// Refresh-token store of the identity provider, reached through the shared pool.
#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn revoke_all(&self, user_id: Uuid) -> Result<u64, AdminServiceError> {
        // `auth.refresh_tokens.user_id` is a varchar column.
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "DELETE FROM auth.refresh_tokens WHERE user_id = $1",
            [user_id.to_string().into()],
        );
        let result = self
            .db
            .execute(stmt)
            .await
            .context("revoke refresh tokens")?;
        Ok(result.rows_affected())
    }
}
