use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::repository::{IdentityPort, RoleRepository, UserRoleRepository};
use crate::error::AdminServiceError;

// ── AuthorizeAdmin ───────────────────────────────────────────────────────────

/// Resolves the bearer token to a caller and requires the administrator role.
pub struct AuthorizeAdminUseCase<I: IdentityPort, R: RoleRepository, U: UserRoleRepository> {
    pub identity: I,
    pub roles: R,
    pub user_roles: U,
    pub admin_role_name: Arc<str>,
}

impl<I, R, U> AuthorizeAdminUseCase<I, R, U>
where
    I: IdentityPort,
    R: RoleRepository,
    U: UserRoleRepository,
{
    /// Returns the caller's user id.
    pub async fn execute(&self, token: &str) -> Result<Uuid, AdminServiceError> {
        let caller = match self.identity.user_id_from_token(token).await {
            Ok(caller) => caller,
            Err(e) => {
                warn!(error = %e, "bearer token could not be resolved");
                None
            }
        };
        let caller = caller.ok_or(AdminServiceError::Unauthorized)?;

        let admin = self
            .roles
            .find_by_name(&self.admin_role_name)
            .await?
            .ok_or(AdminServiceError::Forbidden)?;
        let held = self.user_roles.list_for_user(caller).await?;
        if !held.iter().any(|a| a.role_id == admin.id) {
            return Err(AdminServiceError::Forbidden);
        }
        Ok(caller)
    }
}
