#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    IdentityUser, Permission, Profile, Role, RoleGrant, UserRoleAssignment,
};
use crate::error::AdminServiceError;

/// Repository for roles.
pub trait RoleRepository: Send + Sync {
    /// All roles, newest first.
    async fn list(&self) -> Result<Vec<Role>, AdminServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, AdminServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AdminServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Role>, AdminServiceError>;

    /// Insert a role. A name collision yields `RoleAlreadyExists`.
    async fn create(&self, role: &Role) -> Result<(), AdminServiceError>;

    /// Overwrite the fields that are `Some`. Returns `false` if no role has this id.
    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool, AdminServiceError>;

    /// Set `disabled = true`. Returns `false` if no role has this id.
    async fn disable(&self, id: Uuid) -> Result<bool, AdminServiceError>;

    /// Remove the role and its permission links. Returns `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError>;
}

/// Repository for permissions and their links to roles.
pub trait PermissionRepository: Send + Sync {
    /// Insert every name that does not exist yet, then return all of them.
    async fn upsert_by_names(&self, names: &[String]) -> Result<Vec<Permission>, AdminServiceError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Permission>, AdminServiceError>;

    async fn list_for_roles(&self, role_ids: &[Uuid]) -> Result<Vec<RoleGrant>, AdminServiceError>;

    /// Link permissions to a role, skipping links that already exist.
    async fn grant(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<(), AdminServiceError>;

    /// Drop every permission link of a role.
    async fn revoke_all(&self, role_id: Uuid) -> Result<(), AdminServiceError>;
}

/// Repository for user-role assignments.
///
/// Every mutating method enforces the last-administrator rule atomically with
/// the write it guards.
pub trait UserRoleRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<UserRoleAssignment>, AdminServiceError>;

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserRoleAssignment>, AdminServiceError>;

    /// Whether any user currently references the role.
    async fn has_assignments(&self, role_id: Uuid) -> Result<bool, AdminServiceError>;

    /// Replace every role of the user with exactly `role_id`.
    async fn replace_for_user(&self, user_id: Uuid, role_id: Uuid)
    -> Result<(), AdminServiceError>;

    /// Remove a single assignment. Returns `false` if the user did not hold the role.
    async fn remove(&self, user_id: Uuid, role_id: Uuid) -> Result<bool, AdminServiceError>;

    /// Delete the user's role and profile rows.
    async fn purge_user(&self, user_id: Uuid) -> Result<(), AdminServiceError>;
}

/// Repository for local user profiles.
pub trait ProfileRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Profile>, AdminServiceError>;
    async fn set_active(&self, user_id: Uuid, is_active: bool) -> Result<(), AdminServiceError>;
}

/// Port over the identity provider's refresh-token store.
pub trait SessionRepository: Send + Sync {
    /// Revoke every refresh token of the user. Returns how many were removed.
    async fn revoke_all(&self, user_id: Uuid) -> Result<u64, AdminServiceError>;
}

/// Port over the hosted identity provider.
pub trait IdentityPort: Send + Sync {
    /// Resolve a bearer token to the user id it belongs to.
    async fn user_id_from_token(&self, token: &str) -> Result<Option<Uuid>, AdminServiceError>;

    /// Every user known to the provider, across all pages.
    async fn list_users(&self) -> Result<Vec<IdentityUser>, AdminServiceError>;

    /// Mirror the role name into the user's metadata.
    async fn set_role_metadata(&self, user_id: Uuid, role: &str) -> Result<(), AdminServiceError>;

    /// Ban or unban the user at the provider.
    async fn set_sign_in_enabled(
        &self,
        user_id: Uuid,
        enabled: bool,
    ) -> Result<(), AdminServiceError>;

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AdminServiceError>;
}
