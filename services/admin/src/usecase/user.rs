use std::collections::{BTreeSet, HashMap};

use tracing::warn;
use uuid::Uuid;

use crate::domain::repository::{
    IdentityPort, ProfileRepository, RoleRepository, SessionRepository, UserRoleRepository,
};
use crate::domain::types::{IdentityUser, ManagedUser, Role, RoleSelector};
use crate::error::AdminServiceError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<I, R, U, P>
where
    I: IdentityPort,
    R: RoleRepository,
    U: UserRoleRepository,
    P: ProfileRepository,
{
    pub identity: I,
    pub roles: R,
    pub user_roles: U,
    pub profiles: P,
}

impl<I, R, U, P> ListUsersUseCase<I, R, U, P>
where
    I: IdentityPort,
    R: RoleRepository,
    U: UserRoleRepository,
    P: ProfileRepository,
{
    /// Identity users merged with local roles and profiles. Falls back to the
    /// users referenced by `user_roles` when the provider listing fails.
    pub async fn execute(&self) -> Result<Vec<ManagedUser>, AdminServiceError> {
        let assignments = self.user_roles.list_all().await?;

        let users = match self.identity.list_users().await {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "identity listing unavailable; falling back to user_roles");
                let ids: BTreeSet<Uuid> = assignments.iter().map(|a| a.user_id).collect();
                ids.into_iter().map(IdentityUser::bare).collect()
            }
        };

        let role_ids: Vec<Uuid> = assignments
            .iter()
            .map(|a| a.role_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let roles: HashMap<Uuid, Role> = self
            .roles
            .find_by_ids(&role_ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let mut roles_by_user: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for a in &assignments {
            if let Some(role) = roles.get(&a.role_id) {
                roles_by_user
                    .entry(a.user_id)
                    .or_default()
                    .push(role.clone());
            }
        }
        let active: HashMap<Uuid, bool> = self
            .profiles
            .list_all()
            .await?
            .into_iter()
            .map(|p| (p.id, p.is_active))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let roles = roles_by_user.remove(&user.id).unwrap_or_default();
                let role = roles.first().map(|r| r.name.clone()).or_else(|| {
                    user.metadata.as_ref().and_then(|m| m.role.clone())
                });
                ManagedUser {
                    id: user.id,
                    email: user.email,
                    role,
                    roles,
                    user_metadata: user.metadata,
                    is_active: active.get(&user.id).copied().unwrap_or(true),
                }
            })
            .collect())
    }
}

// ── AssignRole ───────────────────────────────────────────────────────────────

pub struct AssignRoleUseCase<I: IdentityPort, R: RoleRepository, U: UserRoleRepository> {
    pub identity: I,
    pub roles: R,
    pub user_roles: U,
}

impl<I, R, U> AssignRoleUseCase<I, R, U>
where
    I: IdentityPort,
    R: RoleRepository,
    U: UserRoleRepository,
{
    /// Make `role` the user's only role and mirror its name into the identity metadata.
    pub async fn execute(
        &self,
        user_id: Uuid,
        role: RoleSelector,
    ) -> Result<Role, AdminServiceError> {
        let role = match role {
            RoleSelector::Name(name) => self.roles.find_by_name(name.trim()).await?,
            RoleSelector::Id(id) => self.roles.find_by_id(id).await?,
        }
        .ok_or(AdminServiceError::RoleNotFound)?;
        if role.disabled {
            return Err(AdminServiceError::RoleDisabled);
        }

        self.user_roles.replace_for_user(user_id, role.id).await?;

        if let Err(e) = self.identity.set_role_metadata(user_id, &role.name).await {
            warn!(error = %e, %user_id, "could not sync role into user metadata");
        }
        Ok(role)
    }
}

// ── RemoveRole ───────────────────────────────────────────────────────────────

pub struct RemoveRoleUseCase<U: UserRoleRepository> {
    pub user_roles: U,
}

impl<U: UserRoleRepository> RemoveRoleUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AdminServiceError> {
        self.user_roles.remove(user_id, role_id).await?;
        Ok(())
    }
}

// ── SetUserActive ────────────────────────────────────────────────────────────

pub struct SetUserActiveInput {
    pub caller: Uuid,
    pub user_id: Uuid,
    pub is_active: bool,
}

pub struct SetUserActiveUseCase<I: IdentityPort, P: ProfileRepository, S: SessionRepository> {
    pub identity: I,
    pub profiles: P,
    pub sessions: S,
}

impl<I, P, S> SetUserActiveUseCase<I, P, S>
where
    I: IdentityPort,
    P: ProfileRepository,
    S: SessionRepository,
{
    pub async fn execute(&self, input: SetUserActiveInput) -> Result<(), AdminServiceError> {
        let SetUserActiveInput {
            caller,
            user_id,
            is_active,
        } = input;
        if caller == user_id {
            return Err(AdminServiceError::CannotDisableSelf);
        }

        self.profiles.set_active(user_id, is_active).await?;

        if let Err(e) = self.identity.set_sign_in_enabled(user_id, is_active).await {
            warn!(error = %e, %user_id, is_active, "could not update sign-in ban");
        }
        if !is_active {
            match self.sessions.revoke_all(user_id).await {
                Ok(revoked) => tracing::debug!(%user_id, revoked, "refresh tokens revoked"),
                Err(e) => warn!(error = %e, %user_id, "could not revoke refresh tokens"),
            }
        }
        Ok(())
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<I: IdentityPort, U: UserRoleRepository> {
    pub identity: I,
    pub user_roles: U,
}

impl<I: IdentityPort, U: UserRoleRepository> DeleteUserUseCase<I, U> {
    /// Local rows go first; the identity record is deleted last and not rolled back on failure.
    pub async fn execute(&self, caller: Uuid, user_id: Uuid) -> Result<(), AdminServiceError> {
        if caller == user_id {
            return Err(AdminServiceError::CannotDeleteSelf);
        }
        self.user_roles.purge_user(user_id).await?;
        self.identity.delete_user(user_id).await
    }
}
