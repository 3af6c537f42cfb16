use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{PermissionRepository, RoleRepository, UserRoleRepository};
use crate::domain::types::{PermissionRef, PermissionSelection, Role, RoleWithPermissions};
use crate::error::AdminServiceError;

/// Fail with `PermissionNotFound` unless every explicit id exists.
async fn ensure_permissions_exist<P: PermissionRepository>(
    repo: &P,
    ids: &[Uuid],
) -> Result<(), AdminServiceError> {
    if repo.find_by_ids(ids).await?.len() < ids.len() {
        return Err(AdminServiceError::PermissionNotFound);
    }
    Ok(())
}

/// Upsert the named permissions and merge them with the explicit ids.
async fn resolve_permissions<P: PermissionRepository>(
    repo: &P,
    selection: &PermissionSelection,
) -> Result<Vec<Uuid>, AdminServiceError> {
    let named = repo.upsert_by_names(&selection.names).await?;
    let mut ids: Vec<Uuid> = named.into_iter().map(|p| p.id).collect();
    for id in &selection.ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    Ok(ids)
}

// ── ListRoles ────────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<R: RoleRepository, P: PermissionRepository> {
    pub roles: R,
    pub permissions: P,
}

impl<R: RoleRepository, P: PermissionRepository> ListRolesUseCase<R, P> {
    pub async fn execute(&self) -> Result<Vec<RoleWithPermissions>, AdminServiceError> {
        let roles = self.roles.list().await?;
        let role_ids: Vec<Uuid> = roles.iter().map(|r| r.id).collect();

        let mut by_role: HashMap<Uuid, Vec<_>> = HashMap::new();
        for grant in self.permissions.list_for_roles(&role_ids).await? {
            by_role
                .entry(grant.role_id)
                .or_default()
                .push(grant.permission);
        }

        Ok(roles
            .into_iter()
            .map(|role| RoleWithPermissions {
                permissions: by_role.remove(&role.id).unwrap_or_default(),
                role,
            })
            .collect())
    }
}

// ── CreateRole ───────────────────────────────────────────────────────────────

pub struct CreateRoleInput {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<PermissionRef>,
}

pub struct CreateRoleUseCase<R: RoleRepository, P: PermissionRepository> {
    pub roles: R,
    pub permissions: P,
}

impl<R: RoleRepository, P: PermissionRepository> CreateRoleUseCase<R, P> {
    pub async fn execute(&self, input: CreateRoleInput) -> Result<Role, AdminServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AdminServiceError::MissingData("role name"));
        }
        let selection = PermissionSelection::from_refs(input.permissions);
        ensure_permissions_exist(&self.permissions, &selection.ids).await?;

        let role = Role {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            description: input.description,
            disabled: false,
            created_at: Utc::now(),
        };
        self.roles.create(&role).await?;

        if !selection.is_empty() {
            let ids = resolve_permissions(&self.permissions, &selection).await?;
            self.permissions.grant(role.id, &ids).await?;
        }
        Ok(role)
    }
}

// ── UpdateRole ───────────────────────────────────────────────────────────────

pub struct UpdateRoleInput {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replaces the whole permission set; an empty list clears it.
    pub permissions: Vec<PermissionRef>,
}

pub struct UpdateRoleUseCase<R: RoleRepository, P: PermissionRepository> {
    pub roles: R,
    pub permissions: P,
    pub admin_role_name: Arc<str>,
}

impl<R: RoleRepository, P: PermissionRepository> UpdateRoleUseCase<R, P> {
    /// The administrator role keeps its name, and no other role may take it.
    pub async fn execute(&self, input: UpdateRoleInput) -> Result<(), AdminServiceError> {
        let name = input.name.as_deref().map(str::trim);
        if name == Some("") {
            return Err(AdminServiceError::MissingData("role name"));
        }
        let current = self
            .roles
            .find_by_id(input.id)
            .await?
            .ok_or(AdminServiceError::RoleNotFound)?;
        if let Some(new_name) = name {
            let admin = &*self.admin_role_name;
            if new_name != current.name && (current.name == admin || new_name == admin) {
                return Err(AdminServiceError::ProtectedRole);
            }
        }

        let selection = PermissionSelection::from_refs(input.permissions);
        ensure_permissions_exist(&self.permissions, &selection.ids).await?;

        let found = self
            .roles
            .update(input.id, name, input.description.as_deref())
            .await?;
        if !found {
            return Err(AdminServiceError::RoleNotFound);
        }

        self.permissions.revoke_all(input.id).await?;
        if !selection.is_empty() {
            let ids = resolve_permissions(&self.permissions, &selection).await?;
            self.permissions.grant(input.id, &ids).await?;
        }
        Ok(())
    }
}

// ── DeleteRole ───────────────────────────────────────────────────────────────

pub struct DeleteRoleUseCase<R: RoleRepository, U: UserRoleRepository> {
    pub roles: R,
    pub user_roles: U,
    pub admin_role_name: Arc<str>,
}

impl<R: RoleRepository, U: UserRoleRepository> DeleteRoleUseCase<R, U> {
    /// Soft delete unless `hard`; a hard delete requires the role to be unassigned.
    pub async fn execute(&self, id: Uuid, hard: bool) -> Result<(), AdminServiceError> {
        let role = self
            .roles
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::RoleNotFound)?;
        if role.name == *self.admin_role_name {
            return Err(AdminServiceError::ProtectedRole);
        }

        if !hard {
            self.roles.disable(id).await?;
            return Ok(());
        }
        if self.user_roles.has_assignments(id).await? {
            return Err(AdminServiceError::RoleInUse);
        }
        if !self.roles.delete(id).await? {
            return Err(AdminServiceError::RoleNotFound);
        }
        Ok(())
    }
}
