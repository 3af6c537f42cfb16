use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use std::sync::Arc;
use uuid::Uuid;

use celucol_admin_schema::{permissions, profiles, role_permissions, roles, user_roles};

use crate::domain::policy::ensure_admin_remains;
use crate::domain::repository::{
    PermissionRepository, ProfileRepository, RoleRepository, UserRoleRepository,
};
use crate::domain::types::{Permission, Profile, Role, RoleGrant, UserRoleAssignment};
use crate::error::AdminServiceError;

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn list(&self) -> Result<Vec<Role>, AdminServiceError> {
        let models = roles::Entity::find()
            .order_by_desc(roles::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list roles")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, AdminServiceError> {
        let model = roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role by id")?;
        Ok(model.map(role_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AdminServiceError> {
        let model = roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find role by name")?;
        Ok(model.map(role_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Role>, AdminServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = roles::Entity::find()
            .filter(roles::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find roles by ids")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn create(&self, role: &Role) -> Result<(), AdminServiceError> {
        roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
            description: Set(role.description.clone()),
            disabled: Set(role.disabled),
            created_at: Set(role.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| role_write_error(e, "create role"))?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool, AdminServiceError> {
        let Some(model) = roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role for update")?
        else {
            return Ok(false);
        };
        if name.is_none() && description.is_none() {
            return Ok(true);
        }

        let mut am: roles::ActiveModel = model.into();
        if let Some(new_name) = name {
            am.name = Set(new_name.to_owned());
        }
        if let Some(new_description) = description {
            am.description = Set(Some(new_description.to_owned()));
        }
        am.update(&self.db)
            .await
            .map_err(|e| role_write_error(e, "update role"))?;
        Ok(true)
    }

    async fn disable(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let result = roles::Entity::update_many()
            .col_expr(roles::Column::Disabled, Expr::value(true))
            .filter(roles::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("disable role")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let txn = self.db.begin().await.context("begin transaction")?;
        role_permissions::Entity::delete_many()
            .filter(role_permissions::Column::RoleId.eq(id))
            .exec(&txn)
            .await
            .context("delete role permissions")?;
        let result = roles::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete role")?;
        txn.commit().await.context("commit transaction")?;
        Ok(result.rows_affected > 0)
    }
}

fn role_from_model(model: roles::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        description: model.description,
        disabled: model.disabled,
        created_at: model.created_at,
    }
}

fn role_write_error(err: DbErr, what: &'static str) -> AdminServiceError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return AdminServiceError::RoleAlreadyExists;
    }
    AdminServiceError::Internal(anyhow::Error::new(err).context(what))
}

// ── Permission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPermissionRepository {
    pub db: DatabaseConnection,
}

impl PermissionRepository for DbPermissionRepository {
    async fn upsert_by_names(&self, names: &[String]) -> Result<Vec<Permission>, AdminServiceError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let now = Utc::now();
        let rows = names.iter().map(|name| permissions::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.clone()),
            created_at: Set(now),
        });
        permissions::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::column(permissions::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert permissions")?;

        let models = permissions::Entity::find()
            .filter(permissions::Column::Name.is_in(names.iter().cloned()))
            .all(&self.db)
            .await
            .context("find permissions by name")?;
        Ok(models.into_iter().map(permission_from_model).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Permission>, AdminServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = permissions::Entity::find()
            .filter(permissions::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find permissions by ids")?;
        Ok(models.into_iter().map(permission_from_model).collect())
    }

    async fn list_for_roles(&self, role_ids: &[Uuid]) -> Result<Vec<RoleGrant>, AdminServiceError> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = role_permissions::Entity::find()
            .filter(role_permissions::Column::RoleId.is_in(role_ids.iter().copied()))
            .find_also_related(permissions::Entity)
            .order_by_asc(permissions::Column::Name)
            .all(&self.db)
            .await
            .context("list role permissions")?;
        Ok(rows
            .into_iter()
            .filter_map(|(link, permission)| {
                permission.map(|p| RoleGrant {
                    role_id: link.role_id,
                    permission: permission_from_model(p),
                })
            })
            .collect())
    }

    async fn grant(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<(), AdminServiceError> {
        if permission_ids.is_empty() {
            return Ok(());
        }
        let rows = permission_ids
            .iter()
            .map(|&permission_id| role_permissions::ActiveModel {
                role_id: Set(role_id),
                permission_id: Set(permission_id),
            });
        role_permissions::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([
                    role_permissions::Column::RoleId,
                    role_permissions::Column::PermissionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("grant permissions")?;
        Ok(())
    }

    async fn revoke_all(&self, role_id: Uuid) -> Result<(), AdminServiceError> {
        role_permissions::Entity::delete_many()
            .filter(role_permissions::Column::RoleId.eq(role_id))
            .exec(&self.db)
            .await
            .context("revoke role permissions")?;
        Ok(())
    }
}

fn permission_from_model(model: permissions::Model) -> Permission {
    Permission {
        id: model.id,
        name: model.name,
    }
}

// ── User-role repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRoleRepository {
    pub db: DatabaseConnection,
    pub admin_role_name: Arc<str>,
}

impl DbUserRoleRepository {
    /// Lock the administrator role row and check the change keeps one admin.
    ///
    /// `keeps_admin` receives the administrator role id and answers whether the
    /// user still holds it once the pending write is applied.
    async fn guard_last_admin(
        &self,
        txn: &DatabaseTransaction,
        user_id: Uuid,
        keeps_admin: impl FnOnce(Uuid) -> bool,
    ) -> Result<(), AdminServiceError> {
        let Some(admin) = roles::Entity::find()
            .filter(roles::Column::Name.eq(&*self.admin_role_name))
            .lock_exclusive()
            .one(txn)
            .await
            .context("lock administrator role")?
        else {
            return Ok(());
        };

        let holds_admin = user_roles::Entity::find_by_id((user_id, admin.id))
            .one(txn)
            .await
            .context("find administrator assignment")?
            .is_some();
        if !holds_admin {
            return Ok(());
        }
        let admin_count = user_roles::Entity::find()
            .filter(user_roles::Column::RoleId.eq(admin.id))
            .count(txn)
            .await
            .context("count administrators")?;
        ensure_admin_remains(holds_admin, keeps_admin(admin.id), admin_count)
    }
}

impl UserRoleRepository for DbUserRoleRepository {
    async fn list_all(&self) -> Result<Vec<UserRoleAssignment>, AdminServiceError> {
        let models = user_roles::Entity::find()
            .order_by_asc(user_roles::Column::AssignedAt)
            .all(&self.db)
            .await
            .context("list user roles")?;
        Ok(models.into_iter().map(assignment_from_model).collect())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserRoleAssignment>, AdminServiceError> {
        let models = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .order_by_asc(user_roles::Column::AssignedAt)
            .all(&self.db)
            .await
            .context("list roles for user")?;
        Ok(models.into_iter().map(assignment_from_model).collect())
    }

    async fn has_assignments(&self, role_id: Uuid) -> Result<bool, AdminServiceError> {
        let model = user_roles::Entity::find()
            .filter(user_roles::Column::RoleId.eq(role_id))
            .one(&self.db)
            .await
            .context("find role assignment")?;
        Ok(model.is_some())
    }

    async fn replace_for_user(
        &self,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), AdminServiceError> {
        let txn = self.db.begin().await.context("begin transaction")?;
        self.guard_last_admin(&txn, user_id, |admin_id| admin_id == role_id)
            .await?;

        user_roles::Entity::delete_many()
            .filter(user_roles::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .context("clear user roles")?;
        user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
            assigned_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .context("insert user role")?;

        txn.commit().await.context("commit transaction")?;
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, role_id: Uuid) -> Result<bool, AdminServiceError> {
        let txn = self.db.begin().await.context("begin transaction")?;
        self.guard_last_admin(&txn, user_id, |admin_id| admin_id != role_id)
            .await?;

        let result = user_roles::Entity::delete_by_id((user_id, role_id))
            .exec(&txn)
            .await
            .context("delete user role")?;

        txn.commit().await.context("commit transaction")?;
        Ok(result.rows_affected > 0)
    }

    async fn purge_user(&self, user_id: Uuid) -> Result<(), AdminServiceError> {
        let txn = self.db.begin().await.context("begin transaction")?;
        self.guard_last_admin(&txn, user_id, |_| false).await?;

        user_roles::Entity::delete_many()
            .filter(user_roles::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .context("delete user roles")?;
        profiles::Entity::delete_by_id(user_id)
            .exec(&txn)
            .await
            .context("delete profile")?;

        txn.commit().await.context("commit transaction")?;
        Ok(())
    }
}

fn assignment_from_model(model: user_roles::Model) -> UserRoleAssignment {
    UserRoleAssignment {
        user_id: model.user_id,
        role_id: model.role_id,
        assigned_at: model.assigned_at,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn list_all(&self) -> Result<Vec<Profile>, AdminServiceError> {
        let models = profiles::Entity::find()
            .all(&self.db)
            .await
            .context("list profiles")?;
        Ok(models
            .into_iter()
            .map(|m| Profile {
                id: m.id,
                is_active: m.is_active,
            })
            .collect())
    }

    async fn set_active(&self, user_id: Uuid, is_active: bool) -> Result<(), AdminServiceError> {
        profiles::Entity::insert(profiles::ActiveModel {
            id: Set(user_id),
            is_active: Set(is_active),
            updated_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(profiles::Column::Id)
                .update_columns([profiles::Column::IsActive, profiles::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("upsert profile")?;
        Ok(())
    }
}
