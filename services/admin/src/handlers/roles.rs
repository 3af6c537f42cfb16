use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Permission, PermissionRef, Role, RoleWithPermissions};
use crate::error::AdminServiceError;
use crate::handlers::caller::AdminCaller;
use crate::handlers::{DataResponse, JsonBody, SuccessResponse};
use crate::state::AppState;
use crate::usecase::role::{
    CreateRoleInput, CreateRoleUseCase, DeleteRoleUseCase, ListRolesUseCase, UpdateRoleInput,
    UpdateRoleUseCase,
};

#[derive(Serialize)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    #[serde(serialize_with = "celucol_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
            disabled: role.disabled,
            created_at: role.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct PermissionResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Permission> for PermissionResponse {
    fn from(p: Permission) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Serialize)]
pub struct RoleWithPermissionsResponse {
    #[serde(flatten)]
    pub role: RoleResponse,
    pub permissions: Vec<PermissionResponse>,
}

impl From<RoleWithPermissions> for RoleWithPermissionsResponse {
    fn from(rwp: RoleWithPermissions) -> Self {
        Self {
            role: rwp.role.into(),
            permissions: rwp.permissions.into_iter().map(Into::into).collect(),
        }
    }
}

// ── GET /manage-roles ────────────────────────────────────────────────────────

pub async fn list_roles(
    _caller: AdminCaller,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<RoleWithPermissionsResponse>>>, AdminServiceError> {
    let usecase = ListRolesUseCase {
        roles: state.role_repo(),
        permissions: state.permission_repo(),
    };
    let roles = usecase.execute().await?;
    Ok(Json(DataResponse {
        data: roles.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /manage-roles ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionRef>,
}

#[derive(Serialize)]
pub struct CreatedRole {
    pub role: RoleResponse,
}

pub async fn create_role(
    _caller: AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRoleRequest>,
) -> Result<(StatusCode, Json<DataResponse<CreatedRole>>), AdminServiceError> {
    let name = body.name.ok_or(AdminServiceError::MissingData("role name"))?;
    let usecase = CreateRoleUseCase {
        roles: state.role_repo(),
        permissions: state.permission_repo(),
    };
    let role = usecase
        .execute(CreateRoleInput {
            name,
            description: body.description,
            permissions: body.permissions,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedRole { role: role.into() },
        }),
    ))
}

// ── PUT /manage-roles ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionRef>,
}

pub async fn update_role(
    _caller: AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateRoleRequest>,
) -> Result<Json<SuccessResponse>, AdminServiceError> {
    let id = body.id.ok_or(AdminServiceError::MissingData("role id"))?;
    let usecase = UpdateRoleUseCase {
        roles: state.role_repo(),
        permissions: state.permission_repo(),
        admin_role_name: state.admin_role_name.clone(),
    };
    usecase
        .execute(UpdateRoleInput {
            id,
            name: body.name,
            description: body.description,
            permissions: body.permissions,
        })
        .await?;
    Ok(SuccessResponse::ok())
}

// ── DELETE /manage-roles ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DeleteRoleRequest {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub hard: bool,
}

pub async fn delete_role(
    _caller: AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRoleRequest>,
) -> Result<Json<SuccessResponse>, AdminServiceError> {
    let id = body.id.ok_or(AdminServiceError::MissingData("role id"))?;
    let usecase = DeleteRoleUseCase {
        roles: state.role_repo(),
        user_roles: state.user_role_repo(),
        admin_role_name: state.admin_role_name.clone(),
    };
    usecase.execute(id, body.hard).await?;
    Ok(SuccessResponse::ok())
}
