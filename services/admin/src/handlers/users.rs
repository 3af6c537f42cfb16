use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{ManagedUser, RoleSelector, UserMetadata};
use crate::error::AdminServiceError;
use crate::handlers::caller::AdminCaller;
use crate::handlers::roles::RoleResponse;
use crate::handlers::{DataResponse, JsonBody, SuccessResponse};
use crate::state::AppState;
use crate::usecase::user::{
    AssignRoleUseCase, DeleteUserUseCase, ListUsersUseCase, RemoveRoleUseCase,
    SetUserActiveInput, SetUserActiveUseCase,
};

#[derive(Serialize)]
pub struct ManagedUserResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub roles: Vec<RoleResponse>,
    pub role: Option<String>,
    pub user_metadata: Option<UserMetadata>,
    pub is_active: bool,
}

impl From<ManagedUser> for ManagedUserResponse {
    fn from(user: ManagedUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            roles: user.roles.into_iter().map(Into::into).collect(),
            role: user.role,
            user_metadata: user.user_metadata,
            is_active: user.is_active,
        }
    }
}

// ── GET /manage-roles/manage-users ───────────────────────────────────────────

pub async fn list_users(
    _caller: AdminCaller,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<ManagedUserResponse>>>, AdminServiceError> {
    let usecase = ListUsersUseCase {
        identity: state.identity(),
        roles: state.role_repo(),
        user_roles: state.user_role_repo(),
        profiles: state.profile_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /manage-roles/manage-users/assign-role ──────────────────────────────

#[derive(Deserialize)]
pub struct AssignRoleRequest {
    pub user_id: Option<Uuid>,
    pub role_name: Option<String>,
}

pub async fn assign_role(
    _caller: AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AssignRoleRequest>,
) -> Result<Json<SuccessResponse>, AdminServiceError> {
    let user_id = body.user_id.ok_or(AdminServiceError::MissingData("user_id"))?;
    let role_name = body
        .role_name
        .filter(|n| !n.trim().is_empty())
        .ok_or(AdminServiceError::MissingData("role_name"))?;
    let usecase = AssignRoleUseCase {
        identity: state.identity(),
        roles: state.role_repo(),
        user_roles: state.user_role_repo(),
    };
    usecase
        .execute(user_id, RoleSelector::Name(role_name))
        .await?;
    Ok(SuccessResponse::ok())
}

// ── POST/DELETE /manage-roles/users ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserRoleRequest {
    pub user_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
}

impl UserRoleRequest {
    fn into_ids(self) -> Result<(Uuid, Uuid), AdminServiceError> {
        Ok((
            self.user_id.ok_or(AdminServiceError::MissingData("user_id"))?,
            self.role_id.ok_or(AdminServiceError::MissingData("role_id"))?,
        ))
    }
}

pub async fn add_user_role(
    _caller: AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserRoleRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), AdminServiceError> {
    let (user_id, role_id) = body.into_ids()?;
    let usecase = AssignRoleUseCase {
        identity: state.identity(),
        roles: state.role_repo(),
        user_roles: state.user_role_repo(),
    };
    usecase.execute(user_id, RoleSelector::Id(role_id)).await?;
    Ok((StatusCode::CREATED, SuccessResponse::ok()))
}

pub async fn remove_user_role(
    _caller: AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserRoleRequest>,
) -> Result<Json<SuccessResponse>, AdminServiceError> {
    let (user_id, role_id) = body.into_ids()?;
    let usecase = RemoveRoleUseCase {
        user_roles: state.user_role_repo(),
    };
    usecase.execute(user_id, role_id).await?;
    Ok(SuccessResponse::ok())
}

// ── PATCH /manage-roles/manage-users/disable ─────────────────────────────────

#[derive(Deserialize)]
pub struct DisableUserRequest {
    pub user_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

pub async fn set_user_active(
    AdminCaller(caller): AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DisableUserRequest>,
) -> Result<Json<SuccessResponse>, AdminServiceError> {
    let user_id = body.user_id.ok_or(AdminServiceError::MissingData("user_id"))?;
    let is_active = body
        .is_active
        .ok_or(AdminServiceError::MissingData("is_active"))?;
    let usecase = SetUserActiveUseCase {
        identity: state.identity(),
        profiles: state.profile_repo(),
        sessions: state.session_repo(),
    };
    usecase
        .execute(SetUserActiveInput {
            caller,
            user_id,
            is_active,
        })
        .await?;
    Ok(SuccessResponse::ok())
}

// ── DELETE /manage-roles/manage-users/delete ─────────────────────────────────

#[derive(Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: Option<Uuid>,
}

pub async fn delete_user(
    AdminCaller(caller): AdminCaller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteUserRequest>,
) -> Result<Json<SuccessResponse>, AdminServiceError> {
    let user_id = body.user_id.ok_or(AdminServiceError::MissingData("user_id"))?;
    let usecase = DeleteUserUseCase {
        identity: state.identity(),
        user_roles: state.user_role_repo(),
    };
    usecase.execute(caller, user_id).await?;
    Ok(SuccessResponse::ok())
}
