use anyhow::Context as _;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use celucol_core::error::AppError;
use celucol_core::health::healthz;
use celucol_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    roles::{create_role, delete_role, list_roles, update_role},
    users::{
        add_user_role, assign_role, delete_user, list_users, remove_user_role, set_user_active,
    },
};
use crate::state::AppState;

/// Readiness probe: the database must answer a ping.
async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .db
        .ping()
        .await
        .context("database ping")
        .map_err(AppError::Unavailable)?;
    Ok(StatusCode::OK)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Roles
        .route("/manage-roles", get(list_roles))
        .route("/manage-roles", post(create_role))
        .route("/manage-roles", put(update_role))
        .route("/manage-roles", delete(delete_role))
        // Legacy assignment routes
        .route("/manage-roles/users", get(list_users))
        .route("/manage-roles/users", post(add_user_role))
        .route("/manage-roles/users", delete(remove_user_role))
        // User management
        .route("/manage-roles/manage-users", get(list_users))
        .route("/manage-roles/manage-users/assign-role", post(assign_role))
        .route("/manage-roles/manage-users/disable", patch(set_user_active))
        .route("/manage-roles/manage-users/delete", delete(delete_user))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .layer(cors_layer())
        .with_state(state)
}
