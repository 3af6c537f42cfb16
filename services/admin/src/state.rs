use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbPermissionRepository, DbProfileRepository, DbRoleRepository, DbUserRoleRepository,
};
use crate::infra::identity::SupabaseIdentityClient;
use crate::infra::session::DbSessionRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub identity: SupabaseIdentityClient,
    pub admin_role_name: Arc<str>,
}

impl AppState {
    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn permission_repo(&self) -> DbPermissionRepository {
        DbPermissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_role_repo(&self) -> DbUserRoleRepository {
        DbUserRoleRepository {
            db: self.db.clone(),
            admin_role_name: self.admin_role_name.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn identity(&self) -> SupabaseIdentityClient {
        self.identity.clone()
    }
}
