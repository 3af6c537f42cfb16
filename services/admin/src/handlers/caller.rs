use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use celucol_auth_types::bearer::BearerToken;

use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::caller::AuthorizeAdminUseCase;

/// Caller resolved from the bearer token and verified to hold the administrator role.
#[derive(Debug, Clone, Copy)]
pub struct AdminCaller(pub Uuid);

impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = AdminServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = BearerToken::from_request_parts(parts, state);
        let usecase = AuthorizeAdminUseCase {
            identity: state.identity(),
            roles: state.role_repo(),
            user_roles: state.user_role_repo(),
            admin_role_name: state.admin_role_name.clone(),
        };

        async move {
            let token = token.await?;
            usecase.execute(token.as_str()).await.map(Self)
        }
    }
}
