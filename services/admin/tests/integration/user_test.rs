use std::sync::Arc;

use uuid::Uuid;

use celucol_admin::domain::types::RoleSelector;
use celucol_admin::error::AdminServiceError;
use celucol_admin::usecase::caller::AuthorizeAdminUseCase;
use celucol_admin::usecase::user::{
    AssignRoleUseCase, DeleteUserUseCase, ListUsersUseCase, RemoveRoleUseCase,
    SetUserActiveInput, SetUserActiveUseCase,
};
use celucol_testing::auth::MockAuth;

use crate::helpers::{ADMIN_ROLE, MemStore, MockIdentity, identity_user};

fn assign_usecase(
    store: &MemStore,
    identity: &MockIdentity,
) -> AssignRoleUseCase<MockIdentity, MemStore, MemStore> {
    AssignRoleUseCase {
        identity: identity.clone(),
        roles: store.clone(),
        user_roles: store.clone(),
    }
}

// ── AuthorizeAdminUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_authorize_caller_holding_admin_role() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 0);
    let caller = Uuid::now_v7();
    store.assign(caller, admin.id);

    let usecase = AuthorizeAdminUseCase {
        identity: MockIdentity::default(),
        roles: store.clone(),
        user_roles: store.clone(),
        admin_role_name: Arc::from(ADMIN_ROLE),
    };
    let resolved = usecase.execute(&MockAuth::new(caller).token()).await.unwrap();
    assert_eq!(resolved, caller);
}

#[tokio::test]
async fn should_forbid_caller_without_admin_role() {
    let store = MemStore::new();
    store.add_role(ADMIN_ROLE, 0);
    let cliente = store.add_role("cliente", 0);
    let caller = Uuid::now_v7();
    store.assign(caller, cliente.id);

    let usecase = AuthorizeAdminUseCase {
        identity: MockIdentity::default(),
        roles: store.clone(),
        user_roles: store.clone(),
        admin_role_name: Arc::from(ADMIN_ROLE),
    };
    let result = usecase.execute(&MockAuth::new(caller).token()).await;
    assert!(matches!(result, Err(AdminServiceError::Forbidden)));
}

#[tokio::test]
async fn should_reject_unresolvable_token() {
    let store = MemStore::new();
    let usecase = AuthorizeAdminUseCase {
        identity: MockIdentity::default(),
        roles: store.clone(),
        user_roles: store.clone(),
        admin_role_name: Arc::from(ADMIN_ROLE),
    };
    let result = usecase.execute("garbage").await;
    assert!(matches!(result, Err(AdminServiceError::Unauthorized)));
}

// ── AssignRoleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_leave_exactly_one_role_after_assign() {
    let store = MemStore::new();
    let cliente = store.add_role("cliente", 0);
    let vendedor = store.add_role("vendedor", 0);
    let soporte = store.add_role("soporte", 0);
    let user = Uuid::now_v7();
    store.assign(user, cliente.id);
    store.assign(user, vendedor.id);

    let identity = MockIdentity::default();
    assign_usecase(&store, &identity)
        .execute(user, RoleSelector::Name("soporte".into()))
        .await
        .unwrap();

    assert_eq!(store.roles_of(user), vec![soporte.id]);
    assert_eq!(
        identity.calls.lock().unwrap().role_metadata,
        vec![(user, "soporte".to_owned())]
    );
}

#[tokio::test]
async fn should_assign_by_role_id() {
    let store = MemStore::new();
    let vendedor = store.add_role("vendedor", 0);
    let user = Uuid::now_v7();

    assign_usecase(&store, &MockIdentity::default())
        .execute(user, RoleSelector::Id(vendedor.id))
        .await
        .unwrap();
    assert_eq!(store.roles_of(user), vec![vendedor.id]);
}

#[tokio::test]
async fn should_reject_unknown_and_disabled_roles() {
    let store = MemStore::new();
    let retired = store.add_role("retirado", 0);
    store.tables.lock().unwrap().roles[0].disabled = true;
    let user = Uuid::now_v7();
    let identity = MockIdentity::default();

    let result = assign_usecase(&store, &identity)
        .execute(user, RoleSelector::Name("fantasma".into()))
        .await;
    assert!(matches!(result, Err(AdminServiceError::RoleNotFound)));

    let result = assign_usecase(&store, &identity)
        .execute(user, RoleSelector::Id(retired.id))
        .await;
    assert!(matches!(result, Err(AdminServiceError::RoleDisabled)));
    assert!(store.roles_of(user).is_empty());
}

#[tokio::test]
async fn should_reject_demoting_sole_administrator() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 0);
    store.add_role("cliente", 0);
    let only_admin = Uuid::now_v7();
    store.assign(only_admin, admin.id);

    let result = assign_usecase(&store, &MockIdentity::default())
        .execute(only_admin, RoleSelector::Name("cliente".into()))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::LastAdministrator)),
        "expected LastAdministrator, got {result:?}"
    );
    assert_eq!(store.roles_of(only_admin), vec![admin.id]);
}

#[tokio::test]
async fn should_demote_one_of_two_administrators() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 0);
    let cliente = store.add_role("cliente", 0);
    let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
    store.assign(a, admin.id);
    store.assign(b, admin.id);

    assign_usecase(&store, &MockIdentity::default())
        .execute(a, RoleSelector::Name("cliente".into()))
        .await
        .unwrap();

    assert_eq!(store.roles_of(a), vec![cliente.id]);
    assert_eq!(store.roles_of(b), vec![admin.id]);

    let result = assign_usecase(&store, &MockIdentity::default())
        .execute(b, RoleSelector::Name("cliente".into()))
        .await;
    assert!(matches!(result, Err(AdminServiceError::LastAdministrator)));
}

#[tokio::test]
async fn should_succeed_when_metadata_sync_fails() {
    let store = MemStore::new();
    let vendedor = store.add_role("vendedor", 0);
    let user = Uuid::now_v7();

    assign_usecase(&store, &MockIdentity::failing())
        .execute(user, RoleSelector::Name("vendedor".into()))
        .await
        .unwrap();
    assert_eq!(store.roles_of(user), vec![vendedor.id]);
}

// ── RemoveRoleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_remove_admin_role_from_sole_administrator() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 0);
    let user = Uuid::now_v7();
    store.assign(user, admin.id);

    let usecase = RemoveRoleUseCase {
        user_roles: store.clone(),
    };
    let result = usecase.execute(user, admin.id).await;
    assert!(matches!(result, Err(AdminServiceError::LastAdministrator)));

    let other = Uuid::now_v7();
    store.assign(other, admin.id);
    usecase.execute(user, admin.id).await.unwrap();
    assert!(store.roles_of(user).is_empty());
}

// ── SetUserActiveUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_disable_self() {
    let store = MemStore::new();
    let caller = Uuid::now_v7();
    let usecase = SetUserActiveUseCase {
        identity: MockIdentity::default(),
        profiles: store.clone(),
        sessions: store.clone(),
    };
    let result = usecase
        .execute(SetUserActiveInput {
            caller,
            user_id: caller,
            is_active: false,
        })
        .await;
    assert!(matches!(result, Err(AdminServiceError::CannotDisableSelf)));
    assert!(store.tables.lock().unwrap().profiles.is_empty());
}

#[tokio::test]
async fn should_deactivate_ban_and_revoke_sessions() {
    let store = MemStore::new();
    let user = Uuid::now_v7();
    store.tables.lock().unwrap().refresh_tokens = vec![user, user, Uuid::now_v7()];
    let identity = MockIdentity::default();

    let usecase = SetUserActiveUseCase {
        identity: identity.clone(),
        profiles: store.clone(),
        sessions: store.clone(),
    };
    usecase
        .execute(SetUserActiveInput {
            caller: Uuid::now_v7(),
            user_id: user,
            is_active: false,
        })
        .await
        .unwrap();

    let tables = store.tables.lock().unwrap();
    assert_eq!(tables.profiles.get(&user), Some(&false));
    assert_eq!(tables.refresh_tokens.len(), 1);
    assert_eq!(identity.calls.lock().unwrap().sign_in, vec![(user, false)]);
}

#[tokio::test]
async fn should_reactivate_and_lift_ban_even_if_provider_fails() {
    let store = MemStore::new();
    let user = Uuid::now_v7();
    store.tables.lock().unwrap().profiles.insert(user, false);

    let usecase = SetUserActiveUseCase {
        identity: MockIdentity::failing(),
        profiles: store.clone(),
        sessions: store.clone(),
    };
    usecase
        .execute(SetUserActiveInput {
            caller: Uuid::now_v7(),
            user_id: user,
            is_active: true,
        })
        .await
        .unwrap();
    assert_eq!(store.tables.lock().unwrap().profiles.get(&user), Some(&true));
}

// ── DeleteUserUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_delete_self() {
    let store = MemStore::new();
    let caller = Uuid::now_v7();
    let identity = MockIdentity::default();
    let usecase = DeleteUserUseCase {
        identity: identity.clone(),
        user_roles: store.clone(),
    };
    let result = usecase.execute(caller, caller).await;
    assert!(matches!(result, Err(AdminServiceError::CannotDeleteSelf)));
    assert!(identity.calls.lock().unwrap().deleted.is_empty());
}

#[tokio::test]
async fn should_not_delete_sole_administrator() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 0);
    let target = Uuid::now_v7();
    store.assign(target, admin.id);
    let identity = MockIdentity::default();

    let usecase = DeleteUserUseCase {
        identity: identity.clone(),
        user_roles: store.clone(),
    };
    let result = usecase.execute(Uuid::now_v7(), target).await;
    assert!(matches!(result, Err(AdminServiceError::LastAdministrator)));
    assert_eq!(store.roles_of(target), vec![admin.id]);
    assert!(identity.calls.lock().unwrap().deleted.is_empty());
}

#[tokio::test]
async fn should_delete_local_rows_then_identity() {
    let store = MemStore::new();
    let cliente = store.add_role("cliente", 0);
    let target = Uuid::now_v7();
    store.assign(target, cliente.id);
    store.tables.lock().unwrap().profiles.insert(target, true);
    let identity = MockIdentity::default();

    let usecase = DeleteUserUseCase {
        identity: identity.clone(),
        user_roles: store.clone(),
    };
    usecase.execute(Uuid::now_v7(), target).await.unwrap();

    assert!(store.roles_of(target).is_empty());
    assert!(store.tables.lock().unwrap().profiles.is_empty());
    assert_eq!(identity.calls.lock().unwrap().deleted, vec![target]);
}

#[tokio::test]
async fn should_surface_identity_delete_failure() {
    let store = MemStore::new();
    let target = Uuid::now_v7();
    let usecase = DeleteUserUseCase {
        identity: MockIdentity::failing(),
        user_roles: store.clone(),
    };
    let result = usecase.execute(Uuid::now_v7(), target).await;
    assert!(matches!(result, Err(AdminServiceError::Internal(_))));
}

// ── ListUsersUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_merge_identity_roles_and_profiles() {
    let store = MemStore::new();
    let vendedor = store.add_role("vendedor", 0);
    let ana = identity_user("ana@example.com", Some("cliente"));
    let luis = identity_user("luis@example.com", Some("cliente"));
    store.assign(luis.id, vendedor.id);
    store.tables.lock().unwrap().profiles.insert(luis.id, false);

    let usecase = ListUsersUseCase {
        identity: MockIdentity::with_users(vec![ana.clone(), luis.clone()]),
        roles: store.clone(),
        user_roles: store.clone(),
        profiles: store.clone(),
    };
    let users = usecase.execute().await.unwrap();
    assert_eq!(users.len(), 2);

    let ana_row = users.iter().find(|u| u.id == ana.id).unwrap();
    assert!(ana_row.roles.is_empty());
    assert_eq!(ana_row.role.as_deref(), Some("cliente"));
    assert!(ana_row.is_active);

    let luis_row = users.iter().find(|u| u.id == luis.id).unwrap();
    assert_eq!(luis_row.role.as_deref(), Some("vendedor"));
    assert_eq!(luis_row.roles.len(), 1);
    assert!(!luis_row.is_active);
}

#[tokio::test]
async fn should_fall_back_to_user_roles_when_listing_fails() {
    let store = MemStore::new();
    let vendedor = store.add_role("vendedor", 0);
    let user = Uuid::now_v7();
    store.assign(user, vendedor.id);

    let usecase = ListUsersUseCase {
        identity: MockIdentity::failing(),
        roles: store.clone(),
        user_roles: store.clone(),
        profiles: store.clone(),
    };
    let users = usecase.execute().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, user);
    assert_eq!(users[0].email, None);
    assert_eq!(users[0].role.as_deref(), Some("vendedor"));
}
