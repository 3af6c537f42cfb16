use std::sync::Arc;

use uuid::Uuid;

use celucol_admin::domain::repository::UserRoleRepository;
use celucol_admin::domain::types::PermissionRef;
use celucol_admin::error::AdminServiceError;
use celucol_admin::usecase::role::{
    CreateRoleInput, CreateRoleUseCase, DeleteRoleUseCase, ListRolesUseCase, UpdateRoleInput,
    UpdateRoleUseCase,
};

use crate::helpers::{ADMIN_ROLE, MemStore};

fn names(list: &[&str]) -> Vec<PermissionRef> {
    list.iter().map(|n| PermissionRef::Name((*n).into())).collect()
}

fn create_usecase(store: &MemStore) -> CreateRoleUseCase<MemStore, MemStore> {
    CreateRoleUseCase {
        roles: store.clone(),
        permissions: store.clone(),
    }
}

fn update_usecase(store: &MemStore) -> UpdateRoleUseCase<MemStore, MemStore> {
    UpdateRoleUseCase {
        roles: store.clone(),
        permissions: store.clone(),
        admin_role_name: Arc::from(ADMIN_ROLE),
    }
}

fn delete_usecase(store: &MemStore) -> DeleteRoleUseCase<MemStore, MemStore> {
    DeleteRoleUseCase {
        roles: store.clone(),
        user_roles: store.clone(),
        admin_role_name: Arc::from(ADMIN_ROLE),
    }
}

// ── CreateRoleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_missing_permissions_and_link_them() {
    let store = MemStore::new();
    let role = create_usecase(&store)
        .execute(CreateRoleInput {
            name: "vendedor".into(),
            description: Some("Ventas en tienda".into()),
            permissions: names(&["orders.read", "orders.write"]),
        })
        .await
        .unwrap();

    assert_eq!(
        store.permission_names_of(role.id),
        vec!["orders.read".to_owned(), "orders.write".to_owned()]
    );
    assert_eq!(store.tables.lock().unwrap().permissions.len(), 2);
}

#[tokio::test]
async fn should_reuse_existing_permissions_on_repeat() {
    let store = MemStore::new();
    let first = create_usecase(&store)
        .execute(CreateRoleInput {
            name: "vendedor".into(),
            description: None,
            permissions: names(&["orders.read"]),
        })
        .await
        .unwrap();
    let second = create_usecase(&store)
        .execute(CreateRoleInput {
            name: "bodega".into(),
            description: None,
            permissions: names(&["orders.read", "orders.read"]),
        })
        .await
        .unwrap();

    let tables = store.tables.lock().unwrap();
    assert_eq!(tables.permissions.len(), 1);
    let perm_id = tables.permissions[0].id;
    assert!(tables.role_permissions.contains(&(first.id, perm_id)));
    assert!(tables.role_permissions.contains(&(second.id, perm_id)));
    assert_eq!(tables.role_permissions.len(), 2);
}

#[tokio::test]
async fn should_reject_duplicate_role_name() {
    let store = MemStore::new();
    store.add_role("vendedor", 0);
    let result = create_usecase(&store)
        .execute(CreateRoleInput {
            name: "vendedor".into(),
            description: None,
            permissions: vec![],
        })
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::RoleAlreadyExists)),
        "expected RoleAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_permission_id() {
    let store = MemStore::new();
    let result = create_usecase(&store)
        .execute(CreateRoleInput {
            name: "vendedor".into(),
            description: None,
            permissions: vec![PermissionRef::Existing { id: Uuid::now_v7() }],
        })
        .await;
    assert!(matches!(result, Err(AdminServiceError::PermissionNotFound)));
    assert!(store.tables.lock().unwrap().roles.is_empty());
}

// ── ListRolesUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_roles_newest_first_with_permissions() {
    let store = MemStore::new();
    let older = store.add_role("cliente", 10);
    create_usecase(&store)
        .execute(CreateRoleInput {
            name: "vendedor".into(),
            description: None,
            permissions: names(&["orders.read"]),
        })
        .await
        .unwrap();

    let usecase = ListRolesUseCase {
        roles: store.clone(),
        permissions: store.clone(),
    };
    let roles = usecase.execute().await.unwrap();

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].role.name, "vendedor");
    assert_eq!(roles[0].permissions.len(), 1);
    assert_eq!(roles[1].role.id, older.id);
    assert!(roles[1].permissions.is_empty());
}

// ── UpdateRoleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_permission_set_on_update() {
    let store = MemStore::new();
    let role = create_usecase(&store)
        .execute(CreateRoleInput {
            name: "vendedor".into(),
            description: None,
            permissions: names(&["orders.read", "orders.write"]),
        })
        .await
        .unwrap();

    let usecase = update_usecase(&store);
    usecase
        .execute(UpdateRoleInput {
            id: role.id,
            name: Some("vendedor senior".into()),
            description: Some("Ventas y devoluciones".into()),
            permissions: names(&["refunds.write"]),
        })
        .await
        .unwrap();

    let updated = store.role(role.id).unwrap();
    assert_eq!(updated.name, "vendedor senior");
    assert_eq!(updated.description.as_deref(), Some("Ventas y devoluciones"));
    assert_eq!(
        store.permission_names_of(role.id),
        vec!["refunds.write".to_owned()]
    );
}

#[tokio::test]
async fn should_return_role_not_found_on_update_of_unknown_id() {
    let store = MemStore::new();
    let usecase = update_usecase(&store);
    let result = usecase
        .execute(UpdateRoleInput {
            id: Uuid::now_v7(),
            name: Some("x".into()),
            description: None,
            permissions: vec![],
        })
        .await;
    assert!(matches!(result, Err(AdminServiceError::RoleNotFound)));
}

#[tokio::test]
async fn should_refuse_renaming_administrator_role() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 10);
    let cliente = store.add_role("cliente", 0);
    let sole_admin = Uuid::now_v7();
    store.assign(sole_admin, admin.id);

    let result = update_usecase(&store)
        .execute(UpdateRoleInput {
            id: admin.id,
            name: Some("ex-admin".into()),
            description: None,
            permissions: vec![],
        })
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::ProtectedRole)),
        "expected ProtectedRole, got {result:?}"
    );
    assert_eq!(store.role(admin.id).unwrap().name, ADMIN_ROLE);

    // The guard still sees the administrator role, so the sole holder stays.
    let demote = store.replace_for_user(sole_admin, cliente.id).await;
    assert!(matches!(demote, Err(AdminServiceError::LastAdministrator)));
    assert_eq!(store.roles_of(sole_admin), vec![admin.id]);
}

#[tokio::test]
async fn should_refuse_taking_the_administrator_name() {
    let store = MemStore::new();
    let role = store.add_role("vendedor", 0);

    let result = update_usecase(&store)
        .execute(UpdateRoleInput {
            id: role.id,
            name: Some(format!("  {ADMIN_ROLE} ")),
            description: None,
            permissions: vec![],
        })
        .await;
    assert!(matches!(result, Err(AdminServiceError::ProtectedRole)));
    assert_eq!(store.role(role.id).unwrap().name, "vendedor");
}

#[tokio::test]
async fn should_update_administrator_permissions_when_name_is_kept() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 0);

    update_usecase(&store)
        .execute(UpdateRoleInput {
            id: admin.id,
            name: Some(ADMIN_ROLE.into()),
            description: Some("Acceso total".into()),
            permissions: names(&["roles.manage"]),
        })
        .await
        .unwrap();

    let updated = store.role(admin.id).unwrap();
    assert_eq!(updated.name, ADMIN_ROLE);
    assert_eq!(updated.description.as_deref(), Some("Acceso total"));
    assert_eq!(
        store.permission_names_of(admin.id),
        vec!["roles.manage".to_owned()]
    );
}

// ── DeleteRoleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_hard_delete_of_assigned_role() {
    let store = MemStore::new();
    let role = store.add_role("vendedor", 0);
    store.assign(Uuid::now_v7(), role.id);

    let result = delete_usecase(&store).execute(role.id, true).await;
    assert!(
        matches!(result, Err(AdminServiceError::RoleInUse)),
        "expected RoleInUse, got {result:?}"
    );
    assert!(store.role(role.id).is_some());
}

#[tokio::test]
async fn should_soft_delete_assigned_role() {
    let store = MemStore::new();
    let role = store.add_role("vendedor", 0);
    let user = Uuid::now_v7();
    store.assign(user, role.id);

    delete_usecase(&store).execute(role.id, false).await.unwrap();

    let role = store.role(role.id).unwrap();
    assert!(role.disabled);
    assert_eq!(store.roles_of(user), vec![role.id]);
}

#[tokio::test]
async fn should_hard_delete_unassigned_role_and_its_links() {
    let store = MemStore::new();
    let role = create_usecase(&store)
        .execute(CreateRoleInput {
            name: "temporal".into(),
            description: None,
            permissions: names(&["orders.read"]),
        })
        .await
        .unwrap();

    delete_usecase(&store).execute(role.id, true).await.unwrap();

    let tables = store.tables.lock().unwrap();
    assert!(tables.roles.iter().all(|r| r.id != role.id));
    assert!(tables.role_permissions.is_empty());
    assert_eq!(tables.permissions.len(), 1);
}

#[tokio::test]
async fn should_protect_administrator_role_from_deletion() {
    let store = MemStore::new();
    let admin = store.add_role(ADMIN_ROLE, 0);

    for hard in [false, true] {
        let result = delete_usecase(&store).execute(admin.id, hard).await;
        assert!(matches!(result, Err(AdminServiceError::ProtectedRole)));
    }
    assert!(!store.role(admin.id).unwrap().disabled);
}

#[tokio::test]
async fn should_return_role_not_found_on_delete_of_unknown_id() {
    let store = MemStore::new();
    let result = delete_usecase(&store).execute(Uuid::now_v7(), false).await;
    assert!(matches!(result, Err(AdminServiceError::RoleNotFound)));
}
