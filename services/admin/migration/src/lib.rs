use sea_orm_migration::prelude::*;

mod m20251020_000001_create_roles;
mod m20251020_000002_create_permissions;
mod m20251020_000003_create_role_permissions;
mod m20251020_000004_create_user_roles;
mod m20251020_000005_create_profiles;
mod m20251020_000006_seed_default_roles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_roles::Migration),
            Box::new(m20251020_000002_create_permissions::Migration),
            Box::new(m20251020_000003_create_role_permissions::Migration),
            Box::new(m20251020_000004_create_user_roles::Migration),
            Box::new(m20251020_000005_create_profiles::Migration),
            Box::new(m20251020_000006_seed_default_roles::Migration),
        ]
    }
}
