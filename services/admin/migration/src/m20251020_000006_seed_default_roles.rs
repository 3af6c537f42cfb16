use sea_orm_migration::prelude::*;

/// Roles offered by the admin panel out of the box.
const DEFAULT_ROLES: [(&str, &str); 2] = [
    ("administrador", "Acceso completo al panel de administración"),
    ("cliente", "Cliente de la tienda"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Roles::Table)
            .columns([Roles::Name, Roles::Description]);
        for (name, description) in DEFAULT_ROLES {
            insert.values_panic([name.into(), description.into()]);
        }
        insert.on_conflict(OnConflict::column(Roles::Name).do_nothing().to_owned());
        manager.exec_stmt(insert.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names = DEFAULT_ROLES.map(|(name, _)| name);
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Roles::Table)
                    .and_where(Expr::col(Roles::Name).is_in(names))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Roles {
    Table,
    Name,
    Description,
}
