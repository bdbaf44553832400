use sea_orm::Schema;
use sea_orm_migration::prelude::*;

pub(crate) mod password_policy {
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "password_policies")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub max_fail: i32,
        pub failcnt_interval: i32,
        pub lockout_duration: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m00002_create_password_policies"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);

        manager
            .create_table(schema.create_table_from_entity(password_policy::Entity))
            .await?;

        // Not unique: duplicate names must stay representable so that
        // resolution can report them
        manager
            .create_index(
                Index::create()
                    .table(password_policy::Entity)
                    .name("idx_password_policies_name")
                    .col(Alias::new("name"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(password_policy::Entity)
                    .name("idx_password_policies_name")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(password_policy::Entity).to_owned())
            .await?;

        Ok(())
    }
}
