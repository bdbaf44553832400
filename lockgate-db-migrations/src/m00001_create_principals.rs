use sea_orm::Schema;
use sea_orm_migration::prelude::*;

pub(crate) mod principal {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "principals")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub name: String,
        pub locked_time: Option<DateTime<Utc>>,
        pub fail_auth_count: i32,
        pub last_failed: Option<DateTime<Utc>>,
        pub last_success: Option<DateTime<Utc>>,
        pub requires_preauth: bool,
        pub policy: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub key_data: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m00001_create_principals"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);

        manager
            .create_table(schema.create_table_from_entity(principal::Entity))
            .await?;

        // Listing locked principals
        manager
            .create_index(
                Index::create()
                    .table(principal::Entity)
                    .name("idx_principals_locked_time")
                    .col(Alias::new("locked_time"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(principal::Entity)
                    .name("idx_principals_locked_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(principal::Entity).to_owned())
            .await?;

        Ok(())
    }
}
