//! Create `provinces` with FK to `regions`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Province::Table)
                    .if_not_exists()
                    .col(uuid(Province::Id).primary_key())
                    .col(string_len(Province::Name, 255).not_null())
                    .col(uuid(Province::RegionId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_province_region")
                            .from(Province::Table, Province::RegionId)
                            .to(Region::Table, Region::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Province::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Province { #[sea_orm(iden = "provinces")] Table, Id, Name, RegionId }

#[derive(DeriveIden)]
enum Region { #[sea_orm(iden = "regions")] Table, Id }
