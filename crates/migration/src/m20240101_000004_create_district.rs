//! Create `districts` with FK to `provinces`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(District::Table)
                    .if_not_exists()
                    .col(uuid(District::Id).primary_key())
                    .col(string_len(District::Name, 255).not_null())
                    .col(uuid(District::ProvinceId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_district_province")
                            .from(District::Table, District::ProvinceId)
                            .to(Province::Table, Province::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(District::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum District { #[sea_orm(iden = "districts")] Table, Id, Name, ProvinceId }

#[derive(DeriveIden)]
enum Province { #[sea_orm(iden = "provinces")] Table, Id }
