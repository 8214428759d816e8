//! Create `brands` with FK to `countries`. No soft-delete column; the
//! delete path removes the row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brand::Table)
                    .if_not_exists()
                    .col(uuid(Brand::Id).primary_key())
                    .col(string_len(Brand::Name, 255).not_null())
                    .col(string_len_null(Brand::Description, 255))
                    .col(uuid_null(Brand::CountryId))
                    .col(timestamp_with_time_zone(Brand::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Brand::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_brand_country")
                            .from(Brand::Table, Brand::CountryId)
                            .to(Country::Table, Country::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Brand::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Brand { #[sea_orm(iden = "brands")] Table, Id, Name, Description, CountryId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Country { #[sea_orm(iden = "countries")] Table, Id }
