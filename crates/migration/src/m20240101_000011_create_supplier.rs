//! Create `suppliers` with geo FKs. Unique constraints on ruc, email and
//! account_number live here; the application layer does not re-check them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Supplier::Table)
                    .if_not_exists()
                    .col(uuid(Supplier::Id).primary_key())
                    .col(string_len_null(Supplier::Ruc, 255).unique_key())
                    .col(string_len_null(Supplier::CompanyName, 255))
                    .col(string_len_null(Supplier::BusinessName, 255))
                    .col(string_len_null(Supplier::Representative, 255))
                    .col(string_len_null(Supplier::Phone, 15))
                    .col(string_len_null(Supplier::Email, 255).unique_key())
                    .col(string_len_null(Supplier::Address, 255))
                    .col(string_len_null(Supplier::AccountNumber, 100).unique_key())
                    .col(uuid_null(Supplier::RegionId))
                    .col(uuid_null(Supplier::ProvinceId))
                    .col(uuid_null(Supplier::DistrictId))
                    .col(timestamp_with_time_zone(Supplier::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Supplier::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_region")
                            .from(Supplier::Table, Supplier::RegionId)
                            .to(Region::Table, Region::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_province")
                            .from(Supplier::Table, Supplier::ProvinceId)
                            .to(Province::Table, Province::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_district")
                            .from(Supplier::Table, Supplier::DistrictId)
                            .to(District::Table, District::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Supplier::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Supplier {
    #[sea_orm(iden = "suppliers")]
    Table,
    Id, Ruc, CompanyName, BusinessName, Representative, Phone, Email, Address,
    AccountNumber, RegionId, ProvinceId, DistrictId, CreatedAt, UpdatedAt,
}

#[derive(DeriveIden)]
enum Region { #[sea_orm(iden = "regions")] Table, Id }

#[derive(DeriveIden)]
enum Province { #[sea_orm(iden = "provinces")] Table, Id }

#[derive(DeriveIden)]
enum District { #[sea_orm(iden = "districts")] Table, Id }
