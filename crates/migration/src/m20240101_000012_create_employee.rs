//! Create `employees` with FKs to document type, geo hierarchy and role.
//! Includes soft-delete timestamp and unique email.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(uuid(Employee::Id).primary_key())
                    .col(string_len_null(Employee::Name, 255))
                    .col(string_len_null(Employee::LastNamePaternal, 150))
                    .col(string_len_null(Employee::LastNameMaternal, 150))
                    .col(uuid_null(Employee::DocumentTypeId))
                    .col(string_len_null(Employee::DocumentNumber, 15))
                    .col(string_len(Employee::Email, 255).unique_key().not_null())
                    .col(string_len_null(Employee::Gender, 1))
                    .col(string_len_null(Employee::Phone, 100))
                    .col(date_null(Employee::BirthDate))
                    .col(uuid_null(Employee::RegionId))
                    .col(uuid_null(Employee::ProvinceId))
                    .col(uuid_null(Employee::DistrictId))
                    .col(uuid_null(Employee::RoleId))
                    .col(decimal_len_null(Employee::Salary, 10, 2))
                    .col(text_null(Employee::Address))
                    .col(string_len_null(Employee::Photo, 255))
                    .col(timestamp_with_time_zone(Employee::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employee::UpdatedAt).not_null())
                    .col(timestamp_with_time_zone_null(Employee::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_document_type")
                            .from(Employee::Table, Employee::DocumentTypeId)
                            .to(DocumentType::Table, DocumentType::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_region")
                            .from(Employee::Table, Employee::RegionId)
                            .to(Region::Table, Region::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_province")
                            .from(Employee::Table, Employee::ProvinceId)
                            .to(Province::Table, Province::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_district")
                            .from(Employee::Table, Employee::DistrictId)
                            .to(District::Table, District::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_role")
                            .from(Employee::Table, Employee::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee {
    #[sea_orm(iden = "employees")]
    Table,
    Id, Name, LastNamePaternal, LastNameMaternal, DocumentTypeId, DocumentNumber,
    Email, Gender, Phone, BirthDate, RegionId, ProvinceId, DistrictId, RoleId,
    Salary, Address, Photo, CreatedAt, UpdatedAt, DeletedAt,
}

#[derive(DeriveIden)]
enum DocumentType { #[sea_orm(iden = "document_types")] Table, Id }

#[derive(DeriveIden)]
enum Region { #[sea_orm(iden = "regions")] Table, Id }

#[derive(DeriveIden)]
enum Province { #[sea_orm(iden = "provinces")] Table, Id }

#[derive(DeriveIden)]
enum District { #[sea_orm(iden = "districts")] Table, Id }

#[derive(DeriveIden)]
enum Role { #[sea_orm(iden = "roles")] Table, Id }
