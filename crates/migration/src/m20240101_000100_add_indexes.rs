use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Geo lookups walk the hierarchy by parent id
        manager
            .create_index(
                Index::create()
                    .name("idx_province_region")
                    .table(Province::Table)
                    .col(Province::RegionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_district_province")
                    .table(District::Table)
                    .col(District::ProvinceId)
                    .to_owned(),
            )
            .await?;

        // Active-row listings filter on deleted_at
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_deleted_at")
                    .table(Employee::Table)
                    .col(Employee::DeletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employee_document_number")
                    .table(Employee::Table)
                    .col(Employee::DocumentNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_employee_document_number").table(Employee::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_employee_deleted_at").table(Employee::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_district_province").table(District::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_province_region").table(Province::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Province { #[sea_orm(iden = "provinces")] Table, RegionId }

#[derive(DeriveIden)]
enum District { #[sea_orm(iden = "districts")] Table, ProvinceId }

#[derive(DeriveIden)]
enum Employee { #[sea_orm(iden = "employees")] Table, DeletedAt, DocumentNumber }
