//! Create `payment_types` catalog with audit + soft-delete columns.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentType::Table)
                    .if_not_exists()
                    .col(uuid(PaymentType::Id).primary_key())
                    .col(string_len(PaymentType::Name, 100).not_null())
                    .col(string_len_null(PaymentType::Description, 255))
                    .col(timestamp_with_time_zone(PaymentType::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(PaymentType::UpdatedAt).not_null())
                    .col(timestamp_with_time_zone_null(PaymentType::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PaymentType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PaymentType { #[sea_orm(iden = "payment_types")] Table, Id, Name, Description, CreatedAt, UpdatedAt, DeletedAt }
