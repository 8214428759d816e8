//! Create `payment_status` catalog with audit + soft-delete columns.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentStatus::Table)
                    .if_not_exists()
                    .col(uuid(PaymentStatus::Id).primary_key())
                    .col(string_len(PaymentStatus::Name, 100).not_null())
                    .col(string_len_null(PaymentStatus::Description, 255))
                    .col(timestamp_with_time_zone(PaymentStatus::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(PaymentStatus::UpdatedAt).not_null())
                    .col(timestamp_with_time_zone_null(PaymentStatus::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PaymentStatus::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PaymentStatus { #[sea_orm(iden = "payment_status")] Table, Id, Name, Description, CreatedAt, UpdatedAt, DeletedAt }
