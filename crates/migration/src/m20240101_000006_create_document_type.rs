//! Create `document_types` catalog with audit + soft-delete columns.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentType::Table)
                    .if_not_exists()
                    .col(uuid(DocumentType::Id).primary_key())
                    .col(string_len(DocumentType::Name, 255).not_null())
                    .col(string_len_null(DocumentType::Description, 255))
                    .col(timestamp_with_time_zone(DocumentType::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(DocumentType::UpdatedAt).not_null())
                    .col(timestamp_with_time_zone_null(DocumentType::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(DocumentType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum DocumentType { #[sea_orm(iden = "document_types")] Table, Id, Name, Description, CreatedAt, UpdatedAt, DeletedAt }
