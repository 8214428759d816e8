use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::document_type;

use crate::errors::ServiceError;

/// All non-soft-deleted rows, ordered by name.
pub async fn list_active(db: &DatabaseConnection) -> Result<Vec<document_type::Model>, ServiceError> {
    document_type::Entity::find()
        .filter(document_type::Column::DeletedAt.is_null())
        .order_by_asc(document_type::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get an active row by id; soft-deleted rows are treated as absent.
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<document_type::Model>, ServiceError> {
    document_type::Entity::find_by_id(id)
        .filter(document_type::Column::DeletedAt.is_null())
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, name: &str, description: Option<&str>) -> Result<document_type::Model, ServiceError> {
    let created = document_type::create(db, name, description).await?;
    Ok(created)
}

/// Apply field overwrites for the fields that are present and persist.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<document_type::Model, ServiceError> {
    let found = get_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("document type"))?;
    let mut am: document_type::ActiveModel = found.into();
    if let Some(n) = name {
        document_type::validate_name(n)?;
        am.name = Set(n.to_string());
    }
    if let Some(d) = description {
        am.description = Set(Some(d.to_string()));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Stamp `deleted_at`; the row stays fetchable by raw primary key.
pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<document_type::Model, ServiceError> {
    let found = get_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("document type"))?;
    let mut am: document_type::ActiveModel = found.into();
    am.deleted_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}
