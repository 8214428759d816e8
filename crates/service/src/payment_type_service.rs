use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::payment_type;

use crate::errors::ServiceError;

pub async fn list_active(db: &DatabaseConnection) -> Result<Vec<payment_type::Model>, ServiceError> {
    payment_type::Entity::find()
        .filter(payment_type::Column::DeletedAt.is_null())
        .order_by_asc(payment_type::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<payment_type::Model>, ServiceError> {
    payment_type::Entity::find_by_id(id)
        .filter(payment_type::Column::DeletedAt.is_null())
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, name: &str, description: Option<&str>) -> Result<payment_type::Model, ServiceError> {
    let created = payment_type::create(db, name, description).await?;
    Ok(created)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<payment_type::Model, ServiceError> {
    let found = get_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("payment type"))?;
    let mut am: payment_type::ActiveModel = found.into();
    if let Some(n) = name {
        payment_type::validate_name(n)?;
        am.name = Set(n.to_string());
    }
    if let Some(d) = description {
        am.description = Set(Some(d.to_string()));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<payment_type::Model, ServiceError> {
    let found = get_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("payment type"))?;
    let mut am: payment_type::ActiveModel = found.into();
    am.deleted_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}
