use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use models::{brand, country};

use crate::errors::ServiceError;

/// Brands have no soft-delete lifecycle; listing returns every row.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<brand::Model>, ServiceError> {
    brand::Entity::find()
        .order_by_asc(brand::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<brand::Model>, ServiceError> {
    brand::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

async fn ensure_country(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    country::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::field("country", "country does not exist"))?;
    Ok(())
}

/// Creating a brand requires an existing country; edits may leave it alone.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
    country_id: Uuid,
) -> Result<brand::Model, ServiceError> {
    brand::validate_name(name)?;
    ensure_country(db, country_id).await?;
    let now = Utc::now().into();
    let am = brand::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(description.map(|d| d.to_string())),
        country_id: Set(Some(country_id)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
    country_id: Option<Uuid>,
) -> Result<brand::Model, ServiceError> {
    let found = get_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("brand"))?;
    let mut am: brand::ActiveModel = found.into();
    if let Some(n) = name {
        brand::validate_name(n)?;
        am.name = Set(n.to_string());
    }
    if let Some(d) = description {
        am.description = Set(Some(d.to_string()));
    }
    if let Some(cid) = country_id {
        ensure_country(db, cid).await?;
        am.country_id = Set(Some(cid));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete; `false` means the id did not exist.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = brand::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
