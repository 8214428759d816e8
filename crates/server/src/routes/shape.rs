//! Response shaping helpers: related objects are echoed as `{id, name}`
//! pairs or null, matching the list/detail bodies across entities.

use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::{json, Value};
use uuid::Uuid;

use models::{country, district, document_type, employee, province, region, role, supplier};
use service::errors::ServiceError;
use service::photo::PhotoStore;

use crate::errors::JsonApiError;

fn db_err(e: sea_orm::DbErr) -> JsonApiError {
    ServiceError::Db(e.to_string()).into()
}

pub async fn country_ref(db: &DatabaseConnection, id: Option<Uuid>) -> Result<Value, JsonApiError> {
    let Some(id) = id else { return Ok(Value::Null) };
    Ok(match country::Entity::find_by_id(id).one(db).await.map_err(db_err)? {
        Some(c) => json!({ "id": c.id, "name": c.name }),
        None => Value::Null,
    })
}

pub async fn region_ref(db: &DatabaseConnection, id: Option<Uuid>) -> Result<Value, JsonApiError> {
    let Some(id) = id else { return Ok(Value::Null) };
    Ok(match region::Entity::find_by_id(id).one(db).await.map_err(db_err)? {
        Some(r) => json!({ "id": r.id, "name": r.name }),
        None => Value::Null,
    })
}

pub async fn province_ref(db: &DatabaseConnection, id: Option<Uuid>) -> Result<Value, JsonApiError> {
    let Some(id) = id else { return Ok(Value::Null) };
    Ok(match province::Entity::find_by_id(id).one(db).await.map_err(db_err)? {
        Some(p) => json!({ "id": p.id, "name": p.name }),
        None => Value::Null,
    })
}

pub async fn district_ref(db: &DatabaseConnection, id: Option<Uuid>) -> Result<Value, JsonApiError> {
    let Some(id) = id else { return Ok(Value::Null) };
    Ok(match district::Entity::find_by_id(id).one(db).await.map_err(db_err)? {
        Some(d) => json!({ "id": d.id, "name": d.name }),
        None => Value::Null,
    })
}

pub async fn document_type_ref(db: &DatabaseConnection, id: Option<Uuid>) -> Result<Value, JsonApiError> {
    let Some(id) = id else { return Ok(Value::Null) };
    Ok(match document_type::Entity::find_by_id(id).one(db).await.map_err(db_err)? {
        Some(d) => json!({ "id": d.id, "name": d.name }),
        None => Value::Null,
    })
}

pub async fn role_ref(db: &DatabaseConnection, id: Option<Uuid>) -> Result<Value, JsonApiError> {
    let Some(id) = id else { return Ok(Value::Null) };
    Ok(match role::Entity::find_by_id(id).one(db).await.map_err(db_err)? {
        Some(r) => json!({ "id": r.id, "name": r.name }),
        None => Value::Null,
    })
}

pub async fn supplier_body(db: &DatabaseConnection, m: &supplier::Model) -> Result<Value, JsonApiError> {
    Ok(json!({
        "id": m.id,
        "ruc": m.ruc,
        "company_name": m.company_name,
        "business_name": m.business_name,
        "representative": m.representative,
        "phone": m.phone,
        "email": m.email,
        "address": m.address,
        "account_number": m.account_number,
        "region": region_ref(db, m.region_id).await?,
        "province": province_ref(db, m.province_id).await?,
        "district": district_ref(db, m.district_id).await?,
        "created_at": m.created_at.to_rfc3339(),
        "updated_at": m.updated_at.to_rfc3339(),
    }))
}

pub async fn employee_body(db: &DatabaseConnection, m: &employee::Model) -> Result<Value, JsonApiError> {
    Ok(json!({
        "id": m.id,
        "name": m.name,
        "last_name_paternal": m.last_name_paternal,
        "last_name_maternal": m.last_name_maternal,
        "full_name": m.full_name(),
        "document_type": document_type_ref(db, m.document_type_id).await?,
        "document_number": m.document_number,
        "email": m.email,
        "gender": m.gender,
        "phone": m.phone,
        "birth_date": m.birth_date.map(|d| d.to_string()),
        "region": region_ref(db, m.region_id).await?,
        "province": province_ref(db, m.province_id).await?,
        "district": district_ref(db, m.district_id).await?,
        "role": role_ref(db, m.role_id).await?,
        "salary": m.salary,
        "address": m.address,
        "photo_url": m.photo.as_deref().map(PhotoStore::url),
        "created_at": m.created_at.to_rfc3339(),
        "updated_at": m.updated_at.to_rfc3339(),
    }))
}
