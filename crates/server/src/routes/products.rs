//! Category, brand and supplier endpoints. Category routes are mounted
//! behind the API-key middleware in `build_router`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use models::{brand, category};
use service::supplier_service::{SupplierInput, SupplierUpdate};
use service::{brand_service, category_service, supplier_service};

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::routes::shape;

use super::types::{CatalogCreate, CatalogEdit};

fn accept_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    payload.map(|Json(v)| v).map_err(|e| JsonApiError::bad_json(e.body_text()))
}

// --- categories ---

fn category_body(m: &category::Model) -> Value {
    json!({
        "id": m.id,
        "name": m.name,
        "description": m.description,
        "created_at": m.created_at.to_rfc3339(),
        "updated_at": m.updated_at.to_rfc3339(),
    })
}

pub async fn category_list(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = category_service::list_active(&state.db).await?;
    let data: Vec<Value> = rows.iter().map(category_body).collect();
    Ok(Json(json!({ "category": data })))
}

pub async fn category_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = category_service::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("category not found"))?;
    Ok(Json(category_body(&m)))
}

pub async fn category_create(
    State(state): State<ServerState>,
    payload: Result<Json<CatalogCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let body = accept_json(payload)?;
    let m = category_service::create(&state.db, &body.name, body.description.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "category created", "category": category_body(&m) })),
    ))
}

pub async fn category_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CatalogEdit>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let body = accept_json(payload)?;
    let m = category_service::update(&state.db, id, body.name.as_deref(), body.description.as_deref()).await?;
    Ok(Json(json!({ "message": "category updated", "category": category_body(&m) })))
}

pub async fn category_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    category_service::soft_delete(&state.db, id).await?;
    Ok(Json(json!({ "status": "deleted", "id": id })))
}

// --- brands ---

/// `country` is required on create; the handler reports it as a field
/// error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct BrandCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "country")]
    pub country_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BrandEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "country")]
    pub country_id: Option<Uuid>,
}

async fn brand_body(state: &ServerState, m: &brand::Model) -> Result<Value, JsonApiError> {
    Ok(json!({
        "id": m.id,
        "name": m.name,
        "description": m.description,
        "country": shape::country_ref(&state.db, m.country_id).await?,
        "created_at": m.created_at.to_rfc3339(),
        "updated_at": m.updated_at.to_rfc3339(),
    }))
}

pub async fn brand_list(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = brand_service::list(&state.db).await?;
    let mut data = Vec::with_capacity(rows.len());
    for m in &rows {
        data.push(brand_body(&state, m).await?);
    }
    Ok(Json(json!({ "brands": data })))
}

pub async fn brand_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = brand_service::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("brand not found"))?;
    Ok(Json(brand_body(&state, &m).await?))
}

pub async fn brand_create(
    State(state): State<ServerState>,
    payload: Result<Json<BrandCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let body = accept_json(payload)?;
    let Some(country_id) = body.country_id else {
        return Err(JsonApiError::field_errors("country", "this field is required"));
    };
    let m = brand_service::create(&state.db, &body.name, body.description.as_deref(), country_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "brand created", "brand": brand_body(&state, &m).await? })),
    ))
}

pub async fn brand_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<BrandEdit>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let body = accept_json(payload)?;
    let m = brand_service::update(&state.db, id, body.name.as_deref(), body.description.as_deref(), body.country_id).await?;
    Ok(Json(json!({ "message": "brand updated", "brand": brand_body(&state, &m).await? })))
}

pub async fn brand_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    if !brand_service::delete(&state.db, id).await? {
        return Err(JsonApiError::not_found("brand not found"));
    }
    Ok(Json(json!({ "status": "deleted", "id": id })))
}

// --- suppliers ---

/// Related ids arrive under the bare relation name.
#[derive(Debug, Default, Deserialize)]
pub struct SupplierBody {
    pub ruc: Option<String>,
    pub company_name: Option<String>,
    pub business_name: Option<String>,
    pub representative: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub account_number: Option<String>,
    #[serde(rename = "region")]
    pub region_id: Option<Uuid>,
    #[serde(rename = "province")]
    pub province_id: Option<Uuid>,
    #[serde(rename = "district")]
    pub district_id: Option<Uuid>,
}

impl From<SupplierBody> for SupplierInput {
    fn from(b: SupplierBody) -> Self {
        SupplierInput {
            ruc: b.ruc,
            company_name: b.company_name,
            business_name: b.business_name,
            representative: b.representative,
            phone: b.phone,
            email: b.email,
            address: b.address,
            account_number: b.account_number,
            region_id: b.region_id,
            province_id: b.province_id,
            district_id: b.district_id,
        }
    }
}

/// Edit body; an explicit `null` clears the column, an absent field keeps
/// the stored value. See [`crate::routes::double_option`].
#[derive(Debug, Default, Deserialize)]
pub struct SupplierEditBody {
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub ruc: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub company_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub business_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub representative: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub account_number: Option<Option<String>>,
    #[serde(default, rename = "region", deserialize_with = "crate::routes::double_option")]
    pub region_id: Option<Option<Uuid>>,
    #[serde(default, rename = "province", deserialize_with = "crate::routes::double_option")]
    pub province_id: Option<Option<Uuid>>,
    #[serde(default, rename = "district", deserialize_with = "crate::routes::double_option")]
    pub district_id: Option<Option<Uuid>>,
}

impl From<SupplierEditBody> for SupplierUpdate {
    fn from(b: SupplierEditBody) -> Self {
        SupplierUpdate {
            ruc: b.ruc,
            company_name: b.company_name,
            business_name: b.business_name,
            representative: b.representative,
            phone: b.phone,
            email: b.email,
            address: b.address,
            account_number: b.account_number,
            region_id: b.region_id,
            province_id: b.province_id,
            district_id: b.district_id,
        }
    }
}

pub async fn supplier_list(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = supplier_service::list(&state.db).await?;
    let mut data = Vec::with_capacity(rows.len());
    for m in &rows {
        data.push(shape::supplier_body(&state.db, m).await?);
    }
    Ok(Json(json!({ "suppliers": data })))
}

pub async fn supplier_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = supplier_service::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("supplier not found"))?;
    Ok(Json(shape::supplier_body(&state.db, &m).await?))
}

pub async fn supplier_create(
    State(state): State<ServerState>,
    payload: Result<Json<SupplierBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let body = accept_json(payload)?;
    let m = supplier_service::create(&state.db, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "supplier created", "supplier": shape::supplier_body(&state.db, &m).await? })),
    ))
}

pub async fn supplier_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SupplierEditBody>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let body = accept_json(payload)?;
    let m = supplier_service::update(&state.db, id, body.into()).await?;
    Ok(Json(json!({ "message": "supplier updated", "supplier": shape::supplier_body(&state.db, &m).await? })))
}

pub async fn supplier_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    if !supplier_service::delete(&state.db, id).await? {
        return Err(JsonApiError::not_found("supplier not found"));
    }
    Ok(Json(json!({ "status": "deleted", "id": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_edit_body_tracks_field_presence() {
        let b: SupplierEditBody = serde_json::from_str(r#"{"phone": null, "region": null}"#).unwrap();
        assert_eq!(b.phone, Some(None));
        assert_eq!(b.region_id, Some(None));
        assert_eq!(b.ruc, None);
    }
}
