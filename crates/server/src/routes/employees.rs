//! Employee endpoints, including search and the photo upload lifecycle.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use service::employee_service::{self, EmployeeInput, EmployeeUpdate};
use service::photo::PhotoStore;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::routes::shape;

fn accept_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    payload.map(|Json(v)| v).map_err(|e| JsonApiError::bad_json(e.body_text()))
}

/// Related ids arrive under the bare relation name.
#[derive(Debug, Deserialize)]
pub struct EmployeeCreateBody {
    pub name: Option<String>,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    #[serde(rename = "document_type")]
    pub document_type_id: Option<Uuid>,
    pub document_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "region")]
    pub region_id: Option<Uuid>,
    #[serde(rename = "province")]
    pub province_id: Option<Uuid>,
    #[serde(rename = "district")]
    pub district_id: Option<Uuid>,
    #[serde(rename = "role")]
    pub role_id: Option<Uuid>,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
}

/// Edit bodies distinguish a field sent as `null` (clear the column) from
/// one left out of the JSON (keep the stored value); see
/// [`crate::routes::double_option`]. Email is not nullable, so a `null`
/// there is treated the same as absent.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeEditBody {
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub last_name_paternal: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub last_name_maternal: Option<Option<String>>,
    #[serde(default, rename = "document_type", deserialize_with = "crate::routes::double_option")]
    pub document_type_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub document_number: Option<Option<String>>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(default, rename = "region", deserialize_with = "crate::routes::double_option")]
    pub region_id: Option<Option<Uuid>>,
    #[serde(default, rename = "province", deserialize_with = "crate::routes::double_option")]
    pub province_id: Option<Option<Uuid>>,
    #[serde(default, rename = "district", deserialize_with = "crate::routes::double_option")]
    pub district_id: Option<Option<Uuid>>,
    #[serde(default, rename = "role", deserialize_with = "crate::routes::double_option")]
    pub role_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub salary: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub address: Option<Option<String>>,
}

impl From<EmployeeCreateBody> for EmployeeInput {
    fn from(b: EmployeeCreateBody) -> Self {
        EmployeeInput {
            name: b.name,
            last_name_paternal: b.last_name_paternal,
            last_name_maternal: b.last_name_maternal,
            document_type_id: b.document_type_id,
            document_number: b.document_number,
            email: b.email,
            gender: b.gender,
            phone: b.phone,
            birth_date: b.birth_date,
            region_id: b.region_id,
            province_id: b.province_id,
            district_id: b.district_id,
            role_id: b.role_id,
            salary: b.salary,
            address: b.address,
        }
    }
}

impl From<EmployeeEditBody> for EmployeeUpdate {
    fn from(b: EmployeeEditBody) -> Self {
        EmployeeUpdate {
            name: b.name,
            last_name_paternal: b.last_name_paternal,
            last_name_maternal: b.last_name_maternal,
            document_type_id: b.document_type_id,
            document_number: b.document_number,
            email: b.email,
            gender: b.gender,
            phone: b.phone,
            birth_date: b.birth_date,
            region_id: b.region_id,
            province_id: b.province_id,
            district_id: b.district_id,
            role_id: b.role_id,
            salary: b.salary,
            address: b.address,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

pub async fn employee_list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, JsonApiError> {
    let rows = employee_service::list_active(&state.db, params.search.as_deref()).await?;
    let mut data = Vec::with_capacity(rows.len());
    for m in &rows {
        data.push(shape::employee_body(&state.db, m).await?);
    }
    Ok(Json(json!({ "employees": data })))
}

pub async fn employee_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = employee_service::get_active(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("employee not found"))?;
    Ok(Json(shape::employee_body(&state.db, &m).await?))
}

pub async fn employee_create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeCreateBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let body = accept_json(payload)?;
    let m = employee_service::create(&state.db, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "employee created", "employee": shape::employee_body(&state.db, &m).await? })),
    ))
}

pub async fn employee_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<EmployeeEditBody>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let body = accept_json(payload)?;
    let m = employee_service::update(&state.db, id, body.into()).await?;
    Ok(Json(json!({ "message": "employee updated", "employee": shape::employee_body(&state.db, &m).await? })))
}

pub async fn employee_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    employee_service::soft_delete(&state.db, id).await?;
    Ok(Json(json!({ "status": "deleted", "id": id })))
}

/// Bodies over the route limit surface as a 413 while streaming; report
/// those under the same field-error shape the size validation uses.
fn multipart_err(e: axum::extract::multipart::MultipartError) -> JsonApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        JsonApiError::field_errors("photo", "file exceeds the allowed size")
    } else {
        JsonApiError::new(StatusCode::BAD_REQUEST, "invalid multipart", e.body_text())
    }
}

/// Pull the `photo` part out of a multipart body.
async fn read_photo_part(mut multipart: Multipart) -> Result<(String, Vec<u8>), JsonApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        if field.name() == Some("photo") {
            let content_type = field.content_type().unwrap_or("").to_string();
            let bytes = field.bytes().await.map_err(multipart_err)?;
            return Ok((content_type, bytes.to_vec()));
        }
    }
    Err(JsonApiError::field_errors("photo", "missing multipart field"))
}

pub async fn employee_photo_upload(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Value>, JsonApiError> {
    let (content_type, bytes) = read_photo_part(multipart).await?;
    let m = employee_service::set_photo(&state.db, &state.photos, id, &content_type, &bytes).await?;
    Ok(Json(json!({
        "message": "photo uploaded",
        "employee_id": m.id,
        "photo_url": m.photo.as_deref().map(PhotoStore::url),
    })))
}

pub async fn employee_photo_update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Value>, JsonApiError> {
    let (content_type, bytes) = read_photo_part(multipart).await?;
    let m = employee_service::set_photo(&state.db, &state.photos, id, &content_type, &bytes).await?;
    Ok(Json(json!({
        "message": "photo updated",
        "employee_id": m.id,
        "photo_url": m.photo.as_deref().map(PhotoStore::url),
    })))
}

pub async fn employee_photo_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = employee_service::clear_photo(&state.db, &state.photos, id).await?;
    Ok(Json(json!({
        "message": "photo removed",
        "employee_id": m.id,
        "photo_url": Value::Null,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_body_tracks_field_presence() {
        let b: EmployeeEditBody = serde_json::from_str(r#"{"phone": null, "region": null}"#).unwrap();
        assert_eq!(b.phone, Some(None));
        assert_eq!(b.region_id, Some(None));
        assert_eq!(b.name, None);

        let b: EmployeeEditBody = serde_json::from_str(r#"{"phone": "999-111-222"}"#).unwrap();
        assert_eq!(b.phone, Some(Some("999-111-222".into())));

        let b: EmployeeEditBody = serde_json::from_str("{}").unwrap();
        assert_eq!(b.phone, None);
    }

    #[test]
    fn edit_body_null_email_is_ignored() {
        let b: EmployeeEditBody = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(b.email, None);
    }
}
