//! Document type, payment type and payment status endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use models::{document_type, payment_status, payment_type};
use service::{document_type_service, payment_status_service, payment_type_service};

use crate::auth::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct CatalogCreate {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogEdit {
    pub name: Option<String>,
    pub description: Option<String>,
}

fn accept_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    payload.map(|Json(v)| v).map_err(|e| JsonApiError::bad_json(e.body_text()))
}

fn document_type_body(m: &document_type::Model) -> Value {
    json!({
        "id": m.id,
        "name": m.name,
        "description": m.description,
        "created_at": m.created_at.to_rfc3339(),
        "updated_at": m.updated_at.to_rfc3339(),
    })
}

fn payment_type_body(m: &payment_type::Model) -> Value {
    json!({
        "id": m.id,
        "name": m.name,
        "description": m.description,
        "created_at": m.created_at.to_rfc3339(),
        "updated_at": m.updated_at.to_rfc3339(),
    })
}

fn payment_status_body(m: &payment_status::Model) -> Value {
    json!({
        "id": m.id,
        "name": m.name,
        "description": m.description,
        "created_at": m.created_at.to_rfc3339(),
        "updated_at": m.updated_at.to_rfc3339(),
    })
}

// --- document types ---

pub async fn document_type_list(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = document_type_service::list_active(&state.db).await?;
    let data: Vec<Value> = rows.iter().map(document_type_body).collect();
    Ok(Json(json!({ "document_types": data })))
}

pub async fn document_type_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = document_type_service::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("document type not found"))?;
    Ok(Json(document_type_body(&m)))
}

pub async fn document_type_create(
    State(state): State<ServerState>,
    payload: Result<Json<CatalogCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let body = accept_json(payload)?;
    let m = document_type_service::create(&state.db, &body.name, body.description.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "document type created", "document_type": document_type_body(&m) })),
    ))
}

pub async fn document_type_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CatalogEdit>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let body = accept_json(payload)?;
    let m = document_type_service::update(&state.db, id, body.name.as_deref(), body.description.as_deref()).await?;
    Ok(Json(json!({ "message": "document type updated", "document_type": document_type_body(&m) })))
}

pub async fn document_type_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    document_type_service::soft_delete(&state.db, id).await?;
    Ok(Json(json!({ "status": "deleted", "id": id })))
}

// --- payment types ---

pub async fn payment_type_list(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = payment_type_service::list_active(&state.db).await?;
    let data: Vec<Value> = rows.iter().map(payment_type_body).collect();
    Ok(Json(json!({ "payment_types": data })))
}

pub async fn payment_type_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = payment_type_service::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("payment type not found"))?;
    Ok(Json(payment_type_body(&m)))
}

pub async fn payment_type_create(
    State(state): State<ServerState>,
    payload: Result<Json<CatalogCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let body = accept_json(payload)?;
    let m = payment_type_service::create(&state.db, &body.name, body.description.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "payment type created", "payment_type": payment_type_body(&m) })),
    ))
}

pub async fn payment_type_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CatalogEdit>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let body = accept_json(payload)?;
    let m = payment_type_service::update(&state.db, id, body.name.as_deref(), body.description.as_deref()).await?;
    Ok(Json(json!({ "message": "payment type updated", "payment_type": payment_type_body(&m) })))
}

pub async fn payment_type_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    payment_type_service::soft_delete(&state.db, id).await?;
    Ok(Json(json!({ "status": "deleted", "id": id })))
}

// --- payment statuses ---

pub async fn payment_status_list(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = payment_status_service::list_active(&state.db).await?;
    let data: Vec<Value> = rows.iter().map(payment_status_body).collect();
    Ok(Json(json!({ "payment_status": data })))
}

pub async fn payment_status_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    let m = payment_status_service::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("payment status not found"))?;
    Ok(Json(payment_status_body(&m)))
}

pub async fn payment_status_create(
    State(state): State<ServerState>,
    payload: Result<Json<CatalogCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let body = accept_json(payload)?;
    let m = payment_status_service::create(&state.db, &body.name, body.description.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "payment status created", "payment_status": payment_status_body(&m) })),
    ))
}

pub async fn payment_status_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CatalogEdit>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let body = accept_json(payload)?;
    let m = payment_status_service::update(&state.db, id, body.name.as_deref(), body.description.as_deref()).await?;
    Ok(Json(json!({ "message": "payment status updated", "payment_status": payment_status_body(&m) })))
}

pub async fn payment_status_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    payment_status_service::soft_delete(&state.db, id).await?;
    Ok(Json(json!({ "status": "deleted", "id": id })))
}
