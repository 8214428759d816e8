use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Deserializer};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth::{self, ServerState};

pub mod shape;

pub mod employees;
pub mod products;
pub mod types;

/// For `#[serde(default, deserialize_with = ...)]` fields: a plain
/// `Option<Option<T>>` collapses an explicit `null` into `None`, losing
/// the distinction from an absent field. Running the inner `Option`
/// deserializer ourselves keeps `null` as `Some(None)` while `default`
/// covers the absent case.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "healthy", service: "business-backend" })
}

// multipart photo uploads may carry up to 5 MiB plus framing
const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Build the full application router: health, entity routes per area,
/// admin key management, and the media directory.
pub fn build_router(state: ServerState, cors: CorsLayer, media_root: &str) -> Router {
    let types = Router::new()
        .route("/document_type/", get(types::document_type_list))
        .route("/document_type/create/", post(types::document_type_create))
        .route("/document_type/:id/", get(types::document_type_detail))
        .route("/document_type/:id/edit/", put(types::document_type_edit).patch(types::document_type_edit))
        .route("/document_type/:id/delete/", delete(types::document_type_delete))
        .route("/payment_type/", get(types::payment_type_list))
        .route("/payment_type/create/", post(types::payment_type_create))
        .route("/payment_type/:id/", get(types::payment_type_detail))
        .route("/payment_type/:id/edit/", put(types::payment_type_edit).patch(types::payment_type_edit))
        .route("/payment_type/:id/delete/", delete(types::payment_type_delete))
        .route("/payment_status/", get(types::payment_status_list))
        .route("/payment_status/create/", post(types::payment_status_create))
        .route("/payment_status/:id/", get(types::payment_status_detail))
        .route("/payment_status/:id/edit/", put(types::payment_status_edit).patch(types::payment_status_edit))
        .route("/payment_status/:id/delete/", delete(types::payment_status_delete));

    // category requires a known api key; brand and supplier stay open
    let categories = Router::new()
        .route("/category/", get(products::category_list))
        .route("/category/create/", post(products::category_create))
        .route("/category/:id/", get(products::category_detail))
        .route("/category/:id/edit/", put(products::category_edit).patch(products::category_edit))
        .route("/category/:id/delete/", delete(products::category_delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key));

    let products = Router::new()
        .route("/brand/", get(products::brand_list))
        .route("/brand/create/", post(products::brand_create))
        .route("/brand/:id/", get(products::brand_detail))
        .route("/brand/:id/edit/", put(products::brand_edit).patch(products::brand_edit))
        .route("/brand/:id/delete/", delete(products::brand_delete))
        .route("/supplier/", get(products::supplier_list))
        .route("/supplier/create/", post(products::supplier_create))
        .route("/supplier/:id/", get(products::supplier_detail))
        .route("/supplier/:id/edit/", put(products::supplier_edit).patch(products::supplier_edit))
        .route("/supplier/:id/delete/", delete(products::supplier_delete))
        .merge(categories);

    let employees = Router::new()
        .route("/employee/", get(employees::employee_list))
        .route("/employee/create/", post(employees::employee_create))
        .route("/employee/:id/", get(employees::employee_detail))
        .route("/employee/:id/edit/", put(employees::employee_edit).patch(employees::employee_edit))
        .route("/employee/:id/delete/", delete(employees::employee_delete))
        .route("/employee/:id/photo/", post(employees::employee_photo_upload))
        .route("/employee/:id/photo/edit/", put(employees::employee_photo_update))
        .route("/employee/:id/photo/delete/", delete(employees::employee_photo_delete))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    let admin = Router::new()
        .route("/api-keys", get(auth::list_api_keys).post(auth::set_api_key))
        .route("/api-keys/:consumer", delete(auth::delete_api_key));

    Router::new()
        .route("/health/", get(health))
        .nest("/api/types", types)
        .nest("/api/products", products)
        .nest("/api/employees", employees)
        .nest("/admin", admin)
        .nest_service("/media", ServeDir::new(media_root))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
