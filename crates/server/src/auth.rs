use std::{collections::HashMap, path::PathBuf, sync::Arc};

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};

use service::photo::PhotoStore;

use crate::errors::JsonApiError;

/// Shared state for every handler.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub photos: PhotoStore,
    pub api_keys: Arc<ApiKeysStore>,
}

/// File-backed API key store, one key per named consumer. Persisted as a
/// JSON object in `data/api_keys.json` so keys survive restarts.
pub struct ApiKeysStore {
    inner: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiKeyRecord {
    pub consumer: String,
    pub api_key: String,
}

impl ApiKeysStore {
    pub async fn new<P: Into<PathBuf>>(path: P) -> anyhow::Result<Arc<Self>> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        let map: HashMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => {
                let empty: HashMap<String, String> = HashMap::new();
                let _ = fs::write(&file_path, serde_json::to_vec(&empty)?).await;
                empty
            }
        };
        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    pub async fn is_valid(&self, key: &str) -> bool {
        self.inner.read().await.values().any(|v| v == key)
    }

    pub async fn set(&self, consumer: String, key: String) -> anyhow::Result<()> {
        self.inner.write().await.insert(consumer, key);
        self.persist().await
    }

    /// Returns false when the consumer was not present.
    pub async fn remove(&self, consumer: &str) -> anyhow::Result<bool> {
        let existed = self.inner.write().await.remove(consumer).is_some();
        if existed {
            self.persist().await?;
        }
        Ok(existed)
    }

    pub async fn list(&self) -> Vec<ApiKeyRecord> {
        self.inner
            .read()
            .await
            .iter()
            .map(|(consumer, key)| ApiKeyRecord { consumer: consumer.clone(), api_key: key.clone() })
            .collect()
    }

    async fn persist(&self) -> anyhow::Result<()> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec_pretty(&*map)?;
        fs::write(&self.file_path, data).await?;
        Ok(())
    }
}

/// Middleware: require a known `x-api-key` header.
pub async fn require_api_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let key = req
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if key.trim().is_empty() || !state.api_keys.is_valid(key).await {
        return Err(JsonApiError::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid api key",
        ));
    }
    Ok(next.run(req).await)
}

pub async fn list_api_keys(State(state): State<ServerState>) -> Json<Vec<ApiKeyRecord>> {
    Json(state.api_keys.list().await)
}

pub async fn set_api_key(
    State(state): State<ServerState>,
    Json(payload): Json<ApiKeyRecord>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    if payload.consumer.trim().is_empty() || payload.api_key.trim().is_empty() {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "validation failed",
            "consumer and api_key are required",
        ));
    }
    state
        .api_keys
        .set(payload.consumer, payload.api_key)
        .await
        .map_err(|e| JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error", e.to_string()))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn delete_api_key(
    State(state): State<ServerState>,
    Path(consumer): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let existed = state
        .api_keys
        .remove(&consumer)
        .await
        .map_err(|e| JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error", e.to_string()))?;
    if existed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("api key consumer"))
    }
}
