use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{ApiKeysStore, ServerState};
use crate::routes;
use service::photo::PhotoStore;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

fn media_root() -> String {
    configs::load_default()
        .map(|cfg| cfg.media.root)
        .unwrap_or_else(|_| "media".to_string())
}

/// Build the application router with live state. Shared with the e2e tests.
pub async fn build_app(media_root: &str) -> anyhow::Result<Router> {
    let api_keys = ApiKeysStore::new("data/api_keys.json").await?;
    let db = models::db::connect().await?;
    let state = ServerState {
        db,
        photos: PhotoStore::new(media_root),
        api_keys,
    };
    Ok(routes::build_router(state, build_cors(), media_root))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let media = media_root();
    let app = build_app(&media).await?;

    let addr = load_bind_addr()?;
    info!(%addr, media_root = %media, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
