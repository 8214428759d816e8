use serde::Serialize;

/// Static payload for the `/health/` endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
}
