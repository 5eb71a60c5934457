//! Health check endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::application::PostService;

#[derive(Clone)]
pub struct HealthState {
    pub service: Arc<PostService>,
    pub started_at: Instant,
}

impl HealthState {
    pub fn new(service: Arc<PostService>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }
}

/// Service health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: StorageHealth,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let ping_start = Instant::now();
    let (http_status, status, storage) = match state.service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            "ok",
            StorageHealth {
                status: "ok".to_string(),
                latency_ms: Some(ping_start.elapsed().as_millis() as u64),
            },
        ),
        Err(e) => {
            warn!(error = %e, "Health check: store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "degraded",
                StorageHealth {
                    status: "error".to_string(),
                    latency_ms: None,
                },
            )
        }
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            storage,
        }),
    )
}
