//! Liveness probe.

use serde::Serialize;

use crate::http::response::{ApiResponse, RequestTimer};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// GET /api/health - No auth, no I/O.
pub async fn health() -> ApiResponse<HealthStatus> {
    RequestTimer::start().success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
