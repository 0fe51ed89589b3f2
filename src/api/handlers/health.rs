//! Handler for health check endpoint.

use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{HealthChecks, HealthResponse, Probe, ProbeStatus, ServiceStatus};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: database reachable
/// - **503 Service Unavailable**: database unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checkedAt": "2025-01-01T00:00:00Z",
///   "checks": {
///     "database": { "status": "ok", "latencyMs": 1 }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = probe_database(&state).await;
    let healthy = database.status == ProbeStatus::Ok;

    let response = HealthResponse {
        status: if healthy {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        checked_at: Utc::now(),
        checks: HealthChecks { database },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn probe_database(state: &AppState) -> Probe {
    let started = Instant::now();
    let result = sqlx::query("SELECT 1").execute(state.pool.as_ref()).await;
    let latency_ms = started.elapsed().as_millis();

    match result {
        Ok(_) => Probe {
            status: ProbeStatus::Ok,
            latency_ms,
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed to reach database");
            Probe {
                status: ProbeStatus::Error,
                latency_ms,
                message: Some(e.to_string()),
            }
        }
    }
}
