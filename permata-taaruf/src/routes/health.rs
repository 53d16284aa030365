use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::prelude::*;
use permata_shared::{HealthCheck, HealthResponse, HealthStatus};
use std::sync::Arc;

use crate::AppState;

/// Health check with a round trip to the database.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.db.get() {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn) {
            Ok(_) => HealthCheck::healthy("database"),
            Err(e) => HealthCheck::unhealthy("database", e.to_string()),
        },
        Err(e) => HealthCheck::unhealthy("database", e.to_string()),
    };

    let response = HealthResponse::healthy("permata-taaruf", env!("CARGO_PKG_VERSION"))
        .with_checks(vec![database]);

    let status = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response)).into_response()
}

/// Returns Prometheus metrics.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
