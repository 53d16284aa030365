use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use permata_shared::errors::AppResult;
use permata_shared::middleware::AdminUser;
use permata_shared::types::ApiResponse;

use crate::services::dashboard_service::{self, DashboardStats};
use crate::AppState;

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let mut conn = state.conn()?;
    let stats = dashboard_service::stats(&mut conn)?;
    Ok(Json(ApiResponse::ok(stats)))
}
