use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use permata_shared::errors::{AppError, AppResult, ErrorCode};
use permata_shared::types::auth::AuthUser;
use permata_shared::types::ApiResponse;

use crate::services::{interest_service, profile_service};
use crate::taaruf::{check_interest, Ineligible, Viewer};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct InterestState {
    pub target_id: Uuid,
    pub active: bool,
}

/// GET /participants/:id/interest - whether the caller has a signal on the target
pub async fn check_interest_state(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<InterestState>>> {
    let mut conn = state.conn()?;
    let active = interest_service::is_active(&mut conn, user.id, target_id)?;
    Ok(Json(ApiResponse::ok(InterestState { target_id, active })))
}

/// POST /participants/:id/interest - flip the caller's signal on the target
pub async fn toggle_interest(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<InterestState>>> {
    if user.is_admin() {
        return Err(Ineligible::Admin.into());
    }

    let mut conn = state.conn()?;

    let sender = profile_service::find(&mut conn, user.id)?.ok_or_else(|| {
        AppError::new(ErrorCode::ParticipantNotFound, "complete your biodata before expressing interest")
    })?;
    let target = profile_service::get(&mut conn, target_id)?;

    let viewer = Viewer { id: sender.id, is_admin: false, sex: sender.sex() };
    check_interest(&viewer, target.id, target.sex())?;

    let active = interest_service::toggle(&mut conn, sender.id, target.id)?;

    let message = if active { "interest sent" } else { "interest withdrawn" };
    Ok(Json(ApiResponse::ok_with_message(InterestState { target_id, active }, message)))
}
