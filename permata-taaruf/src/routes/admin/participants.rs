use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use permata_shared::errors::AppResult;
use permata_shared::middleware::AdminUser;
use permata_shared::types::ApiResponse;

use crate::models::{Participant, ParticipantSummary};
use crate::services::dashboard_service::{self, AdminParticipantRow, ParticipantManagement};
use crate::services::{mediator_service, pairing_service, profile_service};
use crate::taaruf::MediatorTier;
use crate::AppState;

// --- Request / Response types ---

#[derive(Debug, Deserialize)]
pub struct AssignMediatorRequest {
    pub tier: MediatorTier,
    /// `null` clears the slot.
    pub mediator_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: Uuid,
    pub deleted: bool,
}

// --- Listing ---

pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Vec<AdminParticipantRow>>>> {
    let mut conn = state.conn()?;
    let rows = dashboard_service::list_participants(&mut conn)?;
    Ok(Json(ApiResponse::ok(rows)))
}

pub async fn get_participant(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ParticipantManagement>>> {
    let mut conn = state.conn()?;
    let view = dashboard_service::participant_management(&mut conn, id)?;
    Ok(Json(ApiResponse::ok(view)))
}

pub async fn list_candidates(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<ParticipantSummary>>>> {
    let mut conn = state.conn()?;
    let subject = profile_service::get(&mut conn, id)?;
    let candidates = pairing_service::candidates(&mut conn, &subject)?
        .iter()
        .map(ParticipantSummary::from)
        .collect();
    Ok(Json(ApiResponse::ok(candidates)))
}

// --- Mutations ---

pub async fn assign_mediator(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignMediatorRequest>,
) -> AppResult<Json<ApiResponse<Participant>>> {
    let mut conn = state.conn()?;
    let participant = mediator_service::assign(&mut conn, id, req.tier, req.mediator_id)?;

    tracing::info!(admin_id = %admin.id, participant_id = %id, tier = %req.tier, "admin assigned mediator");
    Ok(Json(ApiResponse::ok(participant)))
}

pub async fn delete_participant(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DeletedResponse>>> {
    let mut conn = state.conn()?;
    dashboard_service::delete_participant(&mut conn, id)?;

    tracing::info!(admin_id = %admin.id, participant_id = %id, "admin deleted participant");
    Ok(Json(ApiResponse::ok(DeletedResponse { id, deleted: true })))
}
