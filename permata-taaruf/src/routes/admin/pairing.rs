use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use permata_shared::errors::AppResult;
use permata_shared::middleware::AdminUser;
use permata_shared::types::ApiResponse;

use crate::models::Pairing;
use crate::services::pairing_service;
use crate::taaruf::StatusChange;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectPartnerRequest {
    pub partner_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// `Mediasi`, `Melamar` or `Menikah`; empty or missing resets the pairing.
    #[serde(default)]
    pub status: Option<String>,
}

/// Pairing state after a mutation. `pairing` is `null` once reset.
#[derive(Debug, Serialize)]
pub struct PairingState {
    pub participant_id: Uuid,
    pub pairing: Option<Pairing>,
}

/// PUT /admin/participants/:id/pairing - create the pairing or swap the partner
pub async fn select_partner(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectPartnerRequest>,
) -> AppResult<Json<ApiResponse<PairingState>>> {
    let mut conn = state.conn()?;
    let pairing = pairing_service::select_partner(&mut conn, id, req.partner_id)?;

    tracing::info!(admin_id = %admin.id, participant_id = %id, partner_id = %req.partner_id, "admin selected partner");
    Ok(Json(ApiResponse::ok(PairingState { participant_id: id, pairing: Some(pairing) })))
}

/// PUT /admin/participants/:id/pairing/status - advance the status, or reset on empty
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> AppResult<Json<ApiResponse<PairingState>>> {
    let change = StatusChange::parse(req.status.as_deref())?;

    let mut conn = state.conn()?;
    let pairing = pairing_service::change_status(&mut conn, state.config.status_policy, id, change)?;

    tracing::info!(admin_id = %admin.id, participant_id = %id, change = ?change, "admin changed pairing status");
    Ok(Json(ApiResponse::ok(PairingState { participant_id: id, pairing })))
}

/// DELETE /admin/participants/:id/pairing
pub async fn reset_pairing(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PairingState>>> {
    let mut conn = state.conn()?;
    let removed = pairing_service::reset(&mut conn, id)?;

    tracing::info!(admin_id = %admin.id, participant_id = %id, removed, "admin reset pairing");
    Ok(Json(ApiResponse::ok(PairingState { participant_id: id, pairing: None })))
}
