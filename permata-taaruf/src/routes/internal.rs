use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use permata_shared::errors::AppResult;
use permata_shared::types::ApiResponse;

use crate::models::Participant;
use crate::services::profile_service;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateParticipantRequest {
    /// Identity id issued at sign-up.
    pub id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub nama: String,
}

/// POST /internal/participants - sign-up hook creating the invisible stub (service-to-service, no auth)
pub async fn create_participant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateParticipantRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Participant>>)> {
    req.validate()?;

    let mut conn = state.conn()?;
    let (participant, created) = profile_service::create_stub(&mut conn, req.id, req.nama.trim())?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::ok(participant))))
}
