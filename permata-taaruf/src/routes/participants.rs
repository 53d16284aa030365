use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use permata_shared::errors::AppResult;
use permata_shared::types::auth::AuthUser;
use permata_shared::types::ApiResponse;

use crate::models::{AssignedMediators, Participant};
use crate::services::{interest_service, profile_service};
use crate::taaruf::{check_interest, Sex, Viewer};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `Laki-laki` or `Perempuan`; anything else is rejected by deserialization.
    pub gender: Option<Sex>,
}

#[derive(Debug, Serialize)]
pub struct ParticipantCard {
    #[serde(flatten)]
    pub participant: Participant,
    pub umur: Option<u32>,
}

/// GET /participants?gender= - published biodata, newest first
pub async fn list_participants(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<ParticipantCard>>>> {
    let mut conn = state.conn()?;

    let cards = profile_service::list_visible(&mut conn, query.gender)?
        .into_iter()
        .map(|participant| ParticipantCard {
            umur: participant.age(),
            participant,
        })
        .collect();

    Ok(Json(ApiResponse::ok(cards)))
}

#[derive(Debug, Serialize)]
pub struct ParticipantDetail {
    #[serde(flatten)]
    pub participant: Participant,
    pub umur: Option<u32>,
    pub mediators: AssignedMediators,
    pub can_express_interest: bool,
    pub interest_sent: bool,
}

/// GET /participants/:id - full biodata with mediators and the viewer's interest state
pub async fn get_participant(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ParticipantDetail>>> {
    let mut conn = state.conn()?;

    let participant = profile_service::get(&mut conn, id)?;
    // Unpublished biodata is only visible to its owner and admins.
    if !participant.is_visible && participant.id != user.id && !user.is_admin() {
        return Err(profile_service::participant_not_found(id));
    }

    let viewer_sex = if user.is_admin() {
        None
    } else {
        profile_service::find(&mut conn, user.id)?.and_then(|p| p.sex())
    };
    let viewer = Viewer { id: user.id, is_admin: user.is_admin(), sex: viewer_sex };
    let can_express_interest = check_interest(&viewer, participant.id, participant.sex()).is_ok();
    let interest_sent = can_express_interest && interest_service::is_active(&mut conn, user.id, id)?;

    let mediators = profile_service::assigned_mediators(&mut conn, &participant)?;

    Ok(Json(ApiResponse::ok(ParticipantDetail {
        umur: participant.age(),
        participant,
        mediators,
        can_express_interest,
        interest_sent,
    })))
}
