use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use permata_shared::errors::AppResult;
use permata_shared::middleware::AdminUser;
use permata_shared::types::ApiResponse;

use crate::models::{Mediator, NewMediator, UpdateMediator};
use crate::services::mediator_service;
use crate::taaruf::MediatorTier;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MediatorFilter {
    pub tier: Option<MediatorTier>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMediatorRequest {
    #[validate(length(min = 1, max = 100))]
    pub nama: String,
    pub dapukan: MediatorTier,
    #[validate(length(min = 6, max = 20))]
    pub nomor_telepon: Option<String>,
    #[validate(length(max = 500))]
    pub alamat_lengkap: Option<String>,
}

/// Absent fields are left alone; an explicit `null` clears a contact field.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMediatorRequest {
    #[validate(length(min = 1, max = 100))]
    pub nama: Option<String>,
    pub dapukan: Option<MediatorTier>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 6, max = 20))]
    pub nomor_telepon: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 500))]
    pub alamat_lengkap: Option<Option<String>>,
}

/// Distinguishes a field sent as `null` (`Some(None)`) from one left out (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateMediatorRequest> for UpdateMediator {
    fn from(req: UpdateMediatorRequest) -> Self {
        Self {
            nama: req.nama.map(|n| n.trim().to_string()),
            dapukan: req.dapukan.map(|t| t.label().to_string()),
            nomor_telepon: req.nomor_telepon,
            alamat_lengkap: req.alamat_lengkap,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MediatorDeleted {
    pub id: Uuid,
    pub deleted: bool,
}

pub async fn list_mediators(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(filter): Query<MediatorFilter>,
) -> AppResult<Json<ApiResponse<Vec<Mediator>>>> {
    let mut conn = state.conn()?;
    let mediators = mediator_service::list(&mut conn, filter.tier)?;
    Ok(Json(ApiResponse::ok(mediators)))
}

pub async fn create_mediator(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateMediatorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Mediator>>)> {
    req.validate()?;

    let mut conn = state.conn()?;
    let mediator = mediator_service::create(
        &mut conn,
        NewMediator {
            nama: req.nama.trim().to_string(),
            dapukan: req.dapukan.label().to_string(),
            nomor_telepon: req.nomor_telepon,
            alamat_lengkap: req.alamat_lengkap,
        },
    )?;

    tracing::info!(admin_id = %admin.id, mediator_id = %mediator.id, "admin created mediator");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(mediator))))
}

pub async fn update_mediator(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMediatorRequest>,
) -> AppResult<Json<ApiResponse<Mediator>>> {
    req.validate()?;

    let mut conn = state.conn()?;
    let mediator = mediator_service::update(&mut conn, id, req.into())?;

    tracing::info!(admin_id = %admin.id, mediator_id = %id, "admin updated mediator");
    Ok(Json(ApiResponse::ok(mediator)))
}

pub async fn delete_mediator(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MediatorDeleted>>> {
    let mut conn = state.conn()?;
    mediator_service::delete(&mut conn, id)?;

    tracing::info!(admin_id = %admin.id, mediator_id = %id, "admin deleted mediator");
    Ok(Json(ApiResponse::ok(MediatorDeleted { id, deleted: true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(raw: serde_json::Value) -> UpdateMediator {
        serde_json::from_value::<UpdateMediatorRequest>(raw).expect("update request").into()
    }

    #[test]
    fn omitted_contact_fields_are_untouched() {
        let changes = update(serde_json::json!({ "nama": " Ustadz Hanif " }));
        assert_eq!(changes.nama.as_deref(), Some("Ustadz Hanif"));
        assert_eq!(changes.nomor_telepon, None);
        assert_eq!(changes.alamat_lengkap, None);
    }

    #[test]
    fn explicit_null_clears_contact_fields() {
        let changes = update(serde_json::json!({ "nomor_telepon": null, "alamat_lengkap": "Jl. Melati 3" }));
        assert_eq!(changes.nomor_telepon, Some(None));
        assert_eq!(changes.alamat_lengkap, Some(Some("Jl. Melati 3".to_string())));
    }

    #[test]
    fn short_phone_number_is_rejected() {
        let req: UpdateMediatorRequest =
            serde_json::from_value(serde_json::json!({ "nomor_telepon": "123" })).expect("update request");
        assert!(req.validate().is_err());
    }
}
