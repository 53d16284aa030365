use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidationError};

use permata_shared::errors::{AppError, AppResult, ErrorCode};
use permata_shared::types::auth::AuthUser;
use permata_shared::types::ApiResponse;

use crate::models::{AssignedMediators, BiodataChangeset, Participant};
use crate::services::{pairing_service, profile_service};
use crate::taaruf::{MaritalStatus, Sex, TaarufStatus};
use crate::AppState;

/// Complete biodata form. Every write replaces the whole record.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_biodata"))]
pub struct BiodataRequest {
    #[validate(length(min = 1, max = 100))]
    pub nama: String,
    #[validate(length(max = 100))]
    pub bin_binti: Option<String>,
    pub jenis_kelamin: Sex,
    pub status: MaritalStatus,
    #[validate(length(max = 100))]
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: NaiveDate,
    #[validate(range(min = 1, max = 30))]
    pub anak_ke: Option<i32>,
    #[validate(range(min = 0, max = 30))]
    pub jumlah_saudara: Option<i32>,
    #[validate(length(max = 50))]
    pub suku: Option<String>,
    #[validate(range(min = 100, max = 250))]
    pub tinggi_badan: Option<i32>,
    #[validate(range(min = 30, max = 250))]
    pub berat_badan: Option<i32>,
    #[validate(length(max = 100))]
    pub pendidikan_terakhir: Option<String>,
    #[validate(length(max = 100))]
    pub pekerjaan: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub nomor_telepon: Option<String>,
    #[validate(length(max = 255))]
    pub hobby: Option<String>,
    #[validate(length(max = 100))]
    pub dapukan: Option<String>,
    #[validate(length(max = 100))]
    pub kelompok: Option<String>,
    #[validate(length(max = 100))]
    pub desa: Option<String>,
    #[validate(length(max = 100))]
    pub daerah: Option<String>,
    #[validate(length(max = 500))]
    pub alamat_lengkap: Option<String>,
    #[validate(length(max = 2000))]
    pub kriteria_calon_pasangan: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

fn validate_biodata(req: &BiodataRequest) -> Result<(), ValidationError> {
    if req.tanggal_lahir > Utc::now().date_naive() {
        return Err(ValidationError::new("tanggal_lahir_in_future"));
    }
    if !req.status.fits(req.jenis_kelamin) {
        return Err(ValidationError::new("status_does_not_match_jenis_kelamin"));
    }
    Ok(())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl From<BiodataRequest> for BiodataChangeset {
    fn from(req: BiodataRequest) -> Self {
        Self {
            nama: req.nama.trim().to_string(),
            bin_binti: blank_to_none(req.bin_binti),
            jenis_kelamin: Some(req.jenis_kelamin.label().to_string()),
            status: Some(req.status.label().to_string()),
            tempat_lahir: blank_to_none(req.tempat_lahir),
            tanggal_lahir: Some(req.tanggal_lahir),
            anak_ke: req.anak_ke,
            jumlah_saudara: req.jumlah_saudara,
            suku: blank_to_none(req.suku),
            tinggi_badan: req.tinggi_badan,
            berat_badan: req.berat_badan,
            pendidikan_terakhir: blank_to_none(req.pendidikan_terakhir),
            pekerjaan: blank_to_none(req.pekerjaan),
            nomor_telepon: blank_to_none(req.nomor_telepon),
            hobby: blank_to_none(req.hobby),
            dapukan: blank_to_none(req.dapukan),
            kelompok: blank_to_none(req.kelompok),
            desa: blank_to_none(req.desa),
            daerah: blank_to_none(req.daerah),
            alamat_lengkap: blank_to_none(req.alamat_lengkap),
            kriteria_calon_pasangan: blank_to_none(req.kriteria_calon_pasangan),
            avatar_url: blank_to_none(req.avatar_url),
            is_visible: true,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OwnProfileResponse {
    #[serde(flatten)]
    pub participant: Participant,
    pub umur: Option<u32>,
    pub mediators: AssignedMediators,
    pub status_taaruf: Option<TaarufStatus>,
}

/// GET /me - the caller's own record, for the biodata form
pub async fn get_own_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<OwnProfileResponse>>> {
    let mut conn = state.conn()?;

    let participant = profile_service::get(&mut conn, user.id)?;
    let mediators = profile_service::assigned_mediators(&mut conn, &participant)?;
    let status_taaruf = pairing_service::find_for(&mut conn, user.id)?.map(|p| p.taaruf_status());

    Ok(Json(ApiResponse::ok(OwnProfileResponse {
        umur: participant.age(),
        participant,
        mediators,
        status_taaruf,
    })))
}

/// PUT /me - save the full biodata and publish the profile
pub async fn save_biodata(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<BiodataRequest>,
) -> AppResult<Json<ApiResponse<Participant>>> {
    if user.is_admin() {
        return Err(AppError::new(ErrorCode::Forbidden, "admins do not keep a biodata"));
    }
    req.validate()?;

    let mut conn = state.conn()?;
    let participant = profile_service::upsert_biodata(&mut conn, user.id, req.into())?;

    Ok(Json(ApiResponse::ok_with_message(participant, "biodata saved")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BiodataRequest {
        serde_json::from_value(serde_json::json!({
            "nama": "  Ahmad Fauzi ",
            "bin_binti": "bin Hasan",
            "jenis_kelamin": "Laki-laki",
            "status": "Lajang",
            "tanggal_lahir": "1996-04-12",
            "tinggi_badan": 172,
            "berat_badan": 68,
            "hobby": "   ",
            "nomor_telepon": "081234567890"
        }))
        .expect("biodata request")
    }

    #[test]
    fn complete_request_passes_validation() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn out_of_range_height_is_rejected() {
        let mut req = request();
        req.tinggi_badan = Some(20);
        assert!(req.validate().is_err());
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let mut req = request();
        req.tanggal_lahir = Utc::now().date_naive() + chrono::Duration::days(30);
        assert!(req.validate().is_err());
    }

    #[test]
    fn janda_requires_perempuan() {
        let mut req = request();
        req.status = MaritalStatus::Janda;
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_sex_label_fails_to_parse() {
        let raw = serde_json::json!({
            "nama": "X",
            "jenis_kelamin": "L",
            "status": "Lajang",
            "tanggal_lahir": "1990-01-01"
        });
        assert!(serde_json::from_value::<BiodataRequest>(raw).is_err());
    }

    #[test]
    fn changeset_trims_and_publishes() {
        let changeset = BiodataChangeset::from(request());
        assert_eq!(changeset.nama, "Ahmad Fauzi");
        assert_eq!(changeset.hobby, None);
        assert_eq!(changeset.jenis_kelamin.as_deref(), Some("Laki-laki"));
        assert!(changeset.is_visible);
    }
}
