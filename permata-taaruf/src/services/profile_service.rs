use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use permata_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{AssignedMediators, BiodataChangeset, Mediator, NewParticipantStub, Participant};
use crate::schema::{peserta, tim_perkawinan};
use crate::taaruf::{MediatorTier, Sex};

pub fn participant_not_found(id: Uuid) -> AppError {
    AppError::with_details(
        ErrorCode::ParticipantNotFound,
        "participant not found",
        serde_json::json!({ "id": id }),
    )
}

pub fn find(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Participant>> {
    Ok(peserta::table
        .find(id)
        .select(Participant::as_select())
        .first(conn)
        .optional()?)
}

pub fn get(conn: &mut PgConnection, id: Uuid) -> AppResult<Participant> {
    find(conn, id)?.ok_or_else(|| participant_not_found(id))
}

/// Creates the invisible record a new identity starts with.
/// Returns the stored participant and whether it was newly created.
pub fn create_stub(conn: &mut PgConnection, id: Uuid, nama: &str) -> AppResult<(Participant, bool)> {
    let inserted = diesel::insert_into(peserta::table)
        .values(&NewParticipantStub {
            id,
            nama: nama.to_string(),
            is_visible: false,
        })
        .on_conflict(peserta::id)
        .do_nothing()
        .execute(conn)?;

    let participant = get(conn, id)?;
    if inserted > 0 {
        tracing::info!(participant_id = %id, "participant stub created");
    }
    Ok((participant, inserted > 0))
}

/// Writes the whole biodata for `id` and publishes the profile.
pub fn upsert_biodata(conn: &mut PgConnection, id: Uuid, biodata: BiodataChangeset) -> AppResult<Participant> {
    let participant = conn.transaction::<_, AppError, _>(|conn| {
        diesel::insert_into(peserta::table)
            .values(&NewParticipantStub {
                id,
                nama: biodata.nama.clone(),
                is_visible: false,
            })
            .on_conflict(peserta::id)
            .do_nothing()
            .execute(conn)?;

        Ok(diesel::update(peserta::table.find(id))
            .set(&BiodataChangeset {
                is_visible: true,
                updated_at: Utc::now(),
                ..biodata
            })
            .returning(Participant::as_returning())
            .get_result(conn)?)
    })?;

    tracing::info!(participant_id = %id, "biodata saved");
    Ok(participant)
}

/// Published participants, newest first.
pub fn list_visible(conn: &mut PgConnection, sex: Option<Sex>) -> AppResult<Vec<Participant>> {
    let mut query = peserta::table
        .filter(peserta::is_visible.eq(true))
        .select(Participant::as_select())
        .order(peserta::created_at.desc())
        .into_boxed();

    if let Some(sex) = sex {
        query = query.filter(peserta::jenis_kelamin.eq(sex.label()));
    }

    Ok(query.load(conn)?)
}

pub fn assigned_mediators(conn: &mut PgConnection, participant: &Participant) -> AppResult<AssignedMediators> {
    let ids: Vec<Uuid> = MediatorTier::ALL
        .into_iter()
        .filter_map(|tier| participant.mediator_id(tier))
        .collect();

    if ids.is_empty() {
        return Ok(AssignedMediators::default());
    }

    let mediators: Vec<Mediator> = tim_perkawinan::table
        .filter(tim_perkawinan::id.eq_any(ids))
        .select(Mediator::as_select())
        .load(conn)?;

    let pick = |tier: MediatorTier| {
        participant
            .mediator_id(tier)
            .and_then(|id| mediators.iter().find(|m| m.id == id).cloned())
    };

    Ok(AssignedMediators {
        kelompok: pick(MediatorTier::Kelompok),
        desa: pick(MediatorTier::Desa),
        daerah: pick(MediatorTier::Daerah),
    })
}
