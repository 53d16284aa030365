use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use permata_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{Mediator, NewMediator, Participant, UpdateMediator};
use crate::schema::{peserta, tim_perkawinan};
use crate::services::profile_service;
use crate::taaruf::MediatorTier;

fn mediator_not_found(id: Uuid) -> AppError {
    AppError::with_details(
        ErrorCode::MediatorNotFound,
        "mediator not found",
        serde_json::json!({ "id": id }),
    )
}

pub fn get(conn: &mut PgConnection, id: Uuid) -> AppResult<Mediator> {
    tim_perkawinan::table
        .find(id)
        .select(Mediator::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| mediator_not_found(id))
}

/// Newest first, optionally restricted to one tier.
pub fn list(conn: &mut PgConnection, tier: Option<MediatorTier>) -> AppResult<Vec<Mediator>> {
    let mut query = tim_perkawinan::table
        .select(Mediator::as_select())
        .order(tim_perkawinan::created_at.desc())
        .into_boxed();

    if let Some(tier) = tier {
        query = query.filter(tim_perkawinan::dapukan.eq(tier.label()));
    }

    Ok(query.load(conn)?)
}

pub fn create(conn: &mut PgConnection, new_mediator: NewMediator) -> AppResult<Mediator> {
    let mediator = diesel::insert_into(tim_perkawinan::table)
        .values(&new_mediator)
        .returning(Mediator::as_returning())
        .get_result(conn)?;

    tracing::info!(mediator_id = %mediator.id, tier = %mediator.dapukan, "mediator created");
    Ok(mediator)
}

/// Apply a partial update. Moving a mediator to another tier detaches it from
/// participants that hold it in the old slot.
pub fn update(conn: &mut PgConnection, id: Uuid, changes: UpdateMediator) -> AppResult<Mediator> {
    let mediator = conn.transaction::<_, AppError, _>(|conn| {
        let current = get(conn, id)?;

        let no_changes = changes.nama.is_none()
            && changes.dapukan.is_none()
            && changes.nomor_telepon.is_none()
            && changes.alamat_lengkap.is_none();
        if no_changes {
            return Ok(current);
        }

        let updated = diesel::update(tim_perkawinan::table.find(id))
            .set(&changes)
            .returning(Mediator::as_returning())
            .get_result(conn)?;

        if let (Some(old), new) = (current.tier(), updated.tier()) {
            if new != Some(old) {
                clear_slot(conn, old, id)?;
            }
        }
        Ok(updated)
    })?;

    tracing::info!(mediator_id = %id, "mediator updated");
    Ok(mediator)
}

/// Delete a mediator and clear every participant reference to it.
pub fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
    conn.transaction::<_, AppError, _>(|conn| {
        for tier in MediatorTier::ALL {
            clear_slot(conn, tier, id)?;
        }
        let removed = diesel::delete(tim_perkawinan::table.find(id)).execute(conn)?;
        if removed == 0 {
            return Err(mediator_not_found(id));
        }
        Ok(())
    })?;

    tracing::info!(mediator_id = %id, "mediator deleted");
    Ok(())
}

fn clear_slot(conn: &mut PgConnection, tier: MediatorTier, mediator_id: Uuid) -> AppResult<usize> {
    let none: Option<Uuid> = None;
    let cleared = match tier {
        MediatorTier::Kelompok => diesel::update(peserta::table.filter(peserta::tim_kelompok_id.eq(mediator_id)))
            .set(peserta::tim_kelompok_id.eq(none))
            .execute(conn)?,
        MediatorTier::Desa => diesel::update(peserta::table.filter(peserta::tim_desa_id.eq(mediator_id)))
            .set(peserta::tim_desa_id.eq(none))
            .execute(conn)?,
        MediatorTier::Daerah => diesel::update(peserta::table.filter(peserta::tim_daerah_id.eq(mediator_id)))
            .set(peserta::tim_daerah_id.eq(none))
            .execute(conn)?,
    };
    Ok(cleared)
}

/// Set or clear one mediator slot of a participant. The mediator's tier must match the slot.
pub fn assign(
    conn: &mut PgConnection,
    participant_id: Uuid,
    tier: MediatorTier,
    mediator_id: Option<Uuid>,
) -> AppResult<Participant> {
    let participant = conn.transaction::<_, AppError, _>(|conn| {
        if let Some(id) = mediator_id {
            let mediator = get(conn, id)?;
            if mediator.tier() != Some(tier) {
                return Err(AppError::with_details(
                    ErrorCode::MediatorTierMismatch,
                    format!("mediator is not a {}", tier.label()),
                    serde_json::json!({ "mediator_id": id, "dapukan": mediator.dapukan }),
                ));
            }
        }

        let target = peserta::table.find(participant_id);
        let now = Utc::now();
        let updated = match tier {
            MediatorTier::Kelompok => diesel::update(target)
                .set((peserta::tim_kelompok_id.eq(mediator_id), peserta::updated_at.eq(now)))
                .returning(Participant::as_returning())
                .get_result(conn),
            MediatorTier::Desa => diesel::update(target)
                .set((peserta::tim_desa_id.eq(mediator_id), peserta::updated_at.eq(now)))
                .returning(Participant::as_returning())
                .get_result(conn),
            MediatorTier::Daerah => diesel::update(target)
                .set((peserta::tim_daerah_id.eq(mediator_id), peserta::updated_at.eq(now)))
                .returning(Participant::as_returning())
                .get_result(conn),
        };

        updated
            .optional()?
            .ok_or_else(|| profile_service::participant_not_found(participant_id))
    })?;

    tracing::info!(
        participant_id = %participant_id,
        tier = %tier,
        mediator_id = ?mediator_id,
        "mediator assignment changed"
    );
    Ok(participant)
}

pub fn count(conn: &mut PgConnection) -> AppResult<i64> {
    Ok(tim_perkawinan::table.count().get_result(conn)?)
}
