use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use permata_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{NewPairing, Pairing, Participant};
use crate::schema::{peserta, taaruf_pasangan};
use crate::services::{interest_service, profile_service};
use crate::taaruf::{orient, CandidatePool, StatusChange, StatusPolicy, TaarufStatus};

fn already_paired(err: diesel::result::Error) -> AppError {
    match err {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AppError::new(ErrorCode::AlreadyPaired, "participant is already in a pairing")
        }
        other => other.into(),
    }
}

pub fn find_for(conn: &mut PgConnection, participant: Uuid) -> AppResult<Option<Pairing>> {
    Ok(taaruf_pasangan::table
        .filter(
            taaruf_pasangan::ikhwan_id
                .eq(participant)
                .or(taaruf_pasangan::akhwat_id.eq(participant)),
        )
        .select(Pairing::as_select())
        .first(conn)
        .optional()?)
}

fn load_pool(conn: &mut PgConnection, subject: Uuid) -> AppResult<CandidatePool> {
    let pairs: Vec<(Uuid, Uuid)> = taaruf_pasangan::table
        .select((taaruf_pasangan::ikhwan_id, taaruf_pasangan::akhwat_id))
        .load(conn)?;
    Ok(CandidatePool::new(subject, pairs))
}

/// Opposite-sex participants not paired elsewhere, by name.
pub fn candidates(conn: &mut PgConnection, subject: &Participant) -> AppResult<Vec<Participant>> {
    let Some(sex) = subject.sex() else {
        return Err(AppError::new(ErrorCode::SexNotRecorded, "participant has no sex recorded"));
    };

    let pool = load_pool(conn, subject.id)?;
    let people: Vec<Participant> = peserta::table
        .filter(peserta::jenis_kelamin.eq(sex.opposite().label()))
        .select(Participant::as_select())
        .order(peserta::nama.asc())
        .load(conn)?;

    Ok(pool.filter(sex, people, |p| (p.id, p.sex())))
}

/// Pair `subject` with `candidate`, or swap the partner of an existing pairing.
pub fn select_partner(conn: &mut PgConnection, subject_id: Uuid, candidate_id: Uuid) -> AppResult<Pairing> {
    let pairing = conn.transaction::<_, AppError, _>(|conn| {
        let subject = profile_service::get(conn, subject_id)?;
        let candidate = profile_service::get(conn, candidate_id)?;
        let orientation = orient(subject.id, subject.sex(), candidate.id, candidate.sex())?;

        let pool = load_pool(conn, subject.id)?;
        if let Some(sex) = subject.sex() {
            if !pool.admits(sex, candidate.id, candidate.sex()) {
                return Err(AppError::with_details(
                    ErrorCode::CandidateUnavailable,
                    "candidate is already paired with someone else",
                    serde_json::json!({ "candidate_id": candidate.id }),
                ));
            }
        }

        match find_for(conn, subject.id)? {
            None => {
                interest_service::purge_touching(conn, &[subject.id, candidate.id])?;
                diesel::insert_into(taaruf_pasangan::table)
                    .values(&NewPairing {
                        ikhwan_id: orientation.ikhwan_id,
                        akhwat_id: orientation.akhwat_id,
                        status: TaarufStatus::Mediasi.label().to_string(),
                    })
                    .returning(Pairing::as_returning())
                    .get_result(conn)
                    .map_err(already_paired)
            }
            Some(existing) if existing.partner_of(subject.id) == Some(candidate.id) => Ok(existing),
            Some(existing) => {
                interest_service::purge_touching(conn, &[candidate.id])?;
                diesel::update(taaruf_pasangan::table.find(existing.id))
                    .set((
                        taaruf_pasangan::ikhwan_id.eq(orientation.ikhwan_id),
                        taaruf_pasangan::akhwat_id.eq(orientation.akhwat_id),
                        taaruf_pasangan::updated_at.eq(Utc::now()),
                    ))
                    .returning(Pairing::as_returning())
                    .get_result(conn)
                    .map_err(already_paired)
            }
        }
    })?;

    tracing::info!(
        pairing_id = %pairing.id,
        ikhwan_id = %pairing.ikhwan_id,
        akhwat_id = %pairing.akhwat_id,
        status = %pairing.status,
        "partner selected"
    );
    Ok(pairing)
}

/// Apply a status request. `Ok(None)` means the pairing was reset.
pub fn change_status(
    conn: &mut PgConnection,
    policy: StatusPolicy,
    subject_id: Uuid,
    change: StatusChange,
) -> AppResult<Option<Pairing>> {
    let target = match change {
        StatusChange::Reset => {
            reset(conn, subject_id)?;
            return Ok(None);
        }
        StatusChange::Set(status) => status,
    };

    let pairing = conn.transaction::<_, AppError, _>(|conn| {
        profile_service::get(conn, subject_id)?;
        let existing = find_for(conn, subject_id)?.ok_or_else(|| {
            AppError::new(ErrorCode::PairingNotFound, "participant has no pairing")
        })?;
        let next = policy.transition(existing.taaruf_status(), target)?;

        Ok(diesel::update(taaruf_pasangan::table.find(existing.id))
            .set((
                taaruf_pasangan::status.eq(next.label()),
                taaruf_pasangan::updated_at.eq(Utc::now()),
            ))
            .returning(Pairing::as_returning())
            .get_result(conn)?)
    })?;

    tracing::info!(pairing_id = %pairing.id, status = %pairing.status, "pairing status changed");
    Ok(Some(pairing))
}

/// Remove the subject's pairing whatever its status. Returns whether a row was deleted.
pub fn reset(conn: &mut PgConnection, subject_id: Uuid) -> AppResult<bool> {
    profile_service::get(conn, subject_id)?;
    let removed = diesel::delete(
        taaruf_pasangan::table.filter(
            taaruf_pasangan::ikhwan_id
                .eq(subject_id)
                .or(taaruf_pasangan::akhwat_id.eq(subject_id)),
        ),
    )
    .execute(conn)?;

    if removed > 0 {
        tracing::info!(participant_id = %subject_id, "pairing reset");
    }
    Ok(removed > 0)
}

/// Pairing counts per status label.
pub fn count_by_status(conn: &mut PgConnection) -> AppResult<Vec<(String, i64)>> {
    Ok(taaruf_pasangan::table
        .group_by(taaruf_pasangan::status)
        .select((taaruf_pasangan::status, diesel::dsl::count_star()))
        .load(conn)?)
}
