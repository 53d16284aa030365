use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use permata_shared::errors::{AppError, AppResult};

use crate::models::{AssignedMediators, Pairing, Participant, ParticipantSummary};
use crate::schema::{peserta, taaruf_pasangan, tim_perkawinan};
use crate::services::{interest_service, mediator_service, pairing_service, profile_service};
use crate::taaruf::{Sex, TaarufStatus};

/// One line of the admin participant table.
#[derive(Debug, Serialize)]
pub struct AdminParticipantRow {
    #[serde(flatten)]
    pub participant: Participant,
    pub umur: Option<u32>,
    pub tim_kelompok: Option<String>,
    pub tim_desa: Option<String>,
    pub tim_daerah: Option<String>,
    /// Names of participants who signalled interest in this one.
    pub peminat: Vec<String>,
    pub status_taaruf: Option<TaarufStatus>,
    pub pasangan_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct PairingView {
    #[serde(flatten)]
    pub pairing: Pairing,
    pub partner: ParticipantSummary,
}

/// Everything the per-participant management screen needs.
#[derive(Debug, Serialize)]
pub struct ParticipantManagement {
    pub participant: Participant,
    pub umur: Option<u32>,
    pub mediators: AssignedMediators,
    pub peminat: Vec<String>,
    pub pairing: Option<PairingView>,
    pub candidates: Vec<ParticipantSummary>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct PairingCounts {
    pub mediasi: i64,
    pub melamar: i64,
    pub menikah: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_participants: i64,
    pub visible_participants: i64,
    pub ikhwan: i64,
    pub akhwat: i64,
    pub pairings: PairingCounts,
    pub interest_signals: i64,
    pub mediators: i64,
}

impl PairingCounts {
    pub fn from_rows(rows: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut counts = Self::default();
        for (label, n) in rows {
            match TaarufStatus::from_column(&label) {
                TaarufStatus::Mediasi => counts.mediasi += n,
                TaarufStatus::Melamar => counts.melamar += n,
                TaarufStatus::Menikah => counts.menikah += n,
            }
        }
        counts
    }
}

pub fn list_participants(conn: &mut PgConnection) -> AppResult<Vec<AdminParticipantRow>> {
    let participants: Vec<Participant> = peserta::table
        .select(Participant::as_select())
        .order(peserta::created_at.desc())
        .load(conn)?;

    let mediator_names: HashMap<Uuid, String> = tim_perkawinan::table
        .select((tim_perkawinan::id, tim_perkawinan::nama))
        .load::<(Uuid, String)>(conn)?
        .into_iter()
        .collect();

    let mut inbound = interest_service::inbound_sender_names(conn)?;

    let pairings: Vec<Pairing> = taaruf_pasangan::table.select(Pairing::as_select()).load(conn)?;
    let mut pairing_of: HashMap<Uuid, (TaarufStatus, Uuid)> = HashMap::new();
    for p in &pairings {
        pairing_of.insert(p.ikhwan_id, (p.taaruf_status(), p.akhwat_id));
        pairing_of.insert(p.akhwat_id, (p.taaruf_status(), p.ikhwan_id));
    }

    let name_of = |slot: Option<Uuid>| slot.and_then(|id| mediator_names.get(&id).cloned());

    Ok(participants
        .into_iter()
        .map(|participant| {
            let pairing = pairing_of.get(&participant.id).copied();
            AdminParticipantRow {
                umur: participant.age(),
                tim_kelompok: name_of(participant.tim_kelompok_id),
                tim_desa: name_of(participant.tim_desa_id),
                tim_daerah: name_of(participant.tim_daerah_id),
                peminat: inbound.remove(&participant.id).unwrap_or_default(),
                status_taaruf: pairing.map(|(status, _)| status),
                pasangan_id: pairing.map(|(_, partner)| partner),
                participant,
            }
        })
        .collect())
}

pub fn participant_management(conn: &mut PgConnection, id: Uuid) -> AppResult<ParticipantManagement> {
    let participant = profile_service::get(conn, id)?;
    let mediators = profile_service::assigned_mediators(conn, &participant)?;
    let peminat = interest_service::inbound_sender_names_for(conn, id)?;

    let pairing = match pairing_service::find_for(conn, id)? {
        Some(pairing) => {
            let partner_id = pairing.partner_of(id).unwrap_or(pairing.akhwat_id);
            let partner = profile_service::get(conn, partner_id)?;
            Some(PairingView {
                partner: ParticipantSummary::from(&partner),
                pairing,
            })
        }
        None => None,
    };

    // Without a recorded sex there is nobody to propose; the screen still renders.
    let candidates = if participant.sex().is_some() {
        pairing_service::candidates(conn, &participant)?
            .iter()
            .map(ParticipantSummary::from)
            .collect()
    } else {
        Vec::new()
    };

    Ok(ParticipantManagement {
        umur: participant.age(),
        participant,
        mediators,
        peminat,
        pairing,
        candidates,
    })
}

/// Remove a participant together with its pairing and every signal touching it.
pub fn delete_participant(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
    conn.transaction::<_, AppError, _>(|conn| {
        interest_service::purge_touching(conn, &[id])?;
        diesel::delete(
            taaruf_pasangan::table.filter(
                taaruf_pasangan::ikhwan_id
                    .eq(id)
                    .or(taaruf_pasangan::akhwat_id.eq(id)),
            ),
        )
        .execute(conn)?;

        let removed = diesel::delete(peserta::table.find(id)).execute(conn)?;
        if removed == 0 {
            return Err(profile_service::participant_not_found(id));
        }
        Ok(())
    })?;

    tracing::info!(participant_id = %id, "participant deleted");
    Ok(())
}

pub fn stats(conn: &mut PgConnection) -> AppResult<DashboardStats> {
    let total_participants = peserta::table.count().get_result(conn)?;
    let visible_participants = peserta::table
        .filter(peserta::is_visible.eq(true))
        .count()
        .get_result(conn)?;
    let ikhwan = peserta::table
        .filter(peserta::jenis_kelamin.eq(Sex::Male.label()))
        .count()
        .get_result(conn)?;
    let akhwat = peserta::table
        .filter(peserta::jenis_kelamin.eq(Sex::Female.label()))
        .count()
        .get_result(conn)?;

    Ok(DashboardStats {
        total_participants,
        visible_participants,
        ikhwan,
        akhwat,
        pairings: PairingCounts::from_rows(pairing_service::count_by_status(conn)?),
        interest_signals: interest_service::count(conn)?,
        mediators: mediator_service::count(conn)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairing_counts_fold_labels() {
        let counts = PairingCounts::from_rows(vec![
            ("Mediasi".to_string(), 3),
            ("Melamar".to_string(), 1),
            ("Dilamar".to_string(), 2),
            ("Menikah".to_string(), 4),
        ]);
        assert_eq!(counts, PairingCounts { mediasi: 3, melamar: 3, menikah: 4 });
    }
}
