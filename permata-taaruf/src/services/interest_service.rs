use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use permata_shared::errors::{AppError, AppResult};

use crate::models::{NewInterestSignal, INTEREST_PENDING};
use crate::schema::{admin_peserta, peserta};

/// Flip the (sender, target) signal. Returns whether a signal exists afterwards.
pub fn toggle(conn: &mut PgConnection, sender: Uuid, target: Uuid) -> AppResult<bool> {
    let active = conn.transaction::<_, AppError, _>(|conn| {
        let existing = admin_peserta::table
            .filter(admin_peserta::pengirim_id.eq(sender))
            .filter(admin_peserta::target_id.eq(target))
            .select(admin_peserta::id)
            .first::<Uuid>(conn)
            .optional()?;

        match existing {
            Some(id) => {
                diesel::delete(admin_peserta::table.find(id)).execute(conn)?;
                Ok(false)
            }
            None => {
                // A concurrent toggle may have inserted first; either way the signal now exists.
                diesel::insert_into(admin_peserta::table)
                    .values(&NewInterestSignal {
                        pengirim_id: sender,
                        target_id: target,
                        status: INTEREST_PENDING.to_string(),
                    })
                    .on_conflict((admin_peserta::pengirim_id, admin_peserta::target_id))
                    .do_nothing()
                    .execute(conn)?;
                Ok(true)
            }
        }
    })?;

    tracing::info!(sender_id = %sender, target_id = %target, active, "interest toggled");
    Ok(active)
}

pub fn is_active(conn: &mut PgConnection, sender: Uuid, target: Uuid) -> AppResult<bool> {
    Ok(diesel::select(exists(
        admin_peserta::table
            .filter(admin_peserta::pengirim_id.eq(sender))
            .filter(admin_peserta::target_id.eq(target)),
    ))
    .get_result(conn)?)
}

/// Delete every signal sent or received by any of `ids`.
pub fn purge_touching(conn: &mut PgConnection, ids: &[Uuid]) -> AppResult<usize> {
    let removed = diesel::delete(
        admin_peserta::table.filter(
            admin_peserta::pengirim_id
                .eq_any(ids.to_vec())
                .or(admin_peserta::target_id.eq_any(ids.to_vec())),
        ),
    )
    .execute(conn)?;

    if removed > 0 {
        tracing::debug!(?ids, removed, "interest signals purged");
    }
    Ok(removed)
}

/// Names of everyone who signalled interest, keyed by target, oldest first.
pub fn inbound_sender_names(conn: &mut PgConnection) -> AppResult<HashMap<Uuid, Vec<String>>> {
    let rows: Vec<(Uuid, String)> = admin_peserta::table
        .inner_join(peserta::table)
        .select((admin_peserta::target_id, peserta::nama))
        .order(admin_peserta::created_at.asc())
        .load(conn)?;

    let mut by_target: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (target, nama) in rows {
        by_target.entry(target).or_default().push(nama);
    }
    Ok(by_target)
}

pub fn inbound_sender_names_for(conn: &mut PgConnection, target: Uuid) -> AppResult<Vec<String>> {
    Ok(admin_peserta::table
        .inner_join(peserta::table)
        .filter(admin_peserta::target_id.eq(target))
        .select(peserta::nama)
        .order(admin_peserta::created_at.asc())
        .load(conn)?)
}

pub fn count(conn: &mut PgConnection) -> AppResult<i64> {
    Ok(admin_peserta::table.count().get_result(conn)?)
}
