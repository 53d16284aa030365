use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{admin_peserta, peserta, taaruf_pasangan, tim_perkawinan};
use crate::taaruf::{age_today, MediatorTier, Orientation, Sex, TaarufStatus};

/// Initial (and only) status an interest signal is created with.
pub const INTEREST_PENDING: &str = "menunggu_mediasi";

// --- Participant ---

#[derive(Debug, Queryable, Selectable, Identifiable, Serialize, Clone)]
#[diesel(table_name = peserta)]
pub struct Participant {
    pub id: Uuid,
    pub nama: String,
    pub bin_binti: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub status: Option<String>,
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: Option<NaiveDate>,
    pub anak_ke: Option<i32>,
    pub jumlah_saudara: Option<i32>,
    pub suku: Option<String>,
    pub tinggi_badan: Option<i32>,
    pub berat_badan: Option<i32>,
    pub pendidikan_terakhir: Option<String>,
    pub pekerjaan: Option<String>,
    pub nomor_telepon: Option<String>,
    pub hobby: Option<String>,
    pub dapukan: Option<String>,
    pub kelompok: Option<String>,
    pub desa: Option<String>,
    pub daerah: Option<String>,
    pub alamat_lengkap: Option<String>,
    pub kriteria_calon_pasangan: Option<String>,
    pub is_visible: bool,
    pub avatar_url: Option<String>,
    pub tim_kelompok_id: Option<Uuid>,
    pub tim_desa_id: Option<Uuid>,
    pub tim_daerah_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    pub fn sex(&self) -> Option<Sex> {
        Sex::from_column(self.jenis_kelamin.as_deref())
    }

    pub fn age(&self) -> Option<u32> {
        age_today(self.tanggal_lahir)
    }

    pub fn mediator_id(&self, tier: MediatorTier) -> Option<Uuid> {
        match tier {
            MediatorTier::Kelompok => self.tim_kelompok_id,
            MediatorTier::Desa => self.tim_desa_id,
            MediatorTier::Daerah => self.tim_daerah_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = peserta)]
pub struct NewParticipantStub {
    pub id: Uuid,
    pub nama: String,
    pub is_visible: bool,
}

/// Full biodata write. `None` clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = peserta, treat_none_as_null = true)]
pub struct BiodataChangeset {
    pub nama: String,
    pub bin_binti: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub status: Option<String>,
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: Option<NaiveDate>,
    pub anak_ke: Option<i32>,
    pub jumlah_saudara: Option<i32>,
    pub suku: Option<String>,
    pub tinggi_badan: Option<i32>,
    pub berat_badan: Option<i32>,
    pub pendidikan_terakhir: Option<String>,
    pub pekerjaan: Option<String>,
    pub nomor_telepon: Option<String>,
    pub hobby: Option<String>,
    pub dapukan: Option<String>,
    pub kelompok: Option<String>,
    pub desa: Option<String>,
    pub daerah: Option<String>,
    pub alamat_lengkap: Option<String>,
    pub kriteria_calon_pasangan: Option<String>,
    pub avatar_url: Option<String>,
    pub is_visible: bool,
    pub updated_at: DateTime<Utc>,
}

/// Compact participant reference used inside other payloads.
#[derive(Debug, Serialize, Clone)]
pub struct ParticipantSummary {
    pub id: Uuid,
    pub nama: String,
    pub jenis_kelamin: Option<String>,
    pub umur: Option<u32>,
    pub avatar_url: Option<String>,
    pub daerah: Option<String>,
}

impl From<&Participant> for ParticipantSummary {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id,
            nama: p.nama.clone(),
            jenis_kelamin: p.jenis_kelamin.clone(),
            umur: p.age(),
            avatar_url: p.avatar_url.clone(),
            daerah: p.daerah.clone(),
        }
    }
}

// --- Mediator ---

#[derive(Debug, Queryable, Selectable, Identifiable, Serialize, Clone)]
#[diesel(table_name = tim_perkawinan)]
pub struct Mediator {
    pub id: Uuid,
    pub nama: String,
    pub dapukan: String,
    pub nomor_telepon: Option<String>,
    pub alamat_lengkap: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Mediator {
    pub fn tier(&self) -> Option<MediatorTier> {
        self.dapukan.parse().ok()
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tim_perkawinan)]
pub struct NewMediator {
    pub nama: String,
    pub dapukan: String,
    pub nomor_telepon: Option<String>,
    pub alamat_lengkap: Option<String>,
}

/// Partial mediator update. For the nullable columns `Some(None)` clears the value.
#[derive(Debug, AsChangeset, Default)]
#[diesel(table_name = tim_perkawinan)]
pub struct UpdateMediator {
    pub nama: Option<String>,
    pub dapukan: Option<String>,
    pub nomor_telepon: Option<Option<String>>,
    pub alamat_lengkap: Option<Option<String>>,
}

/// The three mediator slots of one participant, resolved.
#[derive(Debug, Serialize, Default, Clone)]
pub struct AssignedMediators {
    pub kelompok: Option<Mediator>,
    pub desa: Option<Mediator>,
    pub daerah: Option<Mediator>,
}

// --- Interest signal ---

#[derive(Debug, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = admin_peserta)]
pub struct InterestSignal {
    pub id: Uuid,
    pub pengirim_id: Uuid,
    pub target_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = admin_peserta)]
pub struct NewInterestSignal {
    pub pengirim_id: Uuid,
    pub target_id: Uuid,
    pub status: String,
}

// --- Pairing ---

#[derive(Debug, Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone)]
#[diesel(table_name = taaruf_pasangan)]
pub struct Pairing {
    pub id: Uuid,
    pub ikhwan_id: Uuid,
    pub akhwat_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pairing {
    pub fn taaruf_status(&self) -> TaarufStatus {
        TaarufStatus::from_column(&self.status)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation { ikhwan_id: self.ikhwan_id, akhwat_id: self.akhwat_id }
    }

    pub fn partner_of(&self, subject: Uuid) -> Option<Uuid> {
        self.orientation().partner_of(subject)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = taaruf_pasangan)]
pub struct NewPairing {
    pub ikhwan_id: Uuid,
    pub akhwat_id: Uuid,
    pub status: String,
}
