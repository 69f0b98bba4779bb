//! # Records returned by the disposisi backend
//!
//! Every type here is a transient client-side copy of a server-owned record.
//! The backend validates and mutates them; the client only displays, filters
//! and, after a successful mutation, patches its last-fetched snapshot (see
//! [`crate::list`]).
//!
//! | Struct | Endpoint family |
//! |--------|-----------------|
//! | [`Surat`] | `/surat-masuk*`: incoming letters with their [`Disposisi`] sheet |
//! | [`SuratKeluar`] | `/surat-keluar*`: outgoing letters |
//! | [`UserAccount`] | `/admin/users*` |
//! | [`Notification`] | `/notifications*` |
//! | [`JadwalAcara`] / [`Tamu`] | `/jadwal-acara*`: events and their guestbook |
//! | [`DashboardStats`] | `/dashboard*` |
//!
//! Each list record implements [`Record`] so the same list view controller can
//! search, filter and patch any of them.

use serde::{Deserialize, Serialize};

use crate::list::Record;

/// Backend primary key.
pub type RecordId = i64;

/// Processing status of an incoming letter. Only ever reflected from the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuratStatus {
    #[default]
    Pending,
    Processed,
}

impl SuratStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuratStatus::Pending => "pending",
            SuratStatus::Processed => "processed",
        }
    }

    /// Indonesian label used in tables and badges.
    pub fn label(&self) -> &'static str {
        match self {
            SuratStatus::Pending => "Menunggu",
            SuratStatus::Processed => "Diproses",
        }
    }
}

/// Disposition sheet attached to an incoming letter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Disposisi {
    #[serde(default)]
    pub perihal: Option<String>,
    #[serde(default)]
    pub disposisi_kepada: Option<String>,
    #[serde(default)]
    pub tindakan: Vec<String>,
    #[serde(default)]
    pub sifat: Option<String>,
    #[serde(default)]
    pub catatan: Option<String>,
}

/// Reference to an uploaded photo stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub id: RecordId,
    pub url: String,
}

/// An incoming letter ("surat masuk").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surat {
    pub id: RecordId,
    #[serde(default)]
    pub asal_instansi: Option<String>,
    #[serde(default)]
    pub nomor_surat: Option<String>,
    #[serde(default)]
    pub tujuan_jabatan: Option<String>,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub status: SuratStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub disposisi: Disposisi,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
}

/// Fields an optimistic update may overwrite on a [`Surat`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuratPatch {
    pub status: Option<SuratStatus>,
    pub processed_at: Option<String>,
    pub keterangan: Option<String>,
}

impl Record for Surat {
    type Id = RecordId;
    type Patch = SuratPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.asal_instansi.as_deref(),
            self.nomor_surat.as_deref(),
            self.tujuan_jabatan.as_deref(),
            self.keterangan.as_deref(),
            self.disposisi.perihal.as_deref(),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.as_str().to_string()),
            "tujuan_jabatan" => self.tujuan_jabatan.clone(),
            "asal_instansi" => self.asal_instansi.clone(),
            "sifat" => self.disposisi.sifat.clone(),
            _ => None,
        }
    }

    fn apply_patch(&mut self, patch: &SuratPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(ref at) = patch.processed_at {
            self.processed_at = Some(at.clone());
        }
        if let Some(ref k) = patch.keterangan {
            self.keterangan = Some(k.clone());
        }
    }
}

/// An outgoing letter ("surat keluar").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuratKeluar {
    pub id: RecordId,
    #[serde(default)]
    pub nomor_surat: Option<String>,
    #[serde(default)]
    pub tujuan: Option<String>,
    #[serde(default)]
    pub perihal: Option<String>,
    #[serde(default)]
    pub tanggal: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Payload for `POST /surat-keluar`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSuratKeluar {
    pub nomor_surat: String,
    pub tujuan: String,
    pub perihal: String,
    pub tanggal: String,
}

impl Record for SuratKeluar {
    type Id = RecordId;
    type Patch = ();

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.nomor_surat.as_deref(),
            self.tujuan.as_deref(),
            self.perihal.as_deref(),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "tujuan" => self.tujuan.clone(),
            _ => None,
        }
    }

    fn apply_patch(&mut self, _patch: &()) {}
}

/// A user account as listed by `/admin/users`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    /// Raw backend role string; resolve with [`crate::Role::parse`].
    pub role: String,
    #[serde(default)]
    pub jabatan: Option<String>,
    #[serde(default)]
    pub bidang: Option<String>,
}

impl UserAccount {
    /// Get display name, falling back to email if name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Payload for `POST /admin/users`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUserAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub jabatan: String,
    pub bidang: String,
}

impl Record for UserAccount {
    type Id = RecordId;
    type Patch = ();

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            Some(self.email.as_str()),
            self.jabatan.as_deref(),
            self.bidang.as_deref(),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "role" => Some(self.role.clone()),
            "bidang" => self.bidang.clone(),
            _ => None,
        }
    }

    fn apply_patch(&mut self, _patch: &()) {}
}

/// An in-app notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub surat_id: Option<RecordId>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Optimistic read-state change for a [`Notification`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkRead;

impl Record for Notification {
    type Id = RecordId;
    type Patch = MarkRead;

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.message.as_str())]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "is_read" => Some(if self.is_read { "read" } else { "unread" }.to_string()),
            _ => None,
        }
    }

    fn apply_patch(&mut self, _patch: &MarkRead) {
        self.is_read = true;
    }
}

/// Event status in the guestbook module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcaraStatus {
    #[default]
    Active,
    Inactive,
}

impl AcaraStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcaraStatus::Active => "active",
            AcaraStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AcaraStatus::Active => AcaraStatus::Inactive,
            AcaraStatus::Inactive => AcaraStatus::Active,
        }
    }
}

/// A scheduled event ("jadwal acara").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JadwalAcara {
    pub id: RecordId,
    pub nama_acara: String,
    #[serde(default)]
    pub tanggal_mulai: Option<String>,
    #[serde(default)]
    pub tanggal_selesai: Option<String>,
    #[serde(default)]
    pub lokasi: Option<String>,
    #[serde(default)]
    pub status: AcaraStatus,
}

/// Payload for `POST /jadwal-acara`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewJadwalAcara {
    pub nama_acara: String,
    pub tanggal_mulai: String,
    pub tanggal_selesai: String,
    pub lokasi: String,
}

impl Record for JadwalAcara {
    type Id = RecordId;
    type Patch = AcaraStatus;

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.nama_acara.as_str()), self.lokasi.as_deref()]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn apply_patch(&mut self, status: &AcaraStatus) {
        self.status = *status;
    }
}

/// A guestbook check-in entry ("tamu").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tamu {
    pub id: RecordId,
    pub acara_id: RecordId,
    pub nama: String,
    #[serde(default)]
    pub instansi: Option<String>,
    #[serde(default)]
    pub jabatan: Option<String>,
    #[serde(default)]
    pub checked_in_at: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
}

impl Record for Tamu {
    type Id = RecordId;
    type Patch = ();

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.nama.as_str()),
            self.instansi.as_deref(),
            self.jabatan.as_deref(),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "instansi" => self.instansi.clone(),
            _ => None,
        }
    }

    fn apply_patch(&mut self, _patch: &()) {}
}

/// Place suggestion returned by the location-recommendation lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Aggregate counters shown on the dashboards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_surat: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub unread_notifications: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surat_decodes_with_missing_fields() {
        let surat: Surat = serde_json::from_str(r#"{"id": 3, "status": "processed"}"#).unwrap();
        assert_eq!(surat.id, 3);
        assert_eq!(surat.status, SuratStatus::Processed);
        assert!(surat.nomor_surat.is_none());
        assert!(surat.photos.is_empty());
        assert_eq!(surat.field("status").as_deref(), Some("processed"));
        assert_eq!(surat.field("sifat"), None);
    }

    #[test]
    fn test_surat_patch_only_touches_given_fields() {
        let mut surat: Surat =
            serde_json::from_str(r#"{"id": 1, "keterangan": "lama"}"#).unwrap();
        surat.apply_patch(&SuratPatch {
            status: Some(SuratStatus::Processed),
            ..Default::default()
        });
        assert_eq!(surat.status, SuratStatus::Processed);
        assert_eq!(surat.keterangan.as_deref(), Some("lama"));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserAccount {
            id: 1,
            name: "  ".to_string(),
            email: "a@b.go.id".to_string(),
            role: "staff".to_string(),
            jabatan: None,
            bidang: None,
        };
        assert_eq!(user.display_name(), "a@b.go.id");
    }

    #[test]
    fn test_acara_status_toggle() {
        assert_eq!(AcaraStatus::Active.toggled(), AcaraStatus::Inactive);
        assert_eq!(AcaraStatus::Inactive.toggled(), AcaraStatus::Active);
    }

    #[test]
    fn test_create_only_records_ignore_patches() {
        let mut keluar: SuratKeluar =
            serde_json::from_str(r#"{"id": 4, "perihal": "Undangan"}"#).unwrap();
        let before = keluar.clone();
        keluar.apply_patch(&());
        assert_eq!(keluar, before);

        let mut list = crate::ListController::new(10);
        list.apply(crate::ListAction::Replace(vec![before.clone()]));
        list.apply(crate::ListAction::Patch(4, ()));
        assert_eq!(list.records(), &[before][..]);
    }
}
