//! # Incoming-letter submission wizard
//!
//! A linear state machine over four [`WizardStep`]s:
//!
//! ```text
//! Metadata -> Attachments -> Disposition -> Review -> (submit)
//! ```
//!
//! [`SuratWizard::advance`] only moves forward when the current step's
//! required checks hold, and reports the first failing check otherwise.
//! [`SuratWizard::retreat`] always moves back one step. Field values survive
//! both directions. Submitting is split in two so the network call stays
//! outside this crate: [`SuratWizard::begin_submit`] builds the payload and
//! [`SuratWizard::finish_submit`] records the backend's answer.

use thiserror::Error;

use crate::attachments::{Attachment, AttachmentError, AttachmentPolicy, AttachmentSet, BatchReport};
use crate::role::Role;

/// Steps in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Metadata,
    Attachments,
    Disposition,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Metadata,
        WizardStep::Attachments,
        WizardStep::Disposition,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Metadata => 0,
            WizardStep::Attachments => 1,
            WizardStep::Disposition => 2,
            WizardStep::Review => 3,
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Metadata => "Data Surat",
            WizardStep::Attachments => "Foto Surat",
            WizardStep::Disposition => "Lembar Disposisi",
            WizardStep::Review => "Konfirmasi",
        }
    }
}

/// Text fields collected across the steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuratField {
    AsalInstansi,
    NomorSurat,
    TujuanJabatan,
    Keterangan,
    Perihal,
    DisposisiKepada,
    Sifat,
    Catatan,
}

impl SuratField {
    /// Multipart field name expected by `POST /surat-masuk`.
    pub fn name(&self) -> &'static str {
        match self {
            SuratField::AsalInstansi => "asal_instansi",
            SuratField::NomorSurat => "nomor_surat",
            SuratField::TujuanJabatan => "tujuan_jabatan",
            SuratField::Keterangan => "keterangan",
            SuratField::Perihal => "perihal",
            SuratField::DisposisiKepada => "disposisi_kepada",
            SuratField::Sifat => "sifat",
            SuratField::Catatan => "catatan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuratField::AsalInstansi => "Asal instansi",
            SuratField::NomorSurat => "Nomor surat",
            SuratField::TujuanJabatan => "Tujuan jabatan",
            SuratField::Keterangan => "Keterangan",
            SuratField::Perihal => "Perihal",
            SuratField::DisposisiKepada => "Disposisi kepada",
            SuratField::Sifat => "Sifat",
            SuratField::Catatan => "Catatan",
        }
    }

    /// Fields that must be non-blank before leaving `step`.
    pub fn required_for(step: WizardStep) -> &'static [SuratField] {
        match step {
            WizardStep::Metadata => &[
                SuratField::AsalInstansi,
                SuratField::NomorSurat,
                SuratField::TujuanJabatan,
            ],
            WizardStep::Disposition => &[
                SuratField::Perihal,
                SuratField::DisposisiKepada,
                SuratField::Sifat,
            ],
            WizardStep::Attachments | WizardStep::Review => &[],
        }
    }
}

/// Choices offered for the `sifat` (sensitivity) field.
pub const SIFAT_OPTIONS: &[&str] = &["Biasa", "Segera", "Sangat Segera", "Rahasia"];

/// Choices offered for the `tindakan` (action) tags.
pub const TINDAKAN_OPTIONS: &[&str] = &[
    "Untuk diketahui",
    "Untuk ditindaklanjuti",
    "Untuk dihadiri",
    "Untuk dijawab",
    "Untuk diarsipkan",
];

/// Accumulated form state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuratForm {
    pub asal_instansi: String,
    pub nomor_surat: String,
    pub tujuan_jabatan: String,
    pub keterangan: String,
    pub perihal: String,
    pub disposisi_kepada: String,
    pub tindakan: Vec<String>,
    pub sifat: String,
    pub catatan: String,
}

impl SuratForm {
    pub fn get(&self, field: SuratField) -> &str {
        match field {
            SuratField::AsalInstansi => &self.asal_instansi,
            SuratField::NomorSurat => &self.nomor_surat,
            SuratField::TujuanJabatan => &self.tujuan_jabatan,
            SuratField::Keterangan => &self.keterangan,
            SuratField::Perihal => &self.perihal,
            SuratField::DisposisiKepada => &self.disposisi_kepada,
            SuratField::Sifat => &self.sifat,
            SuratField::Catatan => &self.catatan,
        }
    }

    pub fn set(&mut self, field: SuratField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SuratField::AsalInstansi => self.asal_instansi = value,
            SuratField::NomorSurat => self.nomor_surat = value,
            SuratField::TujuanJabatan => self.tujuan_jabatan = value,
            SuratField::Keterangan => self.keterangan = value,
            SuratField::Perihal => self.perihal = value,
            SuratField::DisposisiKepada => self.disposisi_kepada = value,
            SuratField::Sifat => self.sifat = value,
            SuratField::Catatan => self.catatan = value,
        }
    }

    /// Add or remove an action tag.
    pub fn toggle_tindakan(&mut self, tag: &str) {
        if let Some(pos) = self.tindakan.iter().position(|t| t == tag) {
            self.tindakan.remove(pos);
        } else {
            self.tindakan.push(tag.to_string());
        }
    }
}

/// Local validation failures. None of them contacts the backend.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("{} wajib diisi", .0.label())]
    MissingField(SuratField),
    #[error("Lampirkan minimal satu foto surat")]
    NoAttachment,
    #[error("Sudah di langkah terakhir")]
    AtLastStep,
    #[error("Surat hanya dapat dikirim dari langkah konfirmasi")]
    NotAtReview,
    #[error("Surat sedang dikirim")]
    AlreadySubmitting,
}

/// Everything `POST /surat-masuk` needs, in one value.
#[derive(Clone, Debug, PartialEq)]
pub struct SuratPayload {
    /// `(field name, value)` pairs, always all nine text fields.
    pub fields: Vec<(&'static str, String)>,
    pub photos: Vec<Attachment>,
}

impl SuratPayload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// What the caller should do after the backend answered.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The wizard was reset; navigate to `redirect` and show `toast`.
    /// `released_previews` should be revoked by the caller.
    Completed {
        redirect: &'static str,
        toast: String,
        released_previews: Vec<String>,
    },
    /// Still on the review step with `message` shown; nothing was lost.
    Failed { message: String },
}

/// The wizard state machine.
#[derive(Clone, Debug)]
pub struct SuratWizard {
    step: WizardStep,
    form: SuratForm,
    attachments: AttachmentSet,
    policy: AttachmentPolicy,
    validation: Option<WizardError>,
    submit_error: Option<String>,
    submitting: bool,
}

impl SuratWizard {
    pub fn new(policy: AttachmentPolicy) -> Self {
        Self {
            step: WizardStep::Metadata,
            form: SuratForm::default(),
            attachments: AttachmentSet::new(),
            policy,
            validation: None,
            submit_error: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &SuratForm {
        &self.form
    }

    pub fn set_field(&mut self, field: SuratField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn toggle_tindakan(&mut self, tag: &str) {
        self.form.toggle_tindakan(tag);
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    pub fn policy(&self) -> &AttachmentPolicy {
        &self.policy
    }

    /// The message from the last rejected `advance`, if any.
    pub fn validation(&self) -> Option<&WizardError> {
        self.validation.as_ref()
    }

    /// The message from the last failed submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn add_photos<F>(
        &mut self,
        batch: Vec<Attachment>,
        make_preview: F,
    ) -> Result<BatchReport, AttachmentError>
    where
        F: FnMut(&Attachment) -> String,
    {
        self.attachments.append_batch(&self.policy, batch, make_preview)
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        self.attachments.remove(index)
    }

    /// First failing check of `step`, if any.
    pub fn check(&self, step: WizardStep) -> Result<(), WizardError> {
        match step {
            WizardStep::Metadata | WizardStep::Disposition => {
                for field in SuratField::required_for(step) {
                    if self.form.get(*field).trim().is_empty() {
                        return Err(WizardError::MissingField(*field));
                    }
                }
                Ok(())
            }
            WizardStep::Attachments => {
                if self.attachments.is_empty() {
                    Err(WizardError::NoAttachment)
                } else {
                    Ok(())
                }
            }
            WizardStep::Review => {
                self.check(WizardStep::Metadata)?;
                self.check(WizardStep::Attachments)?;
                self.check(WizardStep::Disposition)
            }
        }
    }

    /// Move to the next step if the current one is complete.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let result = self.check(self.step).and_then(|()| {
            self.step.next().ok_or(WizardError::AtLastStep)
        });
        match result {
            Ok(next) => {
                self.step = next;
                self.validation = None;
                Ok(next)
            }
            Err(e) => {
                self.validation = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Move back one step. Returns `false` on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                self.validation = None;
                true
            }
            None => false,
        }
    }

    /// Build the payload for the single create request.
    pub fn begin_submit(&mut self) -> Result<SuratPayload, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::NotAtReview);
        }
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        if let Err(e) = self.check(WizardStep::Review) {
            self.validation = Some(e.clone());
            return Err(e);
        }

        self.submitting = true;
        self.submit_error = None;

        let f = &self.form;
        let fields = vec![
            ("asal_instansi", f.asal_instansi.trim().to_string()),
            ("nomor_surat", f.nomor_surat.trim().to_string()),
            ("tujuan_jabatan", f.tujuan_jabatan.trim().to_string()),
            ("keterangan", f.keterangan.trim().to_string()),
            ("perihal", f.perihal.trim().to_string()),
            ("disposisi_kepada", f.disposisi_kepada.trim().to_string()),
            ("tindakan", f.tindakan.join(", ")),
            ("sifat", f.sifat.trim().to_string()),
            ("catatan", f.catatan.trim().to_string()),
        ];

        Ok(SuratPayload {
            fields,
            photos: self.attachments.files().to_vec(),
        })
    }

    /// Record the backend's answer to the create request.
    ///
    /// `Err` carries the user-facing message. A failure keeps every field
    /// and photo so the user can retry.
    pub fn finish_submit(&mut self, result: Result<(), String>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                let released_previews = self.attachments.clear();
                *self = SuratWizard::new(self.policy.clone());
                SubmitOutcome::Completed {
                    redirect: Role::Admin.home_path(),
                    toast: "Surat berhasil ditambahkan".to_string(),
                    released_previews,
                }
            }
            Err(message) => {
                self.submit_error = Some(message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }
}

impl Default for SuratWizard {
    fn default() -> Self {
        Self::new(AttachmentPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(name: &str, size: usize) -> Attachment {
        Attachment::new(name, "image/jpeg", vec![0u8; size])
    }

    fn filled_wizard() -> SuratWizard {
        let mut w = SuratWizard::default();
        w.set_field(SuratField::AsalInstansi, "Dinas A");
        w.set_field(SuratField::NomorSurat, "1/X/2024");
        w.set_field(SuratField::TujuanJabatan, "Sekretaris");
        w.set_field(SuratField::Keterangan, "Undangan rapat");
        w.advance().unwrap();
        w.add_photos(vec![jpeg("scan.jpg", 2 * 1024 * 1024)], |f| f.name.clone())
            .unwrap();
        w.advance().unwrap();
        w.set_field(SuratField::Perihal, "Rapat");
        w.set_field(SuratField::DisposisiKepada, "Sekretaris");
        w.set_field(SuratField::Sifat, "Segera");
        w.advance().unwrap();
        w
    }

    #[test]
    fn test_advance_blocked_by_missing_field() {
        let mut w = SuratWizard::default();
        w.set_field(SuratField::AsalInstansi, "Dinas A");
        w.set_field(SuratField::TujuanJabatan, "Sekretaris");

        let err = w.advance().unwrap_err();
        assert_eq!(err, WizardError::MissingField(SuratField::NomorSurat));
        assert_eq!(err.to_string(), "Nomor surat wajib diisi");
        assert_eq!(w.step(), WizardStep::Metadata);
        assert_eq!(w.validation(), Some(&err));

        w.set_field(SuratField::NomorSurat, "1/X/2024");
        assert_eq!(w.advance(), Ok(WizardStep::Attachments));
        assert_eq!(w.validation(), None);
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let mut w = SuratWizard::default();
        w.set_field(SuratField::AsalInstansi, "   ");
        assert_eq!(
            w.advance(),
            Err(WizardError::MissingField(SuratField::AsalInstansi))
        );
    }

    #[test]
    fn test_attachment_step_requires_photo() {
        let mut w = SuratWizard::default();
        w.set_field(SuratField::AsalInstansi, "Dinas A");
        w.set_field(SuratField::NomorSurat, "1/X/2024");
        w.set_field(SuratField::TujuanJabatan, "Sekretaris");
        w.advance().unwrap();
        assert_eq!(w.advance(), Err(WizardError::NoAttachment));
        assert_eq!(w.step(), WizardStep::Attachments);
    }

    #[test]
    fn test_retreat_keeps_data() {
        let mut w = filled_wizard();
        assert_eq!(w.step(), WizardStep::Review);
        assert!(w.retreat());
        assert!(w.retreat());
        assert!(w.retreat());
        assert!(!w.retreat());
        assert_eq!(w.step(), WizardStep::Metadata);
        assert_eq!(w.form().asal_instansi, "Dinas A");
        assert_eq!(w.form().sifat, "Segera");
        assert_eq!(w.attachments().len(), 1);
    }

    #[test]
    fn test_no_advance_past_review() {
        let mut w = filled_wizard();
        assert_eq!(w.advance(), Err(WizardError::AtLastStep));
        assert_eq!(w.step(), WizardStep::Review);
    }

    #[test]
    fn test_submit_only_from_review() {
        let mut w = SuratWizard::default();
        assert_eq!(w.begin_submit(), Err(WizardError::NotAtReview));
    }

    #[test]
    fn test_payload_has_nine_fields_and_photo() {
        let mut w = filled_wizard();
        w.toggle_tindakan("Untuk dihadiri");
        let payload = w.begin_submit().unwrap();
        assert_eq!(payload.fields.len(), 9);
        assert_eq!(payload.field("asal_instansi"), Some("Dinas A"));
        assert_eq!(payload.field("nomor_surat"), Some("1/X/2024"));
        assert_eq!(payload.field("tujuan_jabatan"), Some("Sekretaris"));
        assert_eq!(payload.field("keterangan"), Some("Undangan rapat"));
        assert_eq!(payload.field("perihal"), Some("Rapat"));
        assert_eq!(payload.field("disposisi_kepada"), Some("Sekretaris"));
        assert_eq!(payload.field("sifat"), Some("Segera"));
        assert_eq!(payload.field("tindakan"), Some("Untuk dihadiri"));
        assert_eq!(payload.field("catatan"), Some(""));
        assert_eq!(payload.photos.len(), 1);
        assert!(w.is_submitting());
        assert_eq!(w.begin_submit(), Err(WizardError::AlreadySubmitting));
    }

    #[test]
    fn test_failed_submit_keeps_state() {
        let mut w = filled_wizard();
        w.begin_submit().unwrap();
        let outcome = w.finish_submit(Err("Nomor surat sudah terdaftar".to_string()));
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Nomor surat sudah terdaftar".to_string()
            }
        );
        assert_eq!(w.step(), WizardStep::Review);
        assert_eq!(w.submit_error(), Some("Nomor surat sudah terdaftar"));
        assert_eq!(w.form().nomor_surat, "1/X/2024");
        assert_eq!(w.attachments().len(), 1);
        assert!(!w.is_submitting());
        // Retry is possible without re-entering anything
        assert!(w.begin_submit().is_ok());
    }

    #[test]
    fn test_successful_submit_resets_and_redirects() {
        let mut w = filled_wizard();
        w.begin_submit().unwrap();
        match w.finish_submit(Ok(())) {
            SubmitOutcome::Completed {
                redirect,
                released_previews,
                ..
            } => {
                assert_eq!(redirect, "/admin");
                assert_eq!(released_previews, vec!["scan.jpg".to_string()]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(w.step(), WizardStep::Metadata);
        assert_eq!(w.form(), &SuratForm::default());
        assert!(w.attachments().is_empty());
    }

    #[test]
    fn test_toggle_tindakan() {
        let mut form = SuratForm::default();
        form.toggle_tindakan("Untuk diketahui");
        form.toggle_tindakan("Untuk dijawab");
        form.toggle_tindakan("Untuk diketahui");
        assert_eq!(form.tindakan, vec!["Untuk dijawab".to_string()]);
    }
}
