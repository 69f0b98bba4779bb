//! Client-side state for the disposisi front-end.
//!
//! Nothing in this crate performs I/O: it holds the records fetched by the
//! `api` crate and the local UI state built on top of them.

pub mod attachments;
pub mod config;
pub mod filter;
pub mod list;
pub mod models;
pub mod pagination;
pub mod role;
pub mod wizard;

pub use attachments::{Attachment, AttachmentError, AttachmentPolicy, AttachmentSet, BatchReport};
pub use config::ClientConfig;
pub use filter::{filter_records, ListQuery, FILTER_ALL};
pub use list::{DeleteConfirmation, ListAction, ListController, Record};
pub use models::{
    AcaraStatus, DashboardStats, Disposisi, JadwalAcara, LocationSuggestion, MarkRead,
    NewJadwalAcara, NewSuratKeluar, NewUserAccount, Notification, PhotoRef, RecordId, Surat,
    SuratKeluar, SuratPatch, SuratStatus, Tamu, UserAccount,
};
pub use pagination::Pagination;
pub use role::{authorize, Access, Role, SessionUser};
pub use wizard::{
    SubmitOutcome, SuratField, SuratForm, SuratPayload, SuratWizard, WizardError, WizardStep,
};
