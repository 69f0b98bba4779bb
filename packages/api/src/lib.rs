//! # API crate: REST client for the disposisi backend
//!
//! Every call the front-end makes goes through this crate. It owns no state
//! beyond the session token; records and UI state live in the `store` crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer token, JSON/multipart requests, body unwrapping |
//! | [`error`] | [`ApiError`]: server error / no response / client error |
//! | [`gateway`] | [`Gateway`]: in-flight flag that drops duplicate concurrent fetches |
//! | [`session`] | [`SessionContext`]: token persistence and the `init`/`login`/`teardown` lifecycle |
//! | [`settings`] | [`ApiSettings`]: base URL from `disposisi.toml`, env, or compile time |
//!
//! ## Endpoints
//!
//! - **Auth** ([`auth`]): `login`, `me`, `logout`
//! - **Surat** ([`surat`]): incoming letter list/detail/create/delete, outgoing letters, PDF download
//! - **Users** ([`users`]): list, create, reset password, delete
//! - **Notifications** ([`notifications`]): list, mark read, mark all read
//! - **Dashboard** ([`dashboard`]): aggregate stats, server time
//! - **Events** ([`events`]): jadwal acara CRUD, guestbook, location recommendations
//!
//! Endpoint functions take the [`ApiClient`] explicitly and return
//! `Result<_, ApiError>`; none of them panics.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod gateway;
pub mod notifications;
pub mod session;
pub mod settings;
pub mod surat;
pub mod users;

pub use client::{Ack, ApiClient};
pub use error::{ApiError, ErrorCategory};
pub use gateway::Gateway;
pub use session::{default_token_store, MemoryTokenStore, SessionContext, TokenStore};
pub use settings::ApiSettings;
pub use surat::{Download, DownloadProgress};
