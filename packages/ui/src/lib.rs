//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const THEME_CSS: Asset = asset!("/assets/theme.css");

mod auth;
pub use auth::{use_auth, use_client, use_session, AuthProvider, AuthState, LogoutButton};

mod navbar;
pub use navbar::Navbar;

mod server_clock;
pub use server_clock::ServerClock;

pub mod blob;
pub mod format;

mod record_list;
pub use record_list::{use_client_config, use_record_list, RecordList};

mod timer;
