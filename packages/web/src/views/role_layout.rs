use dioxus::prelude::*;

use store::{authorize, Access, Role};
use ui::{use_auth, Navbar};

use crate::Route;

/// Wraps every page of one role: checks access, then renders the navbar
/// and the routed page.
#[component]
fn RoleGate(role: Role, links: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    if state.loading {
        return rsx! {
            div {
                class: "status-page",
                p { "Memeriksa sesi..." }
            }
        };
    }

    match authorize(state.user.as_ref(), role) {
        Access::Granted => rsx! {
            Navbar {
                role,
                on_logout: move |_| {
                    nav.replace(Route::Login {});
                },
                {links}
            }
            main {
                class: "page",
                Outlet::<Route> {}
            }
        },
        Access::Login => {
            nav.replace(Route::Login {});
            rsx! {}
        }
        Access::Unauthorized => {
            tracing::warn!("{} page refused for {:?}", role.label(), state.role());
            nav.replace(Route::Unauthorized {});
            rsx! {}
        }
    }
}

#[component]
pub fn AdminLayout() -> Element {
    rsx! {
        RoleGate {
            role: Role::Admin,
            links: rsx! {
                Link { to: Route::AdminDashboard {}, active_class: "active", "Dashboard" }
                Link { to: Route::AdminSurat {}, active_class: "active", "Surat Masuk" }
                Link { to: Route::AdminSuratKeluar {}, active_class: "active", "Surat Keluar" }
                Link { to: Route::AdminAcara {}, active_class: "active", "Jadwal Acara" }
                Link { to: Route::AdminUsers {}, active_class: "active", "Pengguna" }
                Link { to: Route::AdminNotifikasi {}, active_class: "active", "Notifikasi" }
            },
        }
    }
}

#[component]
pub fn SekretarisLayout() -> Element {
    rsx! {
        RoleGate {
            role: Role::Sekretaris,
            links: rsx! {
                Link { to: Route::SekretarisDashboard {}, active_class: "active", "Dashboard" }
                Link { to: Route::SekretarisSurat {}, active_class: "active", "Surat Masuk" }
                Link { to: Route::SekretarisNotifikasi {}, active_class: "active", "Notifikasi" }
            },
        }
    }
}

#[component]
pub fn StaffLayout() -> Element {
    rsx! {
        RoleGate {
            role: Role::Staff,
            links: rsx! {
                Link { to: Route::StaffDashboard {}, active_class: "active", "Dashboard" }
                Link { to: Route::StaffSurat {}, active_class: "active", "Surat" }
                Link { to: Route::StaffNotifikasi {}, active_class: "active", "Notifikasi" }
            },
        }
    }
}

#[component]
pub fn KabidLayout() -> Element {
    rsx! {
        RoleGate {
            role: Role::Kabid,
            links: rsx! {
                Link { to: Route::KabidDashboard {}, active_class: "active", "Dashboard" }
                Link { to: Route::KabidSurat {}, active_class: "active", "Disposisi" }
                Link { to: Route::KabidNotifikasi {}, active_class: "active", "Notifikasi" }
            },
        }
    }
}
