//! Pages of the roles that read and follow up letters without managing them.

use dioxus::prelude::*;

use store::{RecordId, Role};
use ui::views::{DashboardView, NotificationsView, SuratListView};

use crate::Route;

#[component]
fn ReaderNotifications(role: Role) -> Element {
    let nav = use_navigator();
    rsx! {
        NotificationsView {
            on_open_surat: move |_id: RecordId| {
                nav.push(Route::surat_list(role));
            },
        }
    }
}

#[component]
pub fn SekretarisDashboard() -> Element {
    rsx! {
        DashboardView { role: Role::Sekretaris }
    }
}

#[component]
pub fn SekretarisSurat() -> Element {
    rsx! {
        SuratListView { role: Role::Sekretaris }
    }
}

#[component]
pub fn SekretarisNotifikasi() -> Element {
    rsx! {
        ReaderNotifications { role: Role::Sekretaris }
    }
}

#[component]
pub fn StaffDashboard() -> Element {
    rsx! {
        DashboardView { role: Role::Staff }
    }
}

#[component]
pub fn StaffSurat() -> Element {
    rsx! {
        SuratListView { role: Role::Staff }
    }
}

#[component]
pub fn StaffNotifikasi() -> Element {
    rsx! {
        ReaderNotifications { role: Role::Staff }
    }
}

#[component]
pub fn KabidDashboard() -> Element {
    rsx! {
        DashboardView { role: Role::Kabid }
    }
}

#[component]
pub fn KabidSurat() -> Element {
    rsx! {
        SuratListView { role: Role::Kabid }
    }
}

#[component]
pub fn KabidNotifikasi() -> Element {
    rsx! {
        ReaderNotifications { role: Role::Kabid }
    }
}
