use dioxus::prelude::*;

use store::{RecordId, Role};
use ui::views::{
    AcaraView, DashboardView, NotificationsView, SuratKeluarView, SuratListView, SuratWizardView,
    TamuView, UsersView,
};

use crate::Route;

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        DashboardView { role: Role::Admin }
    }
}

#[component]
pub fn AdminSurat() -> Element {
    let nav = use_navigator();
    rsx! {
        SuratListView {
            role: Role::Admin,
            on_create: move |_| {
                nav.push(Route::AdminSuratBaru {});
            },
        }
    }
}

#[component]
pub fn AdminSuratBaru() -> Element {
    let nav = use_navigator();
    rsx! {
        SuratWizardView {
            on_done: move |redirect: String| {
                let target = redirect.parse::<Route>().unwrap_or(Route::AdminDashboard {});
                nav.replace(target);
            },
            on_cancel: move |_| {
                nav.push(Route::AdminSurat {});
            },
        }
    }
}

#[component]
pub fn AdminSuratKeluar() -> Element {
    rsx! {
        SuratKeluarView {}
    }
}

#[component]
pub fn AdminUsers() -> Element {
    rsx! {
        UsersView {}
    }
}

#[component]
pub fn AdminAcara() -> Element {
    let nav = use_navigator();
    rsx! {
        AcaraView {
            on_open_tamu: move |id: RecordId| {
                nav.push(Route::AdminTamu { id });
            },
        }
    }
}

#[component]
pub fn AdminTamu(id: RecordId) -> Element {
    let nav = use_navigator();
    rsx! {
        TamuView {
            acara_id: id,
            on_back: move |_| {
                nav.push(Route::AdminAcara {});
            },
        }
    }
}

#[component]
pub fn AdminNotifikasi() -> Element {
    let nav = use_navigator();
    rsx! {
        NotificationsView {
            on_open_surat: move |_id: RecordId| {
                nav.push(Route::surat_list(Role::Admin));
            },
        }
    }
}
