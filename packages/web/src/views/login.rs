use dioxus::prelude::*;

use store::Role;
use ui::views::LoginView;
use ui::use_auth;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    let auth = use_auth();

    // Already signed in: go straight home
    if let Some(role) = auth().role() {
        nav.replace(Route::home(role));
        return rsx! {};
    }

    rsx! {
        LoginView {
            on_success: move |role: Option<Role>| {
                match role {
                    Some(role) => nav.replace(Route::home(role)),
                    None => nav.replace(Route::Unauthorized {}),
                };
            },
        }
    }
}

#[component]
pub fn Unauthorized() -> Element {
    let auth = use_auth();
    let home = auth().role().map(Route::home).unwrap_or(Route::Login {});

    rsx! {
        div {
            class: "status-page",
            h1 { "Akses ditolak" }
            p { "Akun Anda tidak memiliki izin untuk membuka halaman ini." }
            Link { to: home, "Kembali" }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "status-page",
            h1 { "Halaman tidak ditemukan" }
            p { "/{path}" }
            Link { to: Route::Login {}, "Kembali" }
        }
    }
}
