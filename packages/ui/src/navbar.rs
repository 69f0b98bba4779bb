use dioxus::prelude::*;
use store::Role;

use crate::auth::{use_auth, LogoutButton};
use crate::icons::FaEnvelopeOpenText;
use crate::{Icon, ServerClock};

/// Top bar of every role layout. Navigation links come in as children.
#[component]
pub fn Navbar(role: Role, on_logout: EventHandler<()>, children: Element) -> Element {
    let auth = use_auth();
    let name = auth()
        .user
        .map(|u| u.name)
        .unwrap_or_default();

    rsx! {
        nav {
            class: "navbar",
            div {
                class: "navbar__brand",
                Icon { icon: FaEnvelopeOpenText, width: 18, height: 18 }
                span { "Disposisi Surat" }
                span { class: "navbar__role", "{role.label()}" }
            }
            div {
                class: "navbar__links",
                {children}
            }
            div {
                class: "navbar__session",
                ServerClock {}
                span { class: "navbar__user", "{name}" }
                LogoutButton {
                    on_logout: move |_| on_logout.call(()),
                }
            }
        }
    }
}
