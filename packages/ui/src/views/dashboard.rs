use dioxus::prelude::*;
use store::{DashboardStats, Role};

use super::LoadError;
use crate::auth::{use_auth, use_client};
use crate::icons::{FaBell, FaCircleCheck, FaEnvelope, FaHourglassStart, FaUsers};
use crate::Icon;

/// Landing page of each role: greeting plus aggregate counters.
#[component]
pub fn DashboardView(role: Role) -> Element {
    let client = use_client();
    let auth = use_auth();
    let mut stats = use_resource(move || {
        let client = client.clone();
        async move { api::dashboard::stats(&client).await }
    });

    let name = auth().user.map(|u| u.name).unwrap_or_default();

    let body = match &*stats.read() {
        None => rsx! { p { class: "muted", "Memuat ringkasan..." } },
        Some(Err(e)) => rsx! {
            LoadError {
                message: e.user_message(),
                on_retry: move |_| stats.restart(),
            }
        },
        Some(Ok(s)) => rsx! { StatCards { role: role, stats: s.clone() } },
    };

    rsx! {
        section {
            class: "page",
            header {
                class: "page__header",
                h1 { "Selamat datang, {name}" }
                p { class: "muted", "Dashboard {role.label()}" }
            }
            {body}
        }
    }
}

#[component]
fn StatCards(role: Role, stats: DashboardStats) -> Element {
    rsx! {
        div {
            class: "stat-grid",
            div {
                class: "stat-card",
                Icon { icon: FaEnvelope, width: 20, height: 20 }
                span { class: "stat-card__value", "{stats.total_surat}" }
                span { class: "stat-card__label", "Total surat" }
            }
            div {
                class: "stat-card stat-card--pending",
                Icon { icon: FaHourglassStart, width: 20, height: 20 }
                span { class: "stat-card__value", "{stats.pending}" }
                span { class: "stat-card__label", "Menunggu" }
            }
            div {
                class: "stat-card stat-card--done",
                Icon { icon: FaCircleCheck, width: 20, height: 20 }
                span { class: "stat-card__value", "{stats.processed}" }
                span { class: "stat-card__label", "Diproses" }
            }
            div {
                class: "stat-card",
                Icon { icon: FaBell, width: 20, height: 20 }
                span { class: "stat-card__value", "{stats.unread_notifications}" }
                span { class: "stat-card__label", "Notifikasi belum dibaca" }
            }
            if role == Role::Admin {
                div {
                    class: "stat-card",
                    Icon { icon: FaUsers, width: 20, height: 20 }
                    span { class: "stat-card__value", "{stats.total_users}" }
                    span { class: "stat-card__label", "Pengguna" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DashboardStats {
        DashboardStats {
            total_surat: 7,
            pending: 3,
            processed: 4,
            total_users: 12,
            unread_notifications: 2,
        }
    }

    #[test]
    fn test_stat_cards_render_counters() {
        let html = dioxus_ssr::render_element(rsx! { StatCards { role: Role::Kabid, stats: stats() } });
        assert!(html.contains("Menunggu"));
        assert!(html.contains("stat-card--pending"));
        assert!(html.contains("<svg"));
        assert!(!html.contains("Pengguna"));
    }

    #[test]
    fn test_user_count_only_for_admin() {
        let html = dioxus_ssr::render_element(rsx! { StatCards { role: Role::Admin, stats: stats() } });
        assert!(html.contains("Pengguna"));
        assert!(html.contains(">12<"));
    }
}
