//! Notification inbox shared by every role.

use api::notifications;
use dioxus::prelude::*;
use store::{ListAction, MarkRead, Notification, RecordId, FILTER_ALL};

use super::{ListToolbar, LoadError, PaginationBar};
use crate::auth::use_client;
use crate::components::{use_toast, Button, ButtonVariant, Select, ToastOptions};
use crate::format::date_time;
use crate::icons::{FaCheck, FaCheckDouble};
use crate::record_list::use_record_list;
use crate::Icon;

fn read_options() -> Vec<(String, String)> {
    vec![
        (FILTER_ALL.to_string(), "Semua".to_string()),
        ("unread".to_string(), "Belum dibaca".to_string()),
        ("read".to_string(), "Sudah dibaca".to_string()),
    ]
}

fn item_class(is_read: bool) -> &'static str {
    if is_read {
        "notification"
    } else {
        "notification notification--unread"
    }
}

/// `on_open_surat` is called for notifications that point at a letter.
#[component]
pub fn NotificationsView(on_open_surat: Option<EventHandler<RecordId>>) -> Element {
    let client = use_client();
    let list = use_record_list::<Notification>();
    let toast = use_toast();
    let mut controller = list.controller;
    let mut marking_all = use_signal(|| false);

    let reload = {
        let client = client.clone();
        let list = list.clone();
        move || {
            let client = client.clone();
            list.load(async move { notifications::list_notifications(&client).await });
        }
    };
    use_hook({
        let reload = reload.clone();
        move || reload()
    });

    let mark_one = {
        let client = client.clone();
        let list = list.clone();
        move |id: RecordId| {
            let client = client.clone();
            let list = list.clone();
            spawn(async move {
                match notifications::mark_read(&client, id).await {
                    Ok(_) => list.apply(ListAction::Patch(id, MarkRead)),
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
            });
        }
    };

    let mark_all = {
        let client = client.clone();
        let reload = reload.clone();
        move |_| {
            let client = client.clone();
            let reload = reload.clone();
            spawn(async move {
                marking_all.set(true);
                match notifications::mark_all_read(&client).await {
                    Ok(_) => {
                        toast.success("Semua notifikasi ditandai dibaca".to_string(), ToastOptions::new());
                        reload();
                    }
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                marking_all.set(false);
            });
        }
    };

    let ctl = controller.read();
    let text = ctl.query().text.clone();
    let read_filter = ctl
        .query()
        .filters
        .get("is_read")
        .cloned()
        .unwrap_or_else(|| FILTER_ALL.to_string());
    let unread = notifications::unread_count(ctl.records());
    let rows = ctl.page_items();
    let page = ctl.current_page();
    let page_count = ctl.page_count();
    let total = ctl.visible_len();
    drop(ctl);

    rsx! {
        section {
            class: "page",
            header {
                class: "page__header",
                h1 { "Notifikasi" }
                span { class: "muted", "{unread} belum dibaca" }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: unread == 0 || marking_all(),
                    onclick: mark_all,
                    Icon { icon: FaCheckDouble, width: 12, height: 12 }
                    " Tandai semua dibaca"
                }
            }

            ListToolbar {
                query: text,
                placeholder: "Cari notifikasi...",
                on_query: move |q: String| controller.write().set_query(q),
                Select {
                    value: read_filter,
                    options: read_options(),
                    onchange: move |v: String| controller.write().set_filter("is_read", v),
                }
            }

            if let Some(err) = list.error.read().as_ref() {
                LoadError {
                    message: err.user_message(),
                    on_retry: {
                        let reload = reload.clone();
                        move |_| reload()
                    },
                }
            }

            if total == 0 {
                p { class: "muted", if list.is_loading() { "Memuat..." } else { "Tidak ada notifikasi." } }
            } else {
                ul {
                    class: "notification-list",
                    for item in rows {
                        li {
                            key: "{item.id}",
                            class: item_class(item.is_read),
                            div {
                                class: "notification__body",
                                p { "{item.message}" }
                                span { class: "muted", {date_time(item.created_at.as_deref())} }
                            }
                            div {
                                class: "notification__actions",
                                if let (Some(surat_id), Some(open)) = (item.surat_id, on_open_surat) {
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        onclick: move |_| open.call(surat_id),
                                        "Lihat surat"
                                    }
                                }
                                if !item.is_read {
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Tandai dibaca",
                                        onclick: {
                                            let mark_one = mark_one.clone();
                                            move |_| mark_one(item.id)
                                        },
                                        Icon { icon: FaCheck, width: 12, height: 12 }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            PaginationBar {
                page: page,
                page_count: page_count,
                total: total,
                on_page: move |p| controller.write().set_page(p),
            }
        }
    }
}
