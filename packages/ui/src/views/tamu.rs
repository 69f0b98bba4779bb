//! Guestbook of one event.

use api::events;
use dioxus::prelude::*;
use store::{ListAction, RecordId, Tamu};

use super::{DeleteConfirmDialog, ListToolbar, LoadError, PaginationBar};
use crate::auth::use_client;
use crate::components::{use_toast, Button, ButtonVariant, ToastOptions};
use crate::format::date_time;
use crate::icons::{FaArrowLeft, FaTrash};
use crate::record_list::use_record_list;
use crate::Icon;

#[component]
pub fn TamuView(acara_id: RecordId, on_back: EventHandler<()>) -> Element {
    let client = use_client();
    let list = use_record_list::<Tamu>();
    let toast = use_toast();
    let mut controller = list.controller;
    let mut confirm = list.confirm;
    let mut deleting = use_signal(|| false);

    let acara_name = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move {
                events::list_acara(&client)
                    .await
                    .ok()
                    .and_then(|all| all.into_iter().find(|a| a.id == acara_id))
                    .map(|a| a.nama_acara)
            }
        }
    });

    let reload = {
        let client = client.clone();
        let list = list.clone();
        move || {
            let client = client.clone();
            list.load(async move { events::list_tamu(&client, acara_id).await });
        }
    };
    use_hook({
        let reload = reload.clone();
        move || reload()
    });

    let confirm_delete = {
        let client = client.clone();
        let list = list.clone();
        move |_| {
            let Some(id) = confirm.write().confirm() else {
                return;
            };
            let client = client.clone();
            let list = list.clone();
            spawn(async move {
                deleting.set(true);
                match events::delete_tamu(&client, acara_id, id).await {
                    Ok(()) => {
                        list.apply(ListAction::Remove(id));
                        toast.success("Data tamu dihapus".to_string(), ToastOptions::new());
                    }
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                deleting.set(false);
            });
        }
    };

    let title = acara_name
        .read()
        .clone()
        .flatten()
        .unwrap_or_else(|| "Buku Tamu".to_string());
    let ctl = controller.read();
    let text = ctl.query().text.clone();
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
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_back.call(()),
                    Icon { icon: FaArrowLeft, width: 12, height: 12 }
                    " Jadwal acara"
                }
                h1 { "{title}" }
                span { class: "muted", "{total} tamu" }
            }

            ListToolbar {
                query: text,
                placeholder: "Cari nama, instansi, jabatan...",
                on_query: move |q: String| controller.write().set_query(q),
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
                p { class: "muted", if list.is_loading() { "Memuat..." } else { "Belum ada tamu." } }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Nama" }
                            th { "Instansi" }
                            th { "Jabatan" }
                            th { "Hadir" }
                            th { "Foto" }
                            th { "" }
                        }
                    }
                    tbody {
                        for tamu in rows {
                            tr {
                                key: "{tamu.id}",
                                td { "{tamu.nama}" }
                                td { {tamu.instansi.clone().unwrap_or_default()} }
                                td { {tamu.jabatan.clone().unwrap_or_default()} }
                                td { {date_time(tamu.checked_in_at.as_deref())} }
                                td {
                                    if let Some(foto) = tamu.foto.clone() {
                                        a {
                                            href: "{foto}",
                                            target: "_blank",
                                            img { class: "thumb", src: "{foto}", alt: "{tamu.nama}" }
                                        }
                                    }
                                }
                                td {
                                    class: "table__actions",
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Hapus",
                                        onclick: move |_| confirm.write().request(tamu.id),
                                        Icon { icon: FaTrash, width: 14, height: 14 }
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

        if confirm.read().is_open() {
            DeleteConfirmDialog {
                title: "Hapus data tamu?",
                message: "Entri buku tamu ini akan dihapus permanen.",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }
    }
}
