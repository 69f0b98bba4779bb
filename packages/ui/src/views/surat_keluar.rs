//! Outgoing letters: table, create form and delete.

use api::surat;
use dioxus::prelude::*;
use store::{ListAction, NewSuratKeluar, SuratKeluar};

use super::{DeleteConfirmDialog, ListToolbar, LoadError, ModalOverlay, PaginationBar};
use crate::auth::use_client;
use crate::components::{use_toast, Button, ButtonVariant, FieldError, Input, Label, ToastOptions};
use crate::format::short_date;
use crate::icons::{FaPlus, FaTrash};
use crate::record_list::use_record_list;
use crate::Icon;

/// First missing required field of an outgoing letter.
fn missing_field(s: &NewSuratKeluar) -> Option<&'static str> {
    [
        (s.nomor_surat.as_str(), "Nomor surat"),
        (s.tujuan.as_str(), "Tujuan"),
        (s.perihal.as_str(), "Perihal"),
        (s.tanggal.as_str(), "Tanggal"),
    ]
    .into_iter()
    .find(|(v, _)| v.trim().is_empty())
    .map(|(_, label)| label)
}

#[component]
pub fn SuratKeluarView() -> Element {
    let client = use_client();
    let list = use_record_list::<SuratKeluar>();
    let toast = use_toast();
    let mut controller = list.controller;
    let mut confirm = list.confirm;
    let mut show_form = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let reload = {
        let client = client.clone();
        let list = list.clone();
        move || {
            let client = client.clone();
            list.load(async move { surat::list_surat_keluar(&client).await });
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
                match surat::delete_surat_keluar(&client, id).await {
                    Ok(()) => {
                        list.apply(ListAction::Remove(id));
                        toast.success("Surat keluar dihapus".to_string(), ToastOptions::new());
                    }
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                deleting.set(false);
            });
        }
    };

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
                h1 { "Surat Keluar" }
                Button {
                    onclick: move |_| show_form.set(true),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Tambah"
                }
            }

            ListToolbar {
                query: text,
                placeholder: "Cari nomor, tujuan, perihal...",
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
                p { class: "muted", if list.is_loading() { "Memuat..." } else { "Belum ada surat keluar." } }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "No. Surat" }
                            th { "Tujuan" }
                            th { "Perihal" }
                            th { "Tanggal" }
                            th { "" }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr {
                                key: "{row.id}",
                                td { {row.nomor_surat.clone().unwrap_or_default()} }
                                td { {row.tujuan.clone().unwrap_or_default()} }
                                td { {row.perihal.clone().unwrap_or_default()} }
                                td { {short_date(row.tanggal.as_deref())} }
                                td {
                                    class: "table__actions",
                                    if let Some(url) = row.file_url.clone() {
                                        a { href: "{url}", target: "_blank", "Berkas" }
                                    }
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Hapus",
                                        onclick: move |_| confirm.write().request(row.id),
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

        if show_form() {
            SuratKeluarForm {
                on_close: move |_| show_form.set(false),
                on_created: {
                    let reload = reload.clone();
                    move |_| {
                        show_form.set(false);
                        reload();
                    }
                },
            }
        }

        if confirm.read().is_open() {
            DeleteConfirmDialog {
                title: "Hapus surat keluar?",
                message: "Data surat keluar akan dihapus permanen.",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }
    }
}

#[component]
fn SuratKeluarForm(on_close: EventHandler<()>, on_created: EventHandler<()>) -> Element {
    let client = use_client();
    let toast = use_toast();
    let mut form = use_signal(NewSuratKeluar::default);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let client = client.clone();
        async move {
            let draft = form();
            if let Some(label) = missing_field(&draft) {
                error.set(Some(format!("{label} wajib diisi")));
                return;
            }
            busy.set(true);
            error.set(None);
            match surat::create_surat_keluar(&client, &draft).await {
                Ok(_) => {
                    toast.success("Surat keluar ditambahkan".to_string(), ToastOptions::new());
                    on_created.call(());
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        }
    };

    let f = form();
    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "Surat Keluar Baru" }
                div {
                    class: "form-field",
                    Label { html_for: "sk-nomor", required: true, "Nomor surat" }
                    Input {
                        id: "sk-nomor",
                        value: f.nomor_surat,
                        oninput: move |evt: FormEvent| form.write().nomor_surat = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "sk-tujuan", required: true, "Tujuan" }
                    Input {
                        id: "sk-tujuan",
                        value: f.tujuan,
                        oninput: move |evt: FormEvent| form.write().tujuan = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "sk-perihal", required: true, "Perihal" }
                    Input {
                        id: "sk-perihal",
                        value: f.perihal,
                        oninput: move |evt: FormEvent| form.write().perihal = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "sk-tanggal", required: true, "Tanggal" }
                    Input {
                        id: "sk-tanggal",
                        r#type: "date",
                        value: f.tanggal,
                        oninput: move |evt: FormEvent| form.write().tanggal = evt.value(),
                    }
                }
                FieldError { message: error() }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Batal"
                    }
                    Button {
                        disabled: busy(),
                        onclick: submit,
                        if busy() { "Menyimpan..." } else { "Simpan" }
                    }
                }
            }
        }
    }
}
