//! Event schedule ("jadwal acara"): list, create with location suggestions,
//! activate/deactivate, delete.

use std::time::Duration;

use api::events;
use dioxus::prelude::*;
use store::{AcaraStatus, JadwalAcara, ListAction, LocationSuggestion, NewJadwalAcara, RecordId, FILTER_ALL};

use super::{DeleteConfirmDialog, ListToolbar, LoadError, ModalOverlay, PaginationBar};
use crate::auth::use_client;
use crate::components::{
    use_toast, Button, ButtonVariant, FieldError, Input, Label, Select, ToastOptions,
};
use crate::format::date_time;
use crate::icons::{FaPlus, FaToggleOff, FaToggleOn, FaTrash, FaUsers};
use crate::record_list::use_record_list;
use crate::timer::sleep;
use crate::Icon;

/// Pause after the last keystroke before asking for location suggestions.
const SUGGEST_DELAY: Duration = Duration::from_millis(350);

fn status_options() -> Vec<(String, String)> {
    vec![
        (FILTER_ALL.to_string(), "Semua status".to_string()),
        ("active".to_string(), "Aktif".to_string()),
        ("inactive".to_string(), "Nonaktif".to_string()),
    ]
}

fn validate_acara(acara: &NewJadwalAcara) -> Result<(), String> {
    if acara.nama_acara.trim().is_empty() {
        return Err("Nama acara wajib diisi".to_string());
    }
    if acara.tanggal_mulai.trim().is_empty() {
        return Err("Tanggal mulai wajib diisi".to_string());
    }
    // `datetime-local` values compare correctly as strings
    if !acara.tanggal_selesai.trim().is_empty() && acara.tanggal_selesai < acara.tanggal_mulai {
        return Err("Tanggal selesai tidak boleh sebelum tanggal mulai".to_string());
    }
    if acara.lokasi.trim().is_empty() {
        return Err("Lokasi wajib diisi".to_string());
    }
    Ok(())
}

#[component]
pub fn AcaraView(on_open_tamu: EventHandler<RecordId>) -> Element {
    let client = use_client();
    let list = use_record_list::<JadwalAcara>();
    let toast = use_toast();
    let mut controller = list.controller;
    let mut confirm = list.confirm;
    let mut show_form = use_signal(|| false);
    let mut deleting = use_signal(|| false);
    let mut toggling = use_signal(|| None::<RecordId>);

    let reload = {
        let client = client.clone();
        let list = list.clone();
        move || {
            let client = client.clone();
            list.load(async move { events::list_acara(&client).await });
        }
    };
    use_hook({
        let reload = reload.clone();
        move || reload()
    });

    let toggle = {
        let client = client.clone();
        let list = list.clone();
        move |(id, current): (RecordId, AcaraStatus)| {
            if toggling.peek().is_some() {
                return;
            }
            let client = client.clone();
            let list = list.clone();
            spawn(async move {
                toggling.set(Some(id));
                let next = current.toggled();
                match events::set_acara_status(&client, id, next).await {
                    Ok(_) => list.apply(ListAction::Patch(id, next)),
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                toggling.set(None);
            });
        }
    };

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
                match events::delete_acara(&client, id).await {
                    Ok(()) => {
                        list.apply(ListAction::Remove(id));
                        toast.success("Acara dihapus".to_string(), ToastOptions::new());
                    }
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                deleting.set(false);
            });
        }
    };

    let ctl = controller.read();
    let text = ctl.query().text.clone();
    let status = ctl
        .query()
        .filters
        .get("status")
        .cloned()
        .unwrap_or_else(|| FILTER_ALL.to_string());
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
                h1 { "Jadwal Acara" }
                Button {
                    onclick: move |_| show_form.set(true),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Tambah Acara"
                }
            }

            ListToolbar {
                query: text,
                placeholder: "Cari nama acara atau lokasi...",
                on_query: move |q: String| controller.write().set_query(q),
                Select {
                    value: status,
                    options: status_options(),
                    onchange: move |v: String| controller.write().set_filter("status", v),
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
                p { class: "muted", if list.is_loading() { "Memuat..." } else { "Belum ada acara." } }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Acara" }
                            th { "Mulai" }
                            th { "Selesai" }
                            th { "Lokasi" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for acara in rows {
                            tr {
                                key: "{acara.id}",
                                td { "{acara.nama_acara}" }
                                td { {date_time(acara.tanggal_mulai.as_deref())} }
                                td { {date_time(acara.tanggal_selesai.as_deref())} }
                                td { {acara.lokasi.clone().unwrap_or_default()} }
                                td {
                                    if acara.status == AcaraStatus::Active {
                                        span { class: "badge badge--done", "Aktif" }
                                    } else {
                                        span { class: "badge", "Nonaktif" }
                                    }
                                }
                                td {
                                    class: "table__actions",
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Buku tamu",
                                        onclick: move |_| on_open_tamu.call(acara.id),
                                        Icon { icon: FaUsers, width: 14, height: 14 }
                                    }
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Ubah status",
                                        disabled: toggling() == Some(acara.id),
                                        onclick: {
                                            let toggle = toggle.clone();
                                            move |_| toggle((acara.id, acara.status))
                                        },
                                        if acara.status == AcaraStatus::Active {
                                            Icon { icon: FaToggleOn, width: 16, height: 16 }
                                        } else {
                                            Icon { icon: FaToggleOff, width: 16, height: 16 }
                                        }
                                    }
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Hapus",
                                        onclick: move |_| confirm.write().request(acara.id),
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
            NewAcaraForm {
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
                title: "Hapus acara?",
                message: "Acara beserta buku tamunya akan dihapus permanen.",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }
    }
}

#[component]
fn NewAcaraForm(on_close: EventHandler<()>, on_created: EventHandler<()>) -> Element {
    let client = use_client();
    let toast = use_toast();
    let mut form = use_signal(NewJadwalAcara::default);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);
    let mut suggestions = use_signal(Vec::<LocationSuggestion>::new);
    // Bumped on each keystroke so stale lookups can tell they were superseded
    let mut lookup_seq = use_signal(|| 0u64);

    let on_lokasi = {
        let client = client.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            form.write().lokasi = value.clone();
            *lookup_seq.write() += 1;
            let seq = *lookup_seq.peek();
            let client = client.clone();
            spawn(async move {
                sleep(SUGGEST_DELAY).await;
                if *lookup_seq.peek() != seq {
                    return;
                }
                match events::recommend_locations(&client, &value).await {
                    Ok(found) if *lookup_seq.peek() == seq => suggestions.set(found),
                    Ok(_) => {}
                    Err(e) => tracing::debug!("location lookup failed: {}", e),
                }
            });
        }
    };

    let submit = move |_| {
        let client = client.clone();
        async move {
            let draft = form();
            if let Err(message) = validate_acara(&draft) {
                error.set(Some(message));
                return;
            }
            busy.set(true);
            error.set(None);
            match events::create_acara(&client, &draft).await {
                Ok(_) => {
                    toast.success("Acara ditambahkan".to_string(), ToastOptions::new());
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
                h2 { class: "modal-title", "Acara Baru" }
                div {
                    class: "form-field",
                    Label { html_for: "acara-nama", required: true, "Nama acara" }
                    Input {
                        id: "acara-nama",
                        value: f.nama_acara,
                        oninput: move |evt: FormEvent| form.write().nama_acara = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "acara-mulai", required: true, "Mulai" }
                    Input {
                        id: "acara-mulai",
                        r#type: "datetime-local",
                        value: f.tanggal_mulai,
                        oninput: move |evt: FormEvent| form.write().tanggal_mulai = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "acara-selesai", "Selesai" }
                    Input {
                        id: "acara-selesai",
                        r#type: "datetime-local",
                        value: f.tanggal_selesai,
                        oninput: move |evt: FormEvent| form.write().tanggal_selesai = evt.value(),
                    }
                }
                div {
                    class: "form-field form-field--suggest",
                    Label { html_for: "acara-lokasi", required: true, "Lokasi" }
                    Input {
                        id: "acara-lokasi",
                        placeholder: "Ketik untuk mencari lokasi",
                        value: f.lokasi,
                        oninput: on_lokasi,
                    }
                    if !suggestions.read().is_empty() {
                        ul {
                            class: "suggestions",
                            for place in suggestions() {
                                li {
                                    key: "{place.name}",
                                    onclick: {
                                        let name = place.name.clone();
                                        move |_| {
                                            form.write().lokasi = name.clone();
                                            suggestions.set(Vec::new());
                                        }
                                    },
                                    strong { "{place.name}" }
                                    if let Some(address) = &place.address {
                                        span { class: "muted", " {address}" }
                                    }
                                }
                            }
                        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewJadwalAcara {
        NewJadwalAcara {
            nama_acara: "Musrenbang".to_string(),
            tanggal_mulai: "2024-06-10T08:00".to_string(),
            tanggal_selesai: "2024-06-10T12:00".to_string(),
            lokasi: "Aula Bappeda".to_string(),
        }
    }

    #[test]
    fn test_validate_acara() {
        assert_eq!(validate_acara(&draft()), Ok(()));

        let mut a = draft();
        a.tanggal_selesai = "2024-06-09T08:00".to_string();
        assert!(validate_acara(&a).unwrap_err().contains("sebelum"));

        let mut a = draft();
        a.tanggal_selesai.clear();
        assert_eq!(validate_acara(&a), Ok(()));

        let mut a = draft();
        a.lokasi = "  ".to_string();
        assert_eq!(validate_acara(&a), Err("Lokasi wajib diisi".to_string()));
    }
}
