//! Incoming letters table: search, filters, detail, PDF download, delete.

use api::{surat, DownloadProgress};
use dioxus::prelude::*;
use store::{ListAction, RecordId, Role, Surat, SuratStatus, FILTER_ALL};

use super::{DeleteConfirmDialog, ListToolbar, LoadError, ModalOverlay, PaginationBar};
use crate::auth::use_client;
use crate::blob::save_download;
use crate::components::{use_toast, Button, ButtonVariant, Select, ToastOptions};
use crate::format::{date_time, short_date};
use crate::icons::{FaEye, FaFilePdf, FaPlus, FaTrash};
use crate::record_list::use_record_list;
use crate::Icon;

fn status_options() -> Vec<(String, String)> {
    vec![
        (FILTER_ALL.to_string(), "Semua status".to_string()),
        (SuratStatus::Pending.as_str().to_string(), SuratStatus::Pending.label().to_string()),
        (
            SuratStatus::Processed.as_str().to_string(),
            SuratStatus::Processed.label().to_string(),
        ),
    ]
}

fn sifat_options() -> Vec<(String, String)> {
    std::iter::once((FILTER_ALL.to_string(), "Semua sifat".to_string()))
        .chain(
            store::wizard::SIFAT_OPTIONS
                .iter()
                .map(|s| (s.to_string(), s.to_string())),
        )
        .collect()
}

#[component]
pub fn SuratListView(
    role: Role,
    /// Shown as a "new letter" button when set.
    on_create: Option<EventHandler<()>>,
) -> Element {
    let client = use_client();
    let list = use_record_list::<Surat>();
    let toast = use_toast();
    let mut controller = list.controller;
    let mut confirm = list.confirm;
    let mut detail = use_signal(|| None::<RecordId>);
    let mut downloading = use_signal(|| None::<(RecordId, DownloadProgress)>);
    let mut deleting = use_signal(|| false);

    let reload = {
        let client = client.clone();
        let list = list.clone();
        move || {
            let client = client.clone();
            list.load(async move { surat::list_surat_masuk(&client).await });
        }
    };
    use_hook({
        let reload = reload.clone();
        move || reload()
    });

    let download = {
        let client = client.clone();
        move |id: RecordId| {
            if downloading.peek().is_some() {
                return;
            }
            let client = client.clone();
            spawn(async move {
                downloading.set(Some((id, DownloadProgress { received: 0, total: None })));
                let result = surat::download_pdf(&client, id, |p| downloading.set(Some((id, p)))).await;
                downloading.set(None);
                match result {
                    Ok(file) => match save_download(&file) {
                        Ok(saved) => toast.success(format!("PDF disimpan: {saved}"), ToastOptions::new()),
                        Err(e) => toast.error(format!("Gagal menyimpan PDF: {e}"), ToastOptions::new()),
                    },
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
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
                match surat::delete_surat_masuk(&client, id).await {
                    Ok(()) => {
                        list.apply(ListAction::Remove(id));
                        toast.success("Surat dihapus".to_string(), ToastOptions::new());
                    }
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                deleting.set(false);
            });
        }
    };

    let ctl = controller.read();
    let query = ctl.query();
    let text = query.text.clone();
    let status = query.filters.get("status").cloned().unwrap_or_else(|| FILTER_ALL.to_string());
    let sifat = query.filters.get("sifat").cloned().unwrap_or_else(|| FILTER_ALL.to_string());
    let rows = ctl.page_items();
    let page = ctl.current_page();
    let page_count = ctl.page_count();
    let total = ctl.visible_len();
    let empty = ctl.records().is_empty();
    drop(ctl);

    let can_delete = role == Role::Admin;
    let progress = downloading();

    rsx! {
        section {
            class: "page",
            header {
                class: "page__header",
                h1 { "Surat Masuk" }
                if let Some(on_create) = on_create {
                    Button {
                        onclick: move |_| on_create.call(()),
                        Icon { icon: FaPlus, width: 12, height: 12 }
                        " Tambah Surat"
                    }
                }
            }

            ListToolbar {
                query: text,
                placeholder: "Cari nomor, asal instansi, perihal...",
                on_query: move |q: String| controller.write().set_query(q),
                Select {
                    value: status,
                    options: status_options(),
                    onchange: move |v: String| controller.write().set_filter("status", v),
                }
                Select {
                    value: sifat,
                    options: sifat_options(),
                    onchange: move |v: String| controller.write().set_filter("sifat", v),
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

            if list.is_loading() && empty {
                p { class: "muted", "Memuat surat..." }
            } else if total == 0 {
                p { class: "muted", "Tidak ada surat yang cocok." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "No. Surat" }
                            th { "Asal Instansi" }
                            th { "Perihal" }
                            th { "Tujuan" }
                            th { "Status" }
                            th { "Diterima" }
                            th { "" }
                        }
                    }
                    tbody {
                        for row in rows {
                            SuratRow {
                                key: "{row.id}",
                                surat: row.clone(),
                                progress: progress.filter(|(id, _)| *id == row.id).map(|(_, p)| p),
                                download_busy: progress.is_some(),
                                can_delete: can_delete,
                                on_detail: move |id| detail.set(Some(id)),
                                on_download: download.clone(),
                                on_delete: move |id| confirm.write().request(id),
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

        if let Some(id) = detail() {
            SuratDetail { id: id, on_close: move |_| detail.set(None) }
        }

        if confirm.read().is_open() {
            DeleteConfirmDialog {
                title: "Hapus surat?",
                message: "Surat beserta lembar disposisi dan fotonya akan dihapus permanen.",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }
    }
}

#[component]
fn SuratRow(
    surat: Surat,
    progress: Option<DownloadProgress>,
    download_busy: bool,
    can_delete: bool,
    on_detail: EventHandler<RecordId>,
    on_download: EventHandler<RecordId>,
    on_delete: EventHandler<RecordId>,
) -> Element {
    let id = surat.id;
    let badge = match surat.status {
        SuratStatus::Pending => "badge badge--pending",
        SuratStatus::Processed => "badge badge--done",
    };
    let download_label = match progress {
        Some(p) => match p.percent() {
            Some(pct) => format!("{pct}%"),
            None => "...".to_string(),
        },
        None => "PDF".to_string(),
    };

    rsx! {
        tr {
            td { {surat.nomor_surat.clone().unwrap_or_else(|| "-".to_string())} }
            td { {surat.asal_instansi.clone().unwrap_or_else(|| "-".to_string())} }
            td { {surat.disposisi.perihal.clone().unwrap_or_else(|| "-".to_string())} }
            td { {surat.tujuan_jabatan.clone().unwrap_or_else(|| "-".to_string())} }
            td { span { class: badge, "{surat.status.label()}" } }
            td { {short_date(surat.created_at.as_deref())} }
            td {
                class: "table__actions",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Detail",
                    onclick: move |_| on_detail.call(id),
                    Icon { icon: FaEye, width: 14, height: 14 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Unduh PDF",
                    disabled: download_busy,
                    onclick: move |_| on_download.call(id),
                    Icon { icon: FaFilePdf, width: 14, height: 14 }
                    " {download_label}"
                }
                if can_delete {
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Hapus",
                        onclick: move |_| on_delete.call(id),
                        Icon { icon: FaTrash, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}

/// Full record with its disposition sheet and photos.
#[component]
fn SuratDetail(id: RecordId, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let mut record = use_resource(use_reactive((&id,), move |(id,)| {
        let client = client.clone();
        async move { surat::get_surat_masuk(&client, id).await }
    }));

    let body = match &*record.read() {
        None => rsx! { p { class: "muted", "Memuat detail..." } },
        Some(Err(e)) => rsx! {
            LoadError { message: e.user_message(), on_retry: move |_| record.restart() }
        },
        Some(Ok(s)) => {
            let d = &s.disposisi;
            let tindakan = if d.tindakan.is_empty() {
                "-".to_string()
            } else {
                d.tindakan.join(", ")
            };
            let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
            rsx! {
                dl {
                    class: "detail-grid",
                    dt { "Nomor surat" } dd { {or_dash(&s.nomor_surat)} }
                    dt { "Asal instansi" } dd { {or_dash(&s.asal_instansi)} }
                    dt { "Tujuan" } dd { {or_dash(&s.tujuan_jabatan)} }
                    dt { "Keterangan" } dd { {or_dash(&s.keterangan)} }
                    dt { "Status" } dd { "{s.status.label()}" }
                    dt { "Diterima" } dd { {date_time(s.created_at.as_deref())} }
                    dt { "Diproses" } dd { {date_time(s.processed_at.as_deref())} }
                }
                h3 { class: "detail-section", "Lembar Disposisi" }
                dl {
                    class: "detail-grid",
                    dt { "Perihal" } dd { {or_dash(&d.perihal)} }
                    dt { "Diteruskan kepada" } dd { {or_dash(&d.disposisi_kepada)} }
                    dt { "Tindakan" } dd { "{tindakan}" }
                    dt { "Sifat" } dd { {or_dash(&d.sifat)} }
                    dt { "Catatan" } dd { {or_dash(&d.catatan)} }
                }
                if !s.photos.is_empty() {
                    h3 { class: "detail-section", "Foto Surat" }
                    div {
                        class: "photo-grid",
                        for photo in s.photos.iter() {
                            a {
                                key: "{photo.id}",
                                href: "{photo.url}",
                                target: "_blank",
                                img { src: "{photo.url}", alt: "Foto surat" }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            wide: true,
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "Detail Surat" }
                {body}
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Tutup"
                    }
                }
            }
        }
    }
}
