//! Four-step form for registering an incoming letter.

use api::surat;
use dioxus::prelude::*;
use store::wizard::{SIFAT_OPTIONS, TINDAKAN_OPTIONS};
use store::{Attachment, SubmitOutcome, SuratField, SuratWizard, WizardStep};

use crate::auth::use_client;
use crate::blob::{object_url, revoke_object_url};
use crate::components::{
    use_toast, Button, ButtonVariant, FieldError, Input, Label, Select, Textarea, ToastOptions,
};
use crate::format::file_size;
use crate::icons::{FaArrowLeft, FaArrowRight, FaPaperPlane, FaXmark};
use crate::record_list::use_client_config;
use crate::Icon;

/// Positions a letter is usually addressed to.
const JABATAN_OPTIONS: &[&str] = &[
    "Kepala Badan",
    "Sekretaris",
    "Kepala Bidang",
    "Kepala Sub Bagian",
    "Staff",
];

fn step_class(item: WizardStep, current: WizardStep) -> &'static str {
    if item == current {
        "wizard-steps__item wizard-steps__item--active"
    } else if item.index() < current.index() {
        "wizard-steps__item wizard-steps__item--done"
    } else {
        "wizard-steps__item"
    }
}

fn options(values: &[&str]) -> Vec<(String, String)> {
    values.iter().map(|v| (v.to_string(), v.to_string())).collect()
}

/// Wizard page. `on_done` receives the path to navigate to after a
/// successful submission.
#[component]
pub fn SuratWizardView(on_done: EventHandler<String>, on_cancel: EventHandler<()>) -> Element {
    let client = use_client();
    let toast = use_toast();
    let policy = use_client_config().attachments;
    let mut wizard = use_signal(move || SuratWizard::new(policy));
    let mut rejected = use_signal(Vec::<String>::new);

    // Release previews if the page is left mid-way
    use_drop(move || {
        for url in wizard.peek().attachments().previews() {
            revoke_object_url(url);
        }
    });

    let on_files = move |evt: FormEvent| async move {
        let mut batch = Vec::new();
        for file in evt.files() {
            let name = file.name();
            let content_type = file.content_type().unwrap_or_default();
            match file.read_bytes().await {
                Ok(bytes) => batch.push(Attachment::new(name, content_type, bytes.to_vec())),
                Err(e) => tracing::warn!("could not read {}: {}", name, e),
            }
        }
        if batch.is_empty() {
            return;
        }
        let result = wizard.write().add_photos(batch, |f| {
            object_url(&f.bytes, &f.content_type).unwrap_or_default()
        });
        match result {
            Ok(report) => rejected.set(report.rejected.iter().map(|e| e.to_string()).collect()),
            Err(e) => rejected.set(vec![e.to_string()]),
        }
    };

    let submit = move |_| {
        let client = client.clone();
        async move {
            let payload = match wizard.write().begin_submit() {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::debug!("submit refused: {}", e);
                    return;
                }
            };
            let result = surat::create_surat_masuk(&client, &payload)
                .await
                .map(|_| ())
                .map_err(|e| e.user_message());
            let outcome = wizard.write().finish_submit(result);
            match outcome {
                SubmitOutcome::Completed {
                    redirect,
                    toast: message,
                    released_previews,
                } => {
                    for url in &released_previews {
                        revoke_object_url(url);
                    }
                    rejected.set(Vec::new());
                    toast.success(message, ToastOptions::new());
                    on_done.call(redirect.to_string());
                }
                SubmitOutcome::Failed { message } => {
                    toast.error(message, ToastOptions::new());
                }
            }
        }
    };

    let w = wizard.read();
    let step = w.step();
    let submitting = w.is_submitting();
    let validation = w.validation().map(|e| e.to_string());
    let submit_error = w.submit_error().map(str::to_string);
    drop(w);

    let step_body = match step {
        WizardStep::Metadata => rsx! { MetadataStep { wizard: wizard } },
        WizardStep::Attachments => rsx! {
            AttachmentsStep { wizard: wizard, rejected: rejected(), on_files: on_files }
        },
        WizardStep::Disposition => rsx! { DispositionStep { wizard: wizard } },
        WizardStep::Review => rsx! { ReviewStep { wizard: wizard } },
    };

    rsx! {
        section {
            class: "page",
            header {
                class: "page__header",
                h1 { "Tambah Surat Masuk" }
            }

            ol {
                class: "wizard-steps",
                for s in WizardStep::ALL {
                    li {
                        key: "{s.index()}",
                        class: step_class(s, step),
                        "{s.title()}"
                    }
                }
            }

            div { class: "wizard-body", {step_body} }

            FieldError { message: validation }
            FieldError { message: submit_error }

            div {
                class: "wizard-actions",
                if step == WizardStep::Metadata {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Batal"
                    }
                } else {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: submitting,
                        onclick: move |_| {
                            wizard.write().retreat();
                        },
                        Icon { icon: FaArrowLeft, width: 12, height: 12 }
                        " Kembali"
                    }
                }
                if step == WizardStep::Review {
                    Button {
                        disabled: submitting,
                        onclick: submit,
                        Icon { icon: FaPaperPlane, width: 12, height: 12 }
                        if submitting { " Mengirim..." } else { " Kirim Surat" }
                    }
                } else {
                    Button {
                        onclick: move |_| {
                            let _ = wizard.write().advance();
                        },
                        "Lanjut "
                        Icon { icon: FaArrowRight, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[component]
fn TextField(
    mut wizard: Signal<SuratWizard>,
    field: SuratField,
    #[props(default)] required: bool,
    #[props(default)] placeholder: String,
) -> Element {
    let id = format!("surat-{}", field.name());
    let value = wizard.read().form().get(field).to_string();
    rsx! {
        div {
            class: "form-field",
            Label { html_for: id.clone(), required: required, "{field.label()}" }
            Input {
                id: id,
                placeholder: placeholder,
                value: value,
                oninput: move |evt: FormEvent| wizard.write().set_field(field, evt.value()),
            }
        }
    }
}

#[component]
fn AreaField(mut wizard: Signal<SuratWizard>, field: SuratField) -> Element {
    let id = format!("surat-{}", field.name());
    let value = wizard.read().form().get(field).to_string();
    rsx! {
        div {
            class: "form-field",
            Label { html_for: id.clone(), "{field.label()}" }
            Textarea {
                id: id,
                value: value,
                oninput: move |evt: FormEvent| wizard.write().set_field(field, evt.value()),
            }
        }
    }
}

#[component]
fn ChoiceField(
    mut wizard: Signal<SuratWizard>,
    field: SuratField,
    choices: &'static [&'static str],
) -> Element {
    let id = format!("surat-{}", field.name());
    let value = wizard.read().form().get(field).to_string();
    rsx! {
        div {
            class: "form-field",
            Label { html_for: id.clone(), required: true, "{field.label()}" }
            Select {
                id: id,
                value: value,
                options: options(choices),
                placeholder: "Pilih...".to_string(),
                onchange: move |v: String| wizard.write().set_field(field, v),
            }
        }
    }
}

#[component]
fn MetadataStep(wizard: Signal<SuratWizard>) -> Element {
    rsx! {
        TextField { wizard: wizard, field: SuratField::AsalInstansi, required: true, placeholder: "Dinas Pendidikan" }
        TextField { wizard: wizard, field: SuratField::NomorSurat, required: true, placeholder: "005/123/2024" }
        ChoiceField { wizard: wizard, field: SuratField::TujuanJabatan, choices: JABATAN_OPTIONS }
        AreaField { wizard: wizard, field: SuratField::Keterangan }
    }
}

#[component]
fn AttachmentsStep(
    mut wizard: Signal<SuratWizard>,
    rejected: Vec<String>,
    on_files: EventHandler<FormEvent>,
) -> Element {
    let w = wizard.read();
    let policy = w.policy().clone();
    let files: Vec<(Attachment, String)> = w
        .attachments()
        .files()
        .iter()
        .cloned()
        .zip(w.attachments().previews().iter().cloned())
        .collect();
    drop(w);
    let accept = policy.allowed_types.join(",");
    let max_mb = policy.max_file_bytes / (1024 * 1024);
    let full = files.len() >= policy.max_files;

    rsx! {
        div {
            class: "form-field",
            Label { html_for: "surat-photos", required: true, "Foto surat" }
            p {
                class: "muted",
                "JPG, PNG atau WEBP, maksimal {max_mb} MB per foto, paling banyak {policy.max_files} foto."
            }
            input {
                id: "surat-photos",
                r#type: "file",
                multiple: true,
                accept: "{accept}",
                disabled: full,
                onchange: move |evt| on_files.call(evt),
            }
        }

        if !rejected.is_empty() {
            ul {
                class: "field-error-list",
                for reason in rejected.iter() {
                    li { key: "{reason}", "{reason}" }
                }
            }
        }

        div {
            class: "photo-grid",
            for (index, (file, preview)) in files.into_iter().enumerate() {
                div {
                    key: "{index}-{file.name}",
                    class: "photo-grid__item",
                    if preview.is_empty() {
                        div { class: "photo-grid__placeholder", "{file.name}" }
                    } else {
                        img { src: "{preview}", alt: "{file.name}" }
                    }
                    span {
                        class: "photo-grid__caption",
                        {format!("{} ({})", file.name, file_size(file.size()))}
                    }
                    button {
                        class: "photo-grid__remove",
                        r#type: "button",
                        title: "Hapus foto",
                        onclick: move |_| {
                            if let Some(url) = wizard.write().remove_photo(index) {
                                revoke_object_url(&url);
                            }
                        },
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[component]
fn DispositionStep(mut wizard: Signal<SuratWizard>) -> Element {
    let selected = wizard.read().form().tindakan.clone();
    rsx! {
        TextField { wizard: wizard, field: SuratField::Perihal, required: true, placeholder: "Undangan rapat koordinasi" }
        ChoiceField { wizard: wizard, field: SuratField::DisposisiKepada, choices: JABATAN_OPTIONS }
        div {
            class: "form-field",
            Label { html_for: "surat-tindakan", "Tindakan" }
            div {
                id: "surat-tindakan",
                class: "checkbox-group",
                for tag in TINDAKAN_OPTIONS.iter().copied() {
                    label {
                        key: "{tag}",
                        class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: selected.iter().any(|t| t == tag),
                            onchange: move |_| wizard.write().toggle_tindakan(tag),
                        }
                        " {tag}"
                    }
                }
            }
        }
        ChoiceField { wizard: wizard, field: SuratField::Sifat, choices: SIFAT_OPTIONS }
        AreaField { wizard: wizard, field: SuratField::Catatan }
    }
}

#[component]
fn ReviewStep(wizard: Signal<SuratWizard>) -> Element {
    let w = wizard.read();
    let form = w.form().clone();
    let photos = w.attachments().len();
    drop(w);
    let shown = |v: &str| if v.trim().is_empty() { "-".to_string() } else { v.trim().to_string() };
    let tindakan = if form.tindakan.is_empty() {
        "-".to_string()
    } else {
        form.tindakan.join(", ")
    };

    rsx! {
        dl {
            class: "detail-grid",
            dt { "Asal instansi" } dd { {shown(&form.asal_instansi)} }
            dt { "Nomor surat" } dd { {shown(&form.nomor_surat)} }
            dt { "Tujuan jabatan" } dd { {shown(&form.tujuan_jabatan)} }
            dt { "Keterangan" } dd { {shown(&form.keterangan)} }
            dt { "Foto" } dd { "{photos} foto" }
            dt { "Perihal" } dd { {shown(&form.perihal)} }
            dt { "Disposisi kepada" } dd { {shown(&form.disposisi_kepada)} }
            dt { "Tindakan" } dd { "{tindakan}" }
            dt { "Sifat" } dd { {shown(&form.sifat)} }
            dt { "Catatan" } dd { {shown(&form.catatan)} }
        }
    }
}
