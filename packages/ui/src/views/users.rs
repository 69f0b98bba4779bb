//! User administration: list, create, reset password, delete.

use api::users;
use dioxus::prelude::*;
use store::{ListAction, NewUserAccount, RecordId, Role, UserAccount, FILTER_ALL};

use super::{DeleteConfirmDialog, ListToolbar, LoadError, ModalOverlay, PaginationBar};
use crate::auth::{use_auth, use_client};
use crate::components::{
    use_toast, Button, ButtonVariant, FieldError, Input, Label, Select, ToastOptions,
};
use crate::icons::{FaKey, FaPlus, FaTrash};
use crate::record_list::use_record_list;
use crate::Icon;

fn role_options() -> Vec<(String, String)> {
    Role::ALL
        .iter()
        .map(|r| (r.as_backend_str().to_string(), r.label().to_string()))
        .collect()
}

fn role_label(raw: &str) -> String {
    Role::parse(raw)
        .map(|r| r.label().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Local checks before `POST /admin/users`; the backend validates again.
fn validate_new_user(user: &NewUserAccount) -> Result<(), String> {
    if user.name.trim().is_empty() {
        return Err("Nama wajib diisi".to_string());
    }
    let email = user.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Email tidak valid".to_string());
    }
    if user.password.chars().count() < 6 {
        return Err("Password minimal 6 karakter".to_string());
    }
    if Role::parse(&user.role).is_none() {
        return Err("Pilih peran pengguna".to_string());
    }
    Ok(())
}

#[component]
pub fn UsersView() -> Element {
    let client = use_client();
    let auth = use_auth();
    let list = use_record_list::<UserAccount>();
    let toast = use_toast();
    let mut controller = list.controller;
    let mut confirm = list.confirm;
    let mut show_form = use_signal(|| false);
    let mut deleting = use_signal(|| false);
    let mut resetting = use_signal(|| None::<RecordId>);

    let reload = {
        let client = client.clone();
        let list = list.clone();
        move || {
            let client = client.clone();
            list.load(async move { users::list_users(&client).await });
        }
    };
    use_hook({
        let reload = reload.clone();
        move || reload()
    });

    let reset = {
        let client = client.clone();
        move |id: RecordId| {
            if resetting.peek().is_some() {
                return;
            }
            let client = client.clone();
            spawn(async move {
                resetting.set(Some(id));
                match users::reset_password(&client, id).await {
                    Ok(answer) => {
                        let mut options = ToastOptions::new();
                        if let Some(pw) = answer.temporary_password {
                            options = options
                                .description(format!("Password sementara: {pw}"))
                                .duration(std::time::Duration::from_secs(15));
                        }
                        let title = answer
                            .message
                            .unwrap_or_else(|| "Password berhasil direset".to_string());
                        toast.success(title, options);
                    }
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                resetting.set(None);
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
                match users::delete_user(&client, id).await {
                    Ok(()) => {
                        list.apply(ListAction::Remove(id));
                        toast.success("Pengguna dihapus".to_string(), ToastOptions::new());
                    }
                    Err(e) => toast.error(e.user_message(), ToastOptions::new()),
                }
                deleting.set(false);
            });
        }
    };

    let own_id = auth().user.map(|u| u.id);
    let ctl = controller.read();
    let text = ctl.query().text.clone();
    let role_filter = ctl
        .query()
        .filters
        .get("role")
        .cloned()
        .unwrap_or_else(|| FILTER_ALL.to_string());
    let rows = ctl.page_items();
    let page = ctl.current_page();
    let page_count = ctl.page_count();
    let total = ctl.visible_len();
    drop(ctl);

    let mut filter_options = vec![(FILTER_ALL.to_string(), "Semua peran".to_string())];
    filter_options.extend(role_options());

    rsx! {
        section {
            class: "page",
            header {
                class: "page__header",
                h1 { "Manajemen Pengguna" }
                Button {
                    onclick: move |_| show_form.set(true),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Tambah Pengguna"
                }
            }

            ListToolbar {
                query: text,
                placeholder: "Cari nama, email, jabatan...",
                on_query: move |q: String| controller.write().set_query(q),
                Select {
                    value: role_filter,
                    options: filter_options,
                    onchange: move |v: String| controller.write().set_filter("role", v),
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
                p { class: "muted", if list.is_loading() { "Memuat..." } else { "Tidak ada pengguna yang cocok." } }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Nama" }
                            th { "Email" }
                            th { "Peran" }
                            th { "Jabatan" }
                            th { "Bidang" }
                            th { "" }
                        }
                    }
                    tbody {
                        for user in rows {
                            tr {
                                key: "{user.id}",
                                td { "{user.display_name()}" }
                                td { "{user.email}" }
                                td { {role_label(&user.role)} }
                                td { {user.jabatan.clone().unwrap_or_default()} }
                                td { {user.bidang.clone().unwrap_or_default()} }
                                td {
                                    class: "table__actions",
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Reset password",
                                        disabled: resetting().is_some(),
                                        onclick: {
                                            let reset = reset.clone();
                                            move |_| reset(user.id)
                                        },
                                        Icon { icon: FaKey, width: 14, height: 14 }
                                    }
                                    if own_id != Some(user.id) {
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Hapus",
                                            onclick: move |_| confirm.write().request(user.id),
                                            Icon { icon: FaTrash, width: 14, height: 14 }
                                        }
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
            NewUserForm {
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
                title: "Hapus pengguna?",
                message: "Akun ini tidak akan bisa masuk lagi.",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }
    }
}

#[component]
fn NewUserForm(on_close: EventHandler<()>, on_created: EventHandler<()>) -> Element {
    let client = use_client();
    let toast = use_toast();
    let mut form = use_signal(|| NewUserAccount {
        role: Role::Staff.as_backend_str().to_string(),
        ..Default::default()
    });
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let client = client.clone();
        async move {
            let draft = form();
            if let Err(message) = validate_new_user(&draft) {
                error.set(Some(message));
                return;
            }
            busy.set(true);
            error.set(None);
            let payload = NewUserAccount {
                email: draft.email.trim().to_lowercase(),
                ..draft
            };
            match users::create_user(&client, &payload).await {
                Ok(_) => {
                    toast.success("Pengguna ditambahkan".to_string(), ToastOptions::new());
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
                h2 { class: "modal-title", "Pengguna Baru" }
                div {
                    class: "form-field",
                    Label { html_for: "user-name", required: true, "Nama" }
                    Input {
                        id: "user-name",
                        value: f.name,
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "user-email", required: true, "Email" }
                    Input {
                        id: "user-email",
                        r#type: "email",
                        value: f.email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "user-password", required: true, "Password" }
                    Input {
                        id: "user-password",
                        r#type: "password",
                        value: f.password,
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "user-role", required: true, "Peran" }
                    Select {
                        id: "user-role",
                        value: f.role,
                        options: role_options(),
                        onchange: move |v: String| form.write().role = v,
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "user-jabatan", "Jabatan" }
                    Input {
                        id: "user-jabatan",
                        value: f.jabatan,
                        oninput: move |evt: FormEvent| form.write().jabatan = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "user-bidang", "Bidang" }
                    Input {
                        id: "user-bidang",
                        value: f.bidang,
                        oninput: move |evt: FormEvent| form.write().bidang = evt.value(),
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

    fn draft() -> NewUserAccount {
        NewUserAccount {
            name: "Siti".to_string(),
            email: "siti@bappeda.go.id".to_string(),
            password: "rahasia1".to_string(),
            role: "sekretaris".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_new_user() {
        assert_eq!(validate_new_user(&draft()), Ok(()));

        let mut u = draft();
        u.email = "siti".to_string();
        assert_eq!(validate_new_user(&u), Err("Email tidak valid".to_string()));

        let mut u = draft();
        u.password = "123".to_string();
        assert!(validate_new_user(&u).is_err());

        let mut u = draft();
        u.role = "root".to_string();
        assert_eq!(validate_new_user(&u), Err("Pilih peran pengguna".to_string()));
    }

    #[test]
    fn test_role_label_falls_back_to_raw() {
        assert_eq!(role_label("user"), "Kepala Bidang");
        assert_eq!(role_label("tamu"), "tamu");
    }
}
