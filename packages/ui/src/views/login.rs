//! Email/password sign-in form.

use dioxus::prelude::*;
use store::Role;

use crate::auth::{use_auth, use_session, AuthState};
use crate::components::{Button, FieldError, Input, Label};

/// Login card. `on_success` receives the signed-in user's role (`None` for a
/// role this client does not know).
#[component]
pub fn LoginView(on_success: EventHandler<Option<Role>>) -> Element {
    let session = use_session();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let session = session.clone();
        async move {
            if email().trim().is_empty() || password().is_empty() {
                error.set(Some("Email dan password wajib diisi".to_string()));
                return;
            }
            busy.set(true);
            error.set(None);
            match session.login(&email(), &password()).await {
                Ok(user) => {
                    let role = user.role();
                    auth.set(AuthState {
                        user: Some(user),
                        loading: false,
                        online: true,
                    });
                    password.set(String::new());
                    on_success.call(role);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        }
    };

    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                h1 { class: "login-card__title", "Disposisi Surat" }
                p { class: "login-card__subtitle", "Masuk untuk melanjutkan" }

                div {
                    class: "form-field",
                    Label { html_for: "login-email", "Email" }
                    Input {
                        id: "login-email",
                        r#type: "email",
                        placeholder: "nama@instansi.go.id",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "login-password", "Password" }
                    Input {
                        id: "login-password",
                        r#type: "password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }

                FieldError { message: error() }

                Button {
                    class: "w-full",
                    disabled: busy(),
                    onclick: submit,
                    if busy() { "Memproses..." } else { "Masuk" }
                }
            }
        }
    }
}
