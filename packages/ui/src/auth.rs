//! Authentication context and hooks for the UI.

use api::{ApiClient, SessionContext};
use dioxus::prelude::*;
use store::{Role, SessionUser};

use crate::components::{Button, ButtonVariant};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
    /// Whether the last session check reached the backend.
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(SessionUser::role)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The session injected by [`AuthProvider`].
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// Shorthand for the session's API client.
pub fn use_client() -> ApiClient {
    use_session().client().clone()
}

/// Provider component that owns the session lifecycle.
///
/// The session is built by the app and passed in; on mount the stored token
/// is validated, and [`LogoutButton`] tears the session down.
#[component]
pub fn AuthProvider(session: SessionContext, children: Element) -> Element {
    let session = use_context_provider(|| session);
    let mut auth_state = use_context_provider(|| Signal::new(AuthState::default()));

    let _ = use_resource(move || {
        let session = session.clone();
        async move {
            match session.init().await {
                Ok(user) => auth_state.set(AuthState {
                    user,
                    loading: false,
                    online: true,
                }),
                Err(e) => {
                    tracing::warn!("session check failed: {}", e);
                    auth_state.set(AuthState {
                        user: None,
                        loading: false,
                        online: false,
                    });
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Keluar".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let mut auth_state = use_auth();
    let session = use_session();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let session = session.clone();
        async move {
            busy.set(true);
            session.teardown().await;
            let online = auth_state.peek().online;
            auth_state.set(AuthState {
                user: None,
                loading: false,
                online,
            });
            busy.set(false);
            on_logout.call(());
        }
    };

    rsx! {
        Button {
            variant: ButtonVariant::Ghost,
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
