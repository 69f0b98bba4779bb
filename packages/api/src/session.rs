//! # Session context
//!
//! [`SessionContext`] is built once by whatever composes the routes and then
//! handed down (the UI puts it in a Dioxus context). It has a lifecycle:
//!
//! - [`init`](SessionContext::init) on app start: load the stored token and
//!   validate it against `/auth/me`. A rejected token is cleared.
//! - [`login`](SessionContext::login): exchange credentials for a token and
//!   persist it.
//! - [`teardown`](SessionContext::teardown) on logout: tell the backend
//!   (best effort) and forget the token.
//!
//! Token persistence goes through [`TokenStore`]: browser `localStorage` on
//! wasm, memory elsewhere.

use std::fmt;
use std::sync::{Arc, Mutex};

use store::SessionUser;

use crate::auth::{self, Credentials};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Persistence for the bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-memory token store for native builds and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Browser `localStorage` token store.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct LocalStorageTokenStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&self.key, token).is_err() {
                tracing::warn!("could not persist session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// The token store appropriate for the current target.
pub fn default_token_store(key: &str) -> Arc<dyn TokenStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(LocalStorageTokenStore::new(key))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = key;
        Arc::new(MemoryTokenStore::new())
    }
}

/// Explicitly constructed session: an API client plus token persistence.
#[derive(Clone)]
pub struct SessionContext {
    client: ApiClient,
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("base_url", &self.client.base_url())
            .field("authenticated", &self.client.token().is_some())
            .finish()
    }
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tokens, &other.tokens) && self.client.base_url() == other.client.base_url()
    }
}

impl SessionContext {
    pub fn new(client: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    /// The client every endpoint call should use.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Validate the stored token, if any.
    ///
    /// `Ok(None)` means anonymous (no token, or the backend rejected it and it
    /// was cleared). Connectivity problems are returned as errors and leave
    /// the token in place so a retry can succeed later.
    pub async fn init(&self) -> Result<Option<SessionUser>, ApiError> {
        let Some(token) = self.tokens.load() else {
            self.client.set_token(None);
            return Ok(None);
        };

        self.client.set_token(Some(token));
        match auth::me(&self.client).await {
            Ok(user) => {
                tracing::info!("session restored for {}", user.email);
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("stored token rejected, clearing session");
                self.forget();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        let credentials = Credentials {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        };
        let response = auth::login(&self.client, &credentials).await?;
        self.tokens.save(&response.token);
        self.client.set_token(Some(response.token));
        tracing::info!("logged in as {}", response.user.email);
        Ok(response.user)
    }

    /// Log out: notify the backend, then forget the token regardless.
    pub async fn teardown(&self) {
        if self.client.token().is_some() {
            if let Err(e) = auth::logout(&self.client).await {
                tracing::warn!("logout request failed: {}", e);
            }
        }
        self.forget();
    }

    fn forget(&self) {
        self.tokens.clear();
        self.client.set_token(None);
    }
}
