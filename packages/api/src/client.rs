//! # REST client wrapper
//!
//! [`ApiClient`] is the single place that talks HTTP. It attaches the bearer
//! token to every request, turns non-2xx answers into
//! [`ApiError::Server`](crate::ApiError::Server) with the body's
//! `error`/`message` text, and decodes success bodies whether they are bare or
//! wrapped in a `data` (or domain-specific) field.
//!
//! The token lives behind a shared lock so every clone of a client sees the
//! same session; [`crate::session::SessionContext`] is the only writer.

use std::sync::{Arc, RwLock};

use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Authenticated JSON/multipart client for the disposisi backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Absolute URL for an API path such as `/surat-masuk`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the bearer token attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and fail on non-2xx statuses.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(ApiError::from_transport)?;
        let method = request.method().clone();
        let url = request.url().to_string();
        tracing::debug!("{} {}", method, url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| {
                let err = ApiError::from_transport(e);
                tracing::warn!("{} {} failed: {}", method, url, err);
                err
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        tracing::warn!("{} {} -> {}", method, url, err);
        Err(err)
    }

    /// Send and decode the body, unwrapping `keys` then `data` if present.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        keys: &[&str],
    ) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        let text = response.text().await.map_err(ApiError::from_transport)?;
        decode_body(&text, keys)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, keys: &[&str]) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, path), keys).await
    }

    pub async fn get_json_query<T, Q>(&self, path: &str, query: &Q, keys: &[&str]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send_json(self.request(Method::GET, path).query(query), keys)
            .await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B, keys: &[&str]) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).json(body), keys)
            .await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B, keys: &[&str]) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::PUT, path).json(body), keys)
            .await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
        keys: &[&str],
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::POST, path).multipart(form), keys)
            .await
    }

    /// Fire a request whose success body is irrelevant.
    pub async fn execute(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.send(self.request(method, path)).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path).await
    }
}

/// `{ "message": ... }` acknowledgement returned by mutating endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Decode a success body, trying each wrapper key, then `data`, then the bare body.
pub(crate) fn decode_body<T: DeserializeOwned>(text: &str, keys: &[&str]) -> Result<T, ApiError> {
    let value: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text)
            .map_err(|e| ApiError::Client(format!("invalid response body: {e}")))?
    };

    for key in keys.iter().chain(std::iter::once(&"data")) {
        if let Some(inner) = value.get(*key) {
            if let Ok(decoded) = T::deserialize(inner) {
                return Ok(decoded);
            }
        }
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::Client(format!("unexpected response shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::UserAccount;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.url("/surat-masuk"), "http://localhost:5000/api/surat-masuk");
        assert_eq!(client.url("admin/users"), "http://localhost:5000/api/admin/users");
    }

    #[test]
    fn test_token_is_shared_between_clones() {
        let client = ApiClient::new("http://localhost");
        let clone = client.clone();
        client.set_token(Some("abc".to_string()));
        assert_eq!(clone.token().as_deref(), Some("abc"));
        clone.set_token(None);
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_decode_wrapped_and_bare() {
        let wrapped: Vec<u32> = decode_body(r#"{"data": [1, 2]}"#, &[]).unwrap();
        assert_eq!(wrapped, vec![1, 2]);
        let bare: Vec<u32> = decode_body("[3]", &[]).unwrap();
        assert_eq!(bare, vec![3]);
        let keyed: Vec<UserAccount> = decode_body(
            r#"{"users": [{"id": 1, "name": "Ani", "email": "ani@x.id", "role": "staff"}]}"#,
            &["users"],
        )
        .unwrap();
        assert_eq!(keyed[0].name, "Ani");
    }

    #[test]
    fn test_decode_empty_body_as_ack() {
        let ack: Option<Ack> = decode_body("", &[]).unwrap();
        assert_eq!(ack, None);
    }

    #[test]
    fn test_decode_garbage_is_client_error() {
        let err = decode_body::<Vec<u32>>("<html>", &[]).unwrap_err();
        assert!(matches!(err, ApiError::Client(_)));
    }
}
