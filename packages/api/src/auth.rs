//! Authentication endpoints.

use serde::{Deserialize, Serialize};
use store::SessionUser;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of a successful `POST /auth/login`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
    client.post_json("/auth/login", credentials, &[]).await
}

/// The user owning the client's current token.
pub async fn me(client: &ApiClient) -> Result<SessionUser, ApiError> {
    client.get_json("/auth/me", &["user"]).await
}

pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.execute(reqwest::Method::POST, "/auth/logout").await
}
