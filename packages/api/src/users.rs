//! User administration endpoints (admin only).

use serde::Deserialize;
use store::{NewUserAccount, RecordId, UserAccount};

use crate::client::{Ack, ApiClient};
use crate::error::ApiError;

/// Answer of a password reset; the backend may return the temporary password.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PasswordReset {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub temporary_password: Option<String>,
}

pub async fn list_users(client: &ApiClient) -> Result<Vec<UserAccount>, ApiError> {
    client.get_json("/admin/users", &["users"]).await
}

pub async fn create_user(client: &ApiClient, user: &NewUserAccount) -> Result<Ack, ApiError> {
    client.post_json("/admin/users", user, &[]).await
}

pub async fn reset_password(client: &ApiClient, id: RecordId) -> Result<PasswordReset, ApiError> {
    client
        .post_json(&format!("/admin/users/{id}/reset-password"), &serde_json::json!({}), &[])
        .await
}

pub async fn delete_user(client: &ApiClient, id: RecordId) -> Result<(), ApiError> {
    client.delete(&format!("/admin/users/{id}")).await
}
