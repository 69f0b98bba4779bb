//! Notification endpoints.

use store::{Notification, RecordId};

use crate::client::{Ack, ApiClient};
use crate::error::ApiError;

pub async fn list_notifications(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    client.get_json("/notifications", &["notifications"]).await
}

pub async fn mark_read(client: &ApiClient, id: RecordId) -> Result<Ack, ApiError> {
    client
        .put_json(&format!("/notifications/{id}/read"), &serde_json::json!({}), &[])
        .await
}

pub async fn mark_all_read(client: &ApiClient) -> Result<Ack, ApiError> {
    client.put_json("/notifications/read-all", &serde_json::json!({}), &[]).await
}

/// Number of unread entries in a fetched list.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
