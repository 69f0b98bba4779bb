//! Dashboard aggregates and the server clock.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use store::DashboardStats;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Deserialize)]
struct ServerTime {
    server_time: DateTime<Utc>,
}

pub async fn stats(client: &ApiClient) -> Result<DashboardStats, ApiError> {
    client.get_json("/dashboard/stats", &["stats"]).await
}

/// Current time according to the backend.
pub async fn server_time(client: &ApiClient) -> Result<DateTime<Utc>, ApiError> {
    let time: ServerTime = client.get_json("/dashboard/server-time", &[]).await?;
    Ok(time.server_time)
}
