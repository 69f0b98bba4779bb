//! Event schedule ("jadwal acara") and guestbook endpoints.

use serde::Serialize;
use store::{AcaraStatus, JadwalAcara, LocationSuggestion, NewJadwalAcara, RecordId, Tamu};

use crate::client::{Ack, ApiClient};
use crate::error::ApiError;

#[derive(Serialize)]
struct StatusBody {
    status: AcaraStatus,
}

pub async fn list_acara(client: &ApiClient) -> Result<Vec<JadwalAcara>, ApiError> {
    client.get_json("/jadwal-acara", &["acara"]).await
}

pub async fn create_acara(client: &ApiClient, acara: &NewJadwalAcara) -> Result<Ack, ApiError> {
    client.post_json("/jadwal-acara", acara, &[]).await
}

pub async fn set_acara_status(
    client: &ApiClient,
    id: RecordId,
    status: AcaraStatus,
) -> Result<Ack, ApiError> {
    client
        .put_json(&format!("/jadwal-acara/{id}/status"), &StatusBody { status }, &[])
        .await
}

pub async fn delete_acara(client: &ApiClient, id: RecordId) -> Result<(), ApiError> {
    client.delete(&format!("/jadwal-acara/{id}")).await
}

pub async fn list_tamu(client: &ApiClient, acara_id: RecordId) -> Result<Vec<Tamu>, ApiError> {
    client
        .get_json(&format!("/jadwal-acara/{acara_id}/tamu"), &["tamu"])
        .await
}

pub async fn delete_tamu(client: &ApiClient, acara_id: RecordId, tamu_id: RecordId) -> Result<(), ApiError> {
    client
        .delete(&format!("/jadwal-acara/{acara_id}/tamu/{tamu_id}"))
        .await
}

/// Location recommendations for the event form. Blank queries skip the call.
pub async fn recommend_locations(
    client: &ApiClient,
    query: &str,
) -> Result<Vec<LocationSuggestion>, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    client
        .get_json_query("/jadwal-acara/lokasi", &[("q", query)], &["lokasi"])
        .await
}
