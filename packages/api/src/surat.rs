//! Incoming and outgoing letter endpoints, plus the generated-PDF download.

use futures::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use store::{NewSuratKeluar, RecordId, Surat, SuratKeluar, SuratPayload};

use crate::client::{Ack, ApiClient};
use crate::error::ApiError;

/// Multipart field name carrying each photo.
pub const PHOTO_FIELD: &str = "photos";

pub async fn list_surat_masuk(client: &ApiClient) -> Result<Vec<Surat>, ApiError> {
    client.get_json("/surat-masuk", &["surat"]).await
}

pub async fn get_surat_masuk(client: &ApiClient, id: RecordId) -> Result<Surat, ApiError> {
    client
        .get_json(&format!("/surat-masuk/{id}"), &["surat"])
        .await
}

/// Build the multipart body for `POST /surat-masuk`.
pub fn surat_form(payload: &SuratPayload) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in &payload.fields {
        form = form.text(*name, value.clone());
    }
    for photo in &payload.photos {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.name.clone())
            .mime_str(&photo.content_type)
            .map_err(ApiError::from_transport)?;
        form = form.part(PHOTO_FIELD, part);
    }
    Ok(form)
}

/// Create an incoming letter with its disposition sheet and photos.
pub async fn create_surat_masuk(client: &ApiClient, payload: &SuratPayload) -> Result<Ack, ApiError> {
    let form = surat_form(payload)?;
    tracing::info!(
        "creating surat {} with {} photo(s)",
        payload.field("nomor_surat").unwrap_or_default(),
        payload.photos.len()
    );
    client.post_multipart("/surat-masuk", form, &[]).await
}

pub async fn delete_surat_masuk(client: &ApiClient, id: RecordId) -> Result<(), ApiError> {
    client.delete(&format!("/surat-masuk/{id}")).await
}

pub async fn list_surat_keluar(client: &ApiClient) -> Result<Vec<SuratKeluar>, ApiError> {
    client.get_json("/surat-keluar", &["surat"]).await
}

pub async fn create_surat_keluar(client: &ApiClient, surat: &NewSuratKeluar) -> Result<Ack, ApiError> {
    client.post_json("/surat-keluar", surat, &[]).await
}

pub async fn delete_surat_keluar(client: &ApiClient, id: RecordId) -> Result<(), ApiError> {
    client.delete(&format!("/surat-keluar/{id}")).await
}

/// Progress of a binary download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DownloadProgress {
    pub received: u64,
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Percentage complete, when the server sent a length.
    pub fn percent(&self) -> Option<u8> {
        match self.total {
            Some(0) => Some(100),
            Some(total) => Some(((self.received.min(total) * 100) / total) as u8),
            None => None,
        }
    }
}

/// A fully received file.
#[derive(Clone, Debug, PartialEq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Download the generated PDF of a letter, reporting progress per chunk.
pub async fn download_pdf<F>(client: &ApiClient, id: RecordId, mut on_progress: F) -> Result<Download, ApiError>
where
    F: FnMut(DownloadProgress),
{
    let response = client
        .send(client.request(Method::GET, &format!("/surat/{id}/pdf")))
        .await?;

    let total = response.content_length();
    let filename = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(attachment_filename)
        .unwrap_or_else(|| format!("surat-{id}.pdf"));
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/pdf")
        .to_string();

    let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
    on_progress(DownloadProgress { received: 0, total });

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::from_transport)?;
        bytes.extend_from_slice(&chunk);
        on_progress(DownloadProgress {
            received: bytes.len() as u64,
            total,
        });
    }

    tracing::info!("downloaded {} ({} bytes)", filename, bytes.len());
    Ok(Download {
        filename,
        content_type,
        bytes,
    })
}

/// `filename` parameter of a `Content-Disposition` header.
fn attachment_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename() {
        assert_eq!(
            attachment_filename(r#"attachment; filename="disposisi-12.pdf""#).as_deref(),
            Some("disposisi-12.pdf")
        );
        assert_eq!(
            attachment_filename("inline; filename=surat.pdf").as_deref(),
            Some("surat.pdf")
        );
        assert_eq!(attachment_filename("attachment"), None);
        assert_eq!(attachment_filename(r#"attachment; filename="""#), None);
    }

    #[test]
    fn test_progress_percent() {
        let p = DownloadProgress {
            received: 512,
            total: Some(2048),
        };
        assert_eq!(p.percent(), Some(25));
        let unknown = DownloadProgress {
            received: 10,
            total: None,
        };
        assert_eq!(unknown.percent(), None);
        let empty = DownloadProgress {
            received: 0,
            total: Some(0),
        };
        assert_eq!(empty.percent(), Some(100));
    }
}
