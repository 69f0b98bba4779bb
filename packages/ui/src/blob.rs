//! In-memory files on their way to the screen or the disk.
//!
//! The browser gets object URLs: previews of picked photos, and downloads via
//! a temporary anchor that is clicked and then revoked. Native builds write
//! downloads into the user's download directory.

use api::Download;

/// Object URL for `bytes`, or `None` where the platform has no such thing.
#[cfg(target_arch = "wasm32")]
pub fn object_url(bytes: &[u8], content_type: &str) -> Option<String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn object_url(_bytes: &[u8], _content_type: &str) -> Option<String> {
    None
}

/// Release an object URL created by [`object_url`]. Other strings are ignored.
pub fn revoke_object_url(url: &str) {
    if !url.starts_with("blob:") {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    if web_sys::Url::revoke_object_url(url).is_err() {
        tracing::warn!("could not revoke {}", url);
    }
}

/// Strip anything that would let a server-sent name escape the target directory.
pub fn safe_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.');
    if base.is_empty() {
        "download".to_string()
    } else {
        base.to_string()
    }
}

/// Hand a finished download to the user. Returns where it went.
#[cfg(target_arch = "wasm32")]
pub fn save_download(download: &Download) -> Result<String, String> {
    use wasm_bindgen::JsCast;

    let filename = safe_filename(&download.filename);
    let url = object_url(&download.bytes, &download.content_type)
        .ok_or_else(|| "browser refused to create the file".to_string())?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "could not create link".to_string())?
        .dyn_into()
        .map_err(|_| "could not create link".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(&filename);
    match document.body() {
        Some(body) => {
            let _ = body.append_child(&anchor);
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
        None => anchor.click(),
    }
    revoke_object_url(&url);
    Ok(filename)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_download(download: &Download) -> Result<String, String> {
    let dir = dirs::download_dir().unwrap_or_else(std::env::temp_dir);
    let path = dir.join(safe_filename(&download.filename));
    std::fs::write(&path, &download.bytes).map_err(|e| e.to_string())?;
    tracing::info!("saved {}", path.display());
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("disposisi-3.pdf"), "disposisi-3.pdf");
        assert_eq!(safe_filename("../../etc/passwd"), "passwd");
        assert_eq!(safe_filename(r"C:\temp\surat.pdf"), "surat.pdf");
        assert_eq!(safe_filename(".hidden"), "hidden");
        assert_eq!(safe_filename("dir/"), "download");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_has_no_object_urls() {
        assert_eq!(object_url(b"x", "image/png"), None);
        revoke_object_url("local:scan.jpg");
    }
}
