//! Photo attachments for the letter wizard.
//!
//! Files are checked one by one against an [`AttachmentPolicy`]; a bad file
//! is dropped with a reason and never blocks the rest of its batch. The count
//! cap is checked once per batch, before any per-file check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME types accepted for letter photos.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Default maximum size of one photo (5 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Default maximum number of photos per letter.
pub const DEFAULT_MAX_FILES: usize = 5;

/// Type, size and count limits for attachments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_allowed_types() -> Vec<String> {
    ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect()
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            allowed_types: default_allowed_types(),
            max_file_bytes: default_max_file_bytes(),
            max_files: default_max_files(),
        }
    }
}

/// Why a file or a batch was refused.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("{name}: tipe file {content_type} tidak diizinkan (hanya JPG, PNG, WEBP)")]
    UnsupportedType { name: String, content_type: String },
    #[error("{name}: ukuran file melebihi batas {max_mb} MB")]
    TooLarge { name: String, max_mb: u64 },
    #[error("Maksimal {max} foto per surat (sudah ada {existing}, ditambah {adding})")]
    TooMany {
        max: usize,
        existing: usize,
        adding: usize,
    },
}

/// A file picked by the user, already read into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl AttachmentPolicy {
    /// Check one file's type and size.
    pub fn check(&self, file: &Attachment) -> Result<(), AttachmentError> {
        let content_type = file.content_type.to_ascii_lowercase();
        if !self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(&content_type)) {
            return Err(AttachmentError::UnsupportedType {
                name: file.name.clone(),
                content_type: file.content_type.clone(),
            });
        }
        if file.size() > self.max_file_bytes {
            return Err(AttachmentError::TooLarge {
                name: file.name.clone(),
                max_mb: self.max_file_bytes / (1024 * 1024),
            });
        }
        Ok(())
    }
}

/// Result of appending one batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    pub accepted: usize,
    pub rejected: Vec<AttachmentError>,
}

/// Accepted photos plus their locally generated previews, index-aligned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttachmentSet {
    files: Vec<Attachment>,
    previews: Vec<String>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    pub fn previews(&self) -> &[String] {
        &self.previews
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Append a batch of candidate files.
    ///
    /// When `existing + batch.len()` exceeds the cap the whole batch is
    /// refused and nothing changes. Otherwise every file is checked on its
    /// own; accepted files get a preview from `make_preview`.
    pub fn append_batch<F>(
        &mut self,
        policy: &AttachmentPolicy,
        batch: Vec<Attachment>,
        mut make_preview: F,
    ) -> Result<BatchReport, AttachmentError>
    where
        F: FnMut(&Attachment) -> String,
    {
        let existing = self.files.len();
        let adding = batch.len();
        if existing + adding > policy.max_files {
            return Err(AttachmentError::TooMany {
                max: policy.max_files,
                existing,
                adding,
            });
        }

        let mut report = BatchReport::default();
        for file in batch {
            match policy.check(&file) {
                Ok(()) => {
                    self.previews.push(make_preview(&file));
                    self.files.push(file);
                    report.accepted += 1;
                }
                Err(e) => report.rejected.push(e),
            }
        }
        Ok(report)
    }

    /// Remove the file and its preview at `index`, returning the preview so
    /// the caller can release it.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.files.len() {
            return None;
        }
        self.files.remove(index);
        Some(self.previews.remove(index))
    }

    /// Drop everything, returning the previews to release.
    pub fn clear(&mut self) -> Vec<String> {
        self.files.clear();
        std::mem::take(&mut self.previews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(name: &str, size: usize) -> Attachment {
        Attachment::new(name, "image/jpeg", vec![0u8; size])
    }

    fn preview(file: &Attachment) -> String {
        format!("blob:{}", file.name)
    }

    #[test]
    fn test_rejected_file_does_not_block_batch() {
        let policy = AttachmentPolicy::default();
        let mut set = AttachmentSet::new();
        let batch = vec![
            jpeg("a.jpg", 10),
            Attachment::new("b.pdf", "application/pdf", vec![1, 2, 3]),
            jpeg("c.jpg", (DEFAULT_MAX_FILE_BYTES + 1) as usize),
            Attachment::new("d.png", "image/png", vec![1]),
        ];
        let report = set.append_batch(&policy, batch, preview).unwrap();
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(report.rejected[0], AttachmentError::UnsupportedType { .. }));
        assert!(matches!(report.rejected[1], AttachmentError::TooLarge { max_mb: 5, .. }));
        assert_eq!(set.previews(), &["blob:a.jpg".to_string(), "blob:d.png".to_string()]);
    }

    #[test]
    fn test_cap_rejects_whole_batch() {
        let policy = AttachmentPolicy {
            max_files: 3,
            ..Default::default()
        };
        let mut set = AttachmentSet::new();
        set.append_batch(&policy, vec![jpeg("1.jpg", 1), jpeg("2.jpg", 1)], preview)
            .unwrap();

        let err = set
            .append_batch(&policy, vec![jpeg("3.jpg", 1), jpeg("4.jpg", 1)], preview)
            .unwrap_err();
        assert_eq!(
            err,
            AttachmentError::TooMany {
                max: 3,
                existing: 2,
                adding: 2
            }
        );
        assert_eq!(set.len(), 2);

        let report = set
            .append_batch(&policy, vec![jpeg("3.jpg", 1)], preview)
            .unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_remove_keeps_previews_aligned() {
        let policy = AttachmentPolicy::default();
        let mut set = AttachmentSet::new();
        set.append_batch(
            &policy,
            vec![jpeg("a.jpg", 1), jpeg("b.jpg", 1), jpeg("c.jpg", 1)],
            preview,
        )
        .unwrap();

        assert_eq!(set.remove(1).as_deref(), Some("blob:b.jpg"));
        let names: Vec<&str> = set.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "c.jpg"]);
        assert_eq!(set.previews(), &["blob:a.jpg".to_string(), "blob:c.jpg".to_string()]);
        assert_eq!(set.remove(5), None);
    }

    #[test]
    fn test_two_megabyte_jpeg_is_accepted() {
        let policy = AttachmentPolicy::default();
        assert!(policy.check(&jpeg("scan.jpg", 2 * 1024 * 1024)).is_ok());
        assert!(policy
            .check(&Attachment::new("scan.JPG", "IMAGE/JPEG", vec![0]))
            .is_ok());
    }
}
