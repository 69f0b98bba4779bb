//! # Client configuration (`disposisi.toml`)
//!
//! UI-side knobs that do not belong to the backend: table page sizes and the
//! attachment policy used by the letter wizard.
//!
//! ```toml
//! [lists]
//! page_size = 10
//!
//! [attachments]
//! max_files = 5
//! max_file_bytes = 5242880
//! allowed_types = ["image/jpeg", "image/jpg", "image/png", "image/webp"]
//! ```
//!
//! Every section has defaults, so a missing or empty file is equivalent to
//! [`ClientConfig::default`].

use serde::{Deserialize, Serialize};

use crate::attachments::AttachmentPolicy;

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub attachments: AttachmentPolicy,
}

/// Table settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListsConfig {
    /// Rows per page in every paginated table.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    10
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl ClientConfig {
    /// Builder method to set the table page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.lists.page_size = page_size;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "disposisi.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
