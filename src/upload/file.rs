// SPDX-License-Identifier: MPL-2.0
//! The file the user picked, and how its media type is declared.
//!
//! A desktop picker hands over a path, not a typed blob, so the declared media
//! type is derived from the extension. Content sniffing is left to
//! the service, which validates the upload on its side.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// Media type declared for files with an unknown extension.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Extension to media type table, lowercase extensions.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
    ("json", "application/json"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
];

/// Extensions offered by the "Images" filter of the file dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "svg",
];

/// Returns the media type declared for `path`, based on its extension.
pub fn declared_media_type<P: AsRef<Path>>(path: P) -> &'static str {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    MEDIA_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(UNKNOWN_MEDIA_TYPE, |(_, media_type)| *media_type)
}

/// True when `media_type` belongs to the `image/` category.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// File name shown to the user and sent in the multipart part.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// A picked file: name, declared media type and its bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Reads `path` without blocking the caller's executor thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(Error::from)?;
        Ok(Self::new(display_name(path), declared_media_type(path), bytes))
    }

    /// Describes `path` without reading it. Used to reject non-images
    /// before paying for the read.
    pub fn unread(path: &Path) -> Self {
        Self::new(display_name(path), declared_media_type(path), Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
