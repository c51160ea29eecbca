// SPDX-License-Identifier: MPL-2.0
//! Decoding the selected file into an on-screen preview.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;

/// Decoded preview of the selected file.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

/// Decodes `bytes` into RGBA.
///
/// # Errors
///
/// Returns [`Error::Io`] when the bytes are not a format the `image` crate
/// understands (e.g. SVG). The file can still be submitted.
pub fn decode_preview(bytes: &[u8]) -> Result<PreviewImage> {
    let decoded = image_rs::load_from_memory(bytes).map_err(|err| Error::Io(err.to_string()))?;
    let (width, height) = decoded.dimensions();
    let pixels = decoded.into_rgba8().into_vec();
    Ok(PreviewImage {
        handle: image::Handle::from_rgba(width, height, pixels),
        width,
        height,
    })
}

/// Decodes on the blocking pool so large photos do not stall the executor.
pub async fn decode_preview_async(bytes: Vec<u8>) -> Result<PreviewImage> {
    tokio::task::spawn_blocking(move || decode_preview(&bytes))
        .await
        .map_err(|err| Error::Io(err.to_string()))?
}
