//! Copying generated cards to the system clipboard.
//!
//! The clipboard takes raw RGBA pixels, so the stored bytes are decoded with
//! the `image` crate first. Writes are blocking and must run off the async
//! runtime.

use std::borrow::Cow;

use linkcard_logging::card_debug;

use crate::{ImageHandle, ImageStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("image {0} is no longer available")]
    MissingImage(ImageHandle),
    #[error("cannot decode {content_type} image: {message}")]
    Decode {
        content_type: String,
        message: String,
    },
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Decoded pixels ready for the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub trait ClipboardWriter: Send + Sync {
    fn write_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError>;
}

/// System clipboard through `arboard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArboardClipboard;

impl ClipboardWriter for ArboardClipboard {
    fn write_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        clipboard
            .set_image(arboard::ImageData {
                width: image.width,
                height: image.height,
                bytes: Cow::Borrowed(&image.rgba),
            })
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }
}

/// Re-read the image behind `handle`, decode it and hand it to `writer`.
pub fn copy_image(
    store: &ImageStore,
    handle: ImageHandle,
    writer: &dyn ClipboardWriter,
) -> Result<(), ClipboardError> {
    let stored = store
        .get(handle)
        .ok_or(ClipboardError::MissingImage(handle))?;
    let decoded = image::load_from_memory(&stored.bytes).map_err(|err| ClipboardError::Decode {
        content_type: stored.content_type.clone(),
        message: err.to_string(),
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    card_debug!(
        "Copying image {} ({}x{}, {})",
        handle,
        width,
        height,
        stored.content_type
    );
    writer.write_image(&ClipboardImage {
        width: width as usize,
        height: height as usize,
        rgba: rgba.into_raw(),
    })
}
