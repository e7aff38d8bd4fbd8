//! Stamp images drawn in place of the target circles.

use crate::renderer::{RenderResult, RendererError};
use std::path::Path;
use std::sync::Arc;

/// A decoded stamp, stored as straight (non-premultiplied) RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampImage {
    width: u32,
    height: u32,
    rgba: Arc<Vec<u8>>,
}

impl StampImage {
    /// Decode an encoded image (PNG, JPEG or WebP).
    pub fn from_bytes(bytes: &[u8]) -> RenderResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(RendererError::EmptyStamp);
        }
        Ok(Self {
            width,
            height,
            rgba: Arc::new(rgba.into_vec()),
        })
    }

    /// Read and decode a stamp from disk.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| RendererError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stamp = Self::from_bytes(&bytes)?;
        log::debug!(
            "Loaded stamp {} ({}x{})",
            path.display(),
            stamp.width,
            stamp.height
        );
        Ok(stamp)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    /// Pixel data, row-major, four bytes per pixel.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}
