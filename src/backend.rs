//! Pixel backend trait and shared types.
//!
//! The [`CropBackend`] trait defines the three operations every backend must
//! support: decode, dimensions, and export. The geometry and session layers
//! are backend-agnostic; the production implementation is
//! [`RustBackend`](crate::rust_backend::RustBackend) built on the `image`
//! crate, and tests use the recording `MockBackend` below.

use crate::region::NaturalRect;
use thiserror::Error;

/// Errors surfaced by the crop pipeline.
///
/// Everything here is locally recoverable: the calling UI reports the
/// message inline and the session stays in (or returns to) a state the
/// user can retry from. Nothing is retried automatically.
#[derive(Error, Debug)]
pub enum CropError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The selected file could not be decoded as an image.
    #[error("not a decodable image: {0}")]
    InvalidImage(String),
    /// Export was attempted with no non-zero-area region selected.
    #[error("no crop region selected")]
    NoRegionSelected,
    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

/// Natural pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Quality setting for JPEG encoding (1-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegQuality(pub u8);

impl JpegQuality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        Self(90)
    }
}

/// Trait for pixel backends.
///
/// `Image` is the backend's decoded raster representation. The session owns
/// one per crop and drops it on cancel or after export; the trait itself is
/// stateless. Export must be deterministic: the same image, rectangle, and
/// quality always produce byte-identical output.
pub trait CropBackend {
    type Image;

    /// Decode raw file bytes into an image, or fail with
    /// [`CropError::InvalidImage`].
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, CropError>;

    /// Natural pixel dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Extract exactly `rect` from the image at 1:1 scale and encode it
    /// as JPEG. The caller guarantees `rect` lies within bounds and has
    /// nonzero area ([`geometry::to_natural`](crate::geometry::to_natural)
    /// enforces both).
    fn export_jpeg(
        &self,
        image: &Self::Image,
        rect: NaturalRect,
        quality: JpegQuality,
    ) -> Result<Vec<u8>, CropError>;
}
