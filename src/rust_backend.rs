//! Pure Rust pixel backend — no system dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Sub-rectangle extract | `image::DynamicImage::crop_imm` (1:1, no resampling) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (fixed quality, deterministic) |

use crate::backend::{CropBackend, CropError, Dimensions, JpegQuality};
use crate::region::NaturalRect;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in and known to work.
///
/// Kept in sync with the `image` feature list in Cargo.toml; filtered
/// through `reading_enabled()` at runtime so a trimmed feature set shrinks
/// the table rather than silently failing at decode time.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders
/// compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode an image file from disk. CLI convenience; the upload
    /// path hands bytes straight to [`CropBackend::decode`].
    pub fn decode_file(&self, path: &Path) -> Result<DynamicImage, CropError> {
        let bytes = std::fs::read(path).map_err(CropError::Io)?;
        self.decode(&bytes)
    }

    /// Read natural dimensions from the image header without a full decode.
    pub fn identify(&self, bytes: &[u8]) -> Result<Dimensions, CropError> {
        let (width, height) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(CropError::Io)?
            .into_dimensions()
            .map_err(|e| CropError::InvalidImage(e.to_string()))?;
        Ok(Dimensions { width, height })
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CropBackend for RustBackend {
    type Image = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, CropError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(CropError::Io)?
            .decode()
            .map_err(|e| CropError::InvalidImage(e.to_string()))
    }

    fn dimensions(&self, image: &Self::Image) -> Dimensions {
        Dimensions {
            width: image.width(),
            height: image.height(),
        }
    }

    fn export_jpeg(
        &self,
        image: &Self::Image,
        rect: NaturalRect,
        quality: JpegQuality,
    ) -> Result<Vec<u8>, CropError> {
        // crop_imm copies exactly the requested rectangle; no resampling.
        let cropped = image
            .crop_imm(rect.x, rect.y, rect.width, rect.height)
            .to_rgb8();

        let mut out = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut out), quality.value())
            .write_image(
                cropped.as_raw(),
                cropped.width(),
                cropped.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| CropError::Encode(e.to_string()))?;
        Ok(out)
    }
}
