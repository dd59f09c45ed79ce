//! Upload packaging for exported crops.
//!
//! The pipeline hands its JPEG bytes to the surrounding form's submission
//! logic in one of two shapes: a file-like [`UploadFile`] for multipart
//! requests, or a base64 data URL for JSON payloads. Neither conversion
//! touches pixels; bytes pass through unchanged.

use crate::backend::CropError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// MIME type of every export; the pipeline only encodes JPEG.
pub const JPEG_MIME: &str = "image/jpeg";

/// The final artifact of a crop session: encoded JPEG bytes at the
/// natural-pixel size of the crop region, plus a suggested filename.
///
/// Immutable once created. Ownership transfers to the calling form, which
/// embeds it in a submission payload or discards it on re-crop/cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOutput {
    pub bytes: Vec<u8>,
    /// Output pixel dimensions (equal to the natural-space crop rectangle).
    pub width: u32,
    pub height: u32,
    pub filename: String,
    pub mime: &'static str,
}

impl EncodedOutput {
    pub(crate) fn new(bytes: Vec<u8>, width: u32, height: u32, stem: &str) -> Self {
        Self {
            bytes,
            width,
            height,
            filename: format!("{stem}.jpg"),
            mime: JPEG_MIME,
        }
    }

    /// Render as a `data:image/jpeg;base64,...` URL for JSON submission.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }

    /// Convert into the file-like value a multipart HTTP layer expects,
    /// under an explicit field filename.
    pub fn into_upload_file(self, filename: impl Into<String>) -> UploadFile {
        UploadFile {
            bytes: self.bytes,
            filename: filename.into(),
            mime: self.mime,
        }
    }
}

/// A file-like value ready for a multipart form field: raw bytes, filename,
/// MIME type. The caller's HTTP stack does the actual request assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime: &'static str,
}

impl From<EncodedOutput> for UploadFile {
    fn from(output: EncodedOutput) -> Self {
        let filename = output.filename.clone();
        output.into_upload_file(filename)
    }
}

/// Parse a `data:<mime>;base64,<payload>` URL back into raw bytes.
///
/// The inverse of [`EncodedOutput::to_data_url`]; used when a stored
/// submission payload needs to be turned back into file bytes.
pub fn parse_data_url(url: &str) -> Result<Vec<u8>, CropError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CropError::InvalidImage("not a data URL".into()))?;
    let (_mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| CropError::InvalidImage("data URL is not base64-encoded".into()))?;
    BASE64
        .decode(payload)
        .map_err(|e| CropError::InvalidImage(format!("bad base64 payload: {e}")))
}
