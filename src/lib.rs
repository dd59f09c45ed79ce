//! # cropkit
//!
//! Crop-and-export pipeline for image uploads. Takes a raster image plus a
//! user-chosen rectangle — expressed in *display* coordinates, percentage or
//! absolute pixels — and produces a JPEG re-encoded to exactly the
//! *natural-pixel* extent of that rectangle, packaged for upload. The
//! interactive UI (an admin form with drag handles) is a thin caller; every
//! number lives here where it can be unit-tested.
//!
//! # Architecture
//!
//! Geometry is pure and separated from pixel work behind a backend trait:
//!
//! ```text
//! bytes ──decode──▶ SourceImage          (backend)
//!                      │
//! display region ──resolve/adjust──▶ DisplayRect   (geometry, pure)
//!                      │
//!           ──to_natural──▶ NaturalRect            (geometry, pure)
//!                      │
//!           ──crop + encode──▶ EncodedOutput       (backend, deterministic)
//! ```
//!
//! This separation exists for two reasons:
//!
//! - **Testability**: every coordinate-space conversion is a pure function
//!   over plain value types, so the contract (per-axis scaling, aspect lock,
//!   rounding with a 1px floor) is checkable without encoding a single pixel.
//! - **Swappable pixel work**: sessions are generic over [`backend::CropBackend`],
//!   so state-machine tests run against a recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Pure crop math: default selection, aspect-locked gestures, unit resolution, display→natural mapping |
//! | [`region`] | Value types crossing the UI boundary as JSON: `CropRegion`, `Viewport`, `AspectRatio` |
//! | [`backend`] | `CropBackend` trait, `JpegQuality`, the pipeline error type |
//! | [`rust_backend`] | Production backend on the `image` crate: decode, `crop_imm`, JPEG encode |
//! | [`session`] | Per-crop state machine: load → adjust ⇄ adjust → export, cancel from anywhere |
//! | [`upload`] | `EncodedOutput` packaging: data URLs and multipart-ready `UploadFile` values |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Display space vs. natural space
//!
//! A browser renders the image scaled to its layout, and the user draws the
//! region over that scaled rendering. The scale factor back to true pixels is
//! computed **per axis** (`natural_width / display_width` and the height
//! analogue, independently) because the two need not match when the image is
//! displayed anisotropically. The crop itself happens at natural resolution
//! at 1:1 — no resampling — so exporting never degrades the selected pixels.
//!
//! ## JPEG-Only Output
//!
//! All exports are JPEG via the `image` crate's pure-Rust encoder at a fixed
//! quality. One format keeps the upload contract trivial and the encoder
//! deterministic: the same source, region, and quality always produce
//! byte-identical output.
//!
//! ## Clamp, Never Reject
//!
//! Gesture handling clamps deltas that would push the selection outside the
//! image instead of rejecting them. A rejected gesture would leave whatever
//! region was previously on screen — possibly out of bounds after a viewport
//! change — as live state; clamping guarantees the visible selection is
//! always exportable.

pub mod backend;
pub mod geometry;
pub mod output;
pub mod region;
pub mod rust_backend;
pub mod session;
pub mod upload;

pub use backend::{CropBackend, CropError, Dimensions, JpegQuality};
pub use geometry::{Anchor, Gesture, adjust_region, initial_region, resolve_region, to_natural};
pub use region::{AspectRatio, CropRegion, DisplayRect, NaturalRect, Unit, Viewport};
pub use rust_backend::RustBackend;
pub use session::{CropSession, Phase};
pub use upload::{EncodedOutput, UploadFile, parse_data_url};
