//! Per-crop session state machine.
//!
//! One [`CropSession`] covers the life of a single crop: load an image,
//! adjust the selection, export once, done. The session owns the decoded
//! image exclusively and drops it on cancel or after a successful export.
//!
//! ```text
//! Idle ──load──▶ RegionReady ──adjust──▶ RegionReady ──export──▶ Exported
//!   ▲                                                               │
//!   └────────────────── cancel (from any state) ◀───────────────────┘
//! ```
//!
//! The default region is installed at load time, so a freshly loaded
//! session is immediately ready to adjust or export. `Exported` is terminal
//! for the session; a new `load` starts a fresh one. All failures are local
//! and recoverable: a bad file leaves the session in `Idle`, a refused
//! export leaves it in `RegionReady`, and nothing is retried automatically.

use crate::backend::{CropBackend, CropError, Dimensions, JpegQuality};
use crate::geometry::{self, Gesture};
use crate::region::{AspectRatio, CropRegion, Viewport};
use crate::upload::EncodedOutput;

/// Observable lifecycle phase of a [`CropSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RegionReady,
    Exported,
}

enum State<I> {
    Idle,
    Active {
        image: I,
        natural: Dimensions,
        viewport: Viewport,
        region: CropRegion,
    },
    Exported,
}

/// A single interactive crop session over a pixel backend.
pub struct CropSession<B: CropBackend> {
    backend: B,
    aspect: AspectRatio,
    filename_stem: String,
    state: State<B::Image>,
}

impl<B: CropBackend> CropSession<B> {
    pub fn new(backend: B, aspect: AspectRatio) -> Self {
        Self {
            backend,
            aspect,
            filename_stem: "crop".to_string(),
            state: State::Idle,
        }
    }

    /// Set the stem used for the suggested output filename (`<stem>.jpg`).
    pub fn with_filename_stem(mut self, stem: impl Into<String>) -> Self {
        self.filename_stem = stem.into();
        self
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Active { .. } => Phase::RegionReady,
            State::Exported => Phase::Exported,
        }
    }

    /// Decode `bytes` and start a fresh session over it, rendered at
    /// `viewport`. Installs the default centered region. On decode failure
    /// the session stays (or returns to) `Idle`.
    pub fn load(&mut self, bytes: &[u8], viewport: Viewport) -> Result<Dimensions, CropError> {
        self.state = State::Idle;
        let image = self.backend.decode(bytes)?;
        let natural = self.backend.dimensions(&image);
        let region = geometry::initial_region(viewport, self.aspect);
        self.state = State::Active {
            image,
            natural,
            viewport,
            region,
        };
        Ok(natural)
    }

    /// The current selection, if an image is loaded.
    pub fn region(&self) -> Option<CropRegion> {
        match &self.state {
            State::Active { region, .. } => Some(*region),
            _ => None,
        }
    }

    /// Natural dimensions of the loaded image, if any.
    pub fn natural_dimensions(&self) -> Option<Dimensions> {
        match &self.state {
            State::Active { natural, .. } => Some(*natural),
            _ => None,
        }
    }

    /// Replace the selection with one supplied by the caller (e.g. a region
    /// deserialized from the UI). Zero-area regions are accepted here and
    /// refused at export time, keeping the refusal in one place.
    pub fn set_region(&mut self, new_region: CropRegion) -> Result<(), CropError> {
        match &mut self.state {
            State::Active { region, .. } => {
                *region = new_region;
                Ok(())
            }
            _ => Err(CropError::NoRegionSelected),
        }
    }

    /// Apply one drag/resize gesture. The result is aspect-locked and
    /// clamped inside the viewport; see [`geometry::adjust_region`].
    pub fn adjust(&mut self, gesture: Gesture) -> Result<CropRegion, CropError> {
        match &mut self.state {
            State::Active {
                region, viewport, ..
            } => {
                *region = geometry::adjust_region(*region, *viewport, self.aspect, gesture);
                Ok(*region)
            }
            _ => Err(CropError::NoRegionSelected),
        }
    }

    /// Export the current selection as JPEG at the natural-pixel size of
    /// the region. Consumes the session's image on success; refuses (and
    /// stays in `RegionReady`) if the selection has zero area.
    pub fn export(&mut self, quality: JpegQuality) -> Result<EncodedOutput, CropError> {
        let output = match &self.state {
            State::Active {
                image,
                natural,
                viewport,
                region,
            } => {
                if !region.has_area() {
                    return Err(CropError::NoRegionSelected);
                }
                let rect = geometry::to_natural(
                    geometry::resolve_region(*region, *viewport),
                    *viewport,
                    *natural,
                );
                let bytes = self.backend.export_jpeg(image, rect, quality)?;
                EncodedOutput::new(bytes, rect.width, rect.height, &self.filename_stem)
            }
            _ => return Err(CropError::NoRegionSelected),
        };
        self.state = State::Exported;
        Ok(output)
    }

    /// Abandon the session, discarding the image and selection.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }
}
