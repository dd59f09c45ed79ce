//! Value types shared across the crop pipeline.
//!
//! These types cross the UI boundary as JSON (the admin form ships its crop
//! selection as a serialized [`CropRegion`] plus a [`Viewport`]), so they all
//! derive serde traits. Everything here is plain data; the math that operates
//! on it lives in [`geometry`](crate::geometry).
//!
//! ## Coordinate spaces
//!
//! - **Display space**: the on-screen rendered size of the image, possibly
//!   scaled by layout. `CropRegion` and `Viewport` live here.
//! - **Natural space**: the decoded image's true pixel grid. [`NaturalRect`]
//!   lives here and is what the backend actually extracts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit a [`CropRegion`]'s coordinates are expressed in.
///
/// `Percent` values are fractions of the display dimensions times 100
/// (the convention interactive crop widgets emit); `Pixel` values are
/// absolute display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Percent,
    Pixel,
}

/// A user-selected crop rectangle in display space.
///
/// Coordinates are `f64` because percentage regions and drag gestures are
/// fractional; they are only snapped to integers once mapped to natural
/// space by [`geometry::to_natural`](crate::geometry::to_natural).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub unit: Unit,
}

impl CropRegion {
    /// Whether this region has positive area. Zero-area regions are refused
    /// at export time.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// The display dimensions an image is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Viewport {
    type Err = String;

    /// Parse a `WxH` string like `800x450`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
        let width: f64 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
        let height: f64 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
        if width <= 0.0 || height <= 0.0 {
            return Err(format!("viewport must be positive, got '{s}'"));
        }
        Ok(Self { width, height })
    }
}

/// A resolved crop rectangle in absolute display pixels (unit already applied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// An integer crop rectangle in the source image's natural pixel grid.
///
/// Invariant (enforced by [`geometry::to_natural`](crate::geometry::to_natural)):
/// `x + width <= natural_width`, `y + height <= natural_height`, and both
/// sides are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A locked width:height ratio for interactive cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub w: u32,
    pub h: u32,
}

impl AspectRatio {
    /// The 16:9 ratio the course-image forms lock to.
    pub const WIDESCREEN: Self = Self { w: 16, h: 9 };

    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w: w.max(1),
            h: h.max(1),
        }
    }

    /// Width-over-height as a float.
    pub fn ratio(self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.h)
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    /// Parse a `W:H` string like `16:9`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| format!("expected W:H, got '{s}'"))?;
        let w: u32 = w.trim().parse().map_err(|_| format!("bad ratio width '{w}'"))?;
        let h: u32 = h.trim().parse().map_err(|_| format!("bad ratio height '{h}'"))?;
        if w == 0 || h == 0 {
            return Err(format!("aspect ratio sides must be nonzero, got '{s}'"));
        }
        Ok(Self { w, h })
    }
}
