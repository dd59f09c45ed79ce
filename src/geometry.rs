//! Pure crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//! They cover the numeric half of the pipeline:
//!
//! - [`initial_region`] — the default selection installed at image-load time
//! - [`adjust_region`] — aspect-locked, bounds-clamped gesture handling
//! - [`resolve_region`] — percent/pixel unit resolution into display pixels
//! - [`to_natural`] — per-axis display→natural mapping with integer snapping
//!
//! The display→natural scale factor is computed independently per axis
//! (`natural_width / display_width` and `natural_height / display_height`);
//! the two need not be equal if the image is displayed anisotropically.

use crate::backend::Dimensions;
use crate::region::{AspectRatio, CropRegion, DisplayRect, NaturalRect, Unit, Viewport};

/// Compute the default crop region for a freshly loaded image.
///
/// Centered, 90% of the display width, height derived from the locked
/// aspect ratio. If the derived height would not fit the viewport, the
/// region shrinks (keeping the ratio) until it does. Returned in percent
/// units, matching what interactive crop widgets emit.
///
/// # Examples
/// ```
/// # use cropkit::geometry::initial_region;
/// # use cropkit::region::{AspectRatio, Unit, Viewport};
/// // 16:9 selection on a 16:9 viewport: 90% wide, centered both ways
/// let region = initial_region(Viewport::new(800.0, 450.0), AspectRatio::WIDESCREEN);
/// assert_eq!(region.unit, Unit::Percent);
/// assert!((region.width - 90.0).abs() < 1e-9);
/// assert!((region.x - 5.0).abs() < 1e-9);
/// ```
pub fn initial_region(viewport: Viewport, aspect: AspectRatio) -> CropRegion {
    let ratio = aspect.ratio();

    let mut width = viewport.width * 0.9;
    let mut height = width / ratio;
    if height > viewport.height {
        height = viewport.height;
        width = height * ratio;
    }

    let x = (viewport.width - width) / 2.0;
    let y = (viewport.height - height) / 2.0;

    CropRegion {
        x: x / viewport.width * 100.0,
        y: y / viewport.height * 100.0,
        width: width / viewport.width * 100.0,
        height: height / viewport.height * 100.0,
        unit: Unit::Percent,
    }
}

/// The corner of the region that stays fixed while a resize gesture moves
/// the opposite corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A single drag/resize input applied to the current region.
///
/// With a locked aspect ratio a resize has one degree of freedom, so it is
/// expressed as a width delta; the height follows from the ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Translate the region without changing its size.
    Move { dx: f64, dy: f64 },
    /// Grow or shrink from a fixed corner by `dw` display pixels.
    Resize { anchor: Anchor, dw: f64 },
}

/// Apply a gesture to a region, enforcing the aspect lock and viewport bounds.
///
/// The result is always fully contained in `[0, width] x [0, height]` of the
/// viewport and keeps `width / height == aspect` (deltas that would violate
/// either are clamped, never rejected — a previously valid region can never
/// become stale out-of-bounds state). Returned in pixel units regardless of
/// the input unit.
pub fn adjust_region(
    region: CropRegion,
    viewport: Viewport,
    aspect: AspectRatio,
    gesture: Gesture,
) -> CropRegion {
    let ratio = aspect.ratio();
    let rect = resolve_region(region, viewport);

    let rect = match gesture {
        Gesture::Move { dx, dy } => DisplayRect {
            x: rect.x + dx,
            y: rect.y + dy,
            ..rect
        },
        Gesture::Resize { anchor, dw } => {
            // Fixed corner in display coordinates.
            let (fx, fy) = match anchor {
                Anchor::TopLeft => (rect.x, rect.y),
                Anchor::TopRight => (rect.x + rect.width, rect.y),
                Anchor::BottomLeft => (rect.x, rect.y + rect.height),
                Anchor::BottomRight => (rect.x + rect.width, rect.y + rect.height),
            };
            // Room available from the fixed corner toward the moving one.
            let (avail_w, avail_h) = match anchor {
                Anchor::TopLeft => (viewport.width - fx, viewport.height - fy),
                Anchor::TopRight => (fx, viewport.height - fy),
                Anchor::BottomLeft => (viewport.width - fx, fy),
                Anchor::BottomRight => (fx, fy),
            };
            let max_width = avail_w.min(avail_h * ratio).max(1.0);
            let width = (rect.width + dw).max(1.0).min(max_width);
            let height = width / ratio;
            let (x, y) = match anchor {
                Anchor::TopLeft => (fx, fy),
                Anchor::TopRight => (fx - width, fy),
                Anchor::BottomLeft => (fx, fy - height),
                Anchor::BottomRight => (fx - width, fy - height),
            };
            DisplayRect {
                x,
                y,
                width,
                height,
            }
        }
    };

    let rect = clamp_rect(rect, viewport, aspect);
    CropRegion {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        unit: Unit::Pixel,
    }
}

/// Clamp a display rectangle fully inside the viewport, preserving the
/// aspect ratio. Shrinks first (if the rect is larger than the viewport
/// allows at the locked ratio), then shifts.
fn clamp_rect(rect: DisplayRect, viewport: Viewport, aspect: AspectRatio) -> DisplayRect {
    let ratio = aspect.ratio();

    let max_width = viewport.width.min(viewport.height * ratio).max(1.0);
    let width = rect.width.max(1.0).min(max_width);
    let height = width / ratio;

    let x = rect.x.clamp(0.0, (viewport.width - width).max(0.0));
    let y = rect.y.clamp(0.0, (viewport.height - height).max(0.0));

    DisplayRect {
        x,
        y,
        width,
        height,
    }
}

/// Resolve a region's unit into absolute display pixels.
///
/// Percent values are fractions of the viewport times 100; pixel values
/// pass through unchanged.
pub fn resolve_region(region: CropRegion, viewport: Viewport) -> DisplayRect {
    match region.unit {
        Unit::Percent => DisplayRect {
            x: region.x * viewport.width / 100.0,
            y: region.y * viewport.height / 100.0,
            width: region.width * viewport.width / 100.0,
            height: region.height * viewport.height / 100.0,
        },
        Unit::Pixel => DisplayRect {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
        },
    }
}

/// Map a display rectangle onto the source image's natural pixel grid.
///
/// Scale factors are computed per axis from the width and height ratios
/// independently. Coordinates are rounded to the nearest pixel; width and
/// height are rounded with a floor of 1 (degenerate zero-size output is
/// never produced). The result is clamped so the rectangle lies entirely
/// inside the natural bounds.
pub fn to_natural(rect: DisplayRect, viewport: Viewport, natural: Dimensions) -> NaturalRect {
    let scale_x = natural.width as f64 / viewport.width;
    let scale_y = natural.height as f64 / viewport.height;

    let max_x = natural.width.saturating_sub(1);
    let max_y = natural.height.saturating_sub(1);

    let x = (rect.x * scale_x).round().clamp(0.0, max_x as f64) as u32;
    let y = (rect.y * scale_y).round().clamp(0.0, max_y as f64) as u32;

    let width = (rect.width * scale_x).round().max(1.0) as u32;
    let height = (rect.height * scale_y).round().max(1.0) as u32;

    NaturalRect {
        x,
        y,
        width: width.min(natural.width - x).max(1),
        height: height.min(natural.height - y).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;
    // Aspect lock tolerance from the contract: 1 pixel.
    const LOCK_TOLERANCE: f64 = 1.0;

    fn assert_locked(region: &CropRegion, aspect: AspectRatio) {
        let expected_height = region.width / aspect.ratio();
        assert!(
            (region.height - expected_height).abs() <= LOCK_TOLERANCE,
            "aspect lock broken: {}x{} vs ratio {}",
            region.width,
            region.height,
            aspect
        );
    }

    fn assert_in_bounds(region: &CropRegion, viewport: Viewport) {
        assert_eq!(region.unit, Unit::Pixel);
        assert!(region.x >= -EPS, "x={} out of bounds", region.x);
        assert!(region.y >= -EPS, "y={} out of bounds", region.y);
        assert!(
            region.x + region.width <= viewport.width + EPS,
            "right edge {} exceeds {}",
            region.x + region.width,
            viewport.width
        );
        assert!(
            region.y + region.height <= viewport.height + EPS,
            "bottom edge {} exceeds {}",
            region.y + region.height,
            viewport.height
        );
    }

    // =========================================================================
    // initial_region tests
    // =========================================================================

    #[test]
    fn initial_region_covers_90_percent_width() {
        let region = initial_region(Viewport::new(800.0, 450.0), AspectRatio::WIDESCREEN);
        assert!((region.width - 90.0).abs() < EPS);
        assert!((region.height - 90.0).abs() < EPS); // same ratio as viewport
        assert!((region.x - 5.0).abs() < EPS);
        assert!((region.y - 5.0).abs() < EPS);
    }

    #[test]
    fn initial_region_clamps_on_portrait_viewport() {
        // 400 wide, 16:9 region from 90% width would be 360x202.5 — fits a
        // 300-tall viewport. Shrink the viewport to 150 and it must clamp.
        let region = initial_region(Viewport::new(400.0, 150.0), AspectRatio::WIDESCREEN);
        let rect = resolve_region(region, Viewport::new(400.0, 150.0));
        assert!((rect.height - 150.0).abs() < EPS);
        assert!((rect.width - 150.0 * 16.0 / 9.0).abs() < EPS);
        // Still centered
        assert!((rect.x - (400.0 - rect.width) / 2.0).abs() < EPS);
        assert!(rect.y.abs() < EPS);
    }

    #[test]
    fn initial_region_is_centered() {
        let viewport = Viewport::new(1000.0, 700.0);
        let region = initial_region(viewport, AspectRatio::new(1, 1));
        let rect = resolve_region(region, viewport);
        assert!(((rect.x + rect.width / 2.0) - 500.0).abs() < EPS);
        assert!(((rect.y + rect.height / 2.0) - 350.0).abs() < EPS);
    }

    // =========================================================================
    // adjust_region tests
    // =========================================================================

    #[test]
    fn move_within_bounds_translates() {
        let viewport = Viewport::new(800.0, 450.0);
        let region = CropRegion {
            x: 100.0,
            y: 100.0,
            width: 320.0,
            height: 180.0,
            unit: Unit::Pixel,
        };
        let moved = adjust_region(
            region,
            viewport,
            AspectRatio::WIDESCREEN,
            Gesture::Move { dx: 50.0, dy: -30.0 },
        );
        assert!((moved.x - 150.0).abs() < EPS);
        assert!((moved.y - 70.0).abs() < EPS);
        assert!((moved.width - 320.0).abs() < EPS);
    }

    #[test]
    fn move_past_edge_clamps_instead_of_rejecting() {
        let viewport = Viewport::new(800.0, 450.0);
        let region = CropRegion {
            x: 400.0,
            y: 200.0,
            width: 320.0,
            height: 180.0,
            unit: Unit::Pixel,
        };
        let moved = adjust_region(
            region,
            viewport,
            AspectRatio::WIDESCREEN,
            Gesture::Move {
                dx: 1000.0,
                dy: 1000.0,
            },
        );
        // Pinned to the bottom-right corner, size unchanged.
        assert!((moved.x - 480.0).abs() < EPS);
        assert!((moved.y - 270.0).abs() < EPS);
        assert_in_bounds(&moved, viewport);
    }

    #[test]
    fn resize_keeps_aspect_lock() {
        let viewport = Viewport::new(800.0, 450.0);
        let aspect = AspectRatio::WIDESCREEN;
        let mut region = initial_region(viewport, aspect);

        let gestures = [
            Gesture::Resize {
                anchor: Anchor::TopLeft,
                dw: -200.0,
            },
            Gesture::Move { dx: 37.0, dy: 12.0 },
            Gesture::Resize {
                anchor: Anchor::BottomRight,
                dw: 85.0,
            },
            Gesture::Resize {
                anchor: Anchor::TopRight,
                dw: 500.0,
            },
            Gesture::Move {
                dx: -9999.0,
                dy: 4.0,
            },
            Gesture::Resize {
                anchor: Anchor::BottomLeft,
                dw: -50.0,
            },
        ];
        for gesture in gestures {
            region = adjust_region(region, viewport, aspect, gesture);
            assert_locked(&region, aspect);
            assert_in_bounds(&region, viewport);
        }
    }

    #[test]
    fn resize_growth_is_capped_by_viewport() {
        let viewport = Viewport::new(800.0, 450.0);
        let region = CropRegion {
            x: 200.0,
            y: 100.0,
            width: 160.0,
            height: 90.0,
            unit: Unit::Pixel,
        };
        let grown = adjust_region(
            region,
            viewport,
            AspectRatio::WIDESCREEN,
            Gesture::Resize {
                anchor: Anchor::TopLeft,
                dw: 10_000.0,
            },
        );
        // Anchored at (200, 100): at most 600 wide by room to the right,
        // at most 350 * 16/9 ≈ 622 by room below. Width wins at 600.
        assert!((grown.x - 200.0).abs() < EPS);
        assert!((grown.y - 100.0).abs() < EPS);
        assert!((grown.width - 600.0).abs() < EPS);
        assert_locked(&grown, AspectRatio::WIDESCREEN);
        assert_in_bounds(&grown, viewport);
    }

    #[test]
    fn resize_from_bottom_right_moves_top_left() {
        let viewport = Viewport::new(800.0, 450.0);
        let region = CropRegion {
            x: 100.0,
            y: 100.0,
            width: 320.0,
            height: 180.0,
            unit: Unit::Pixel,
        };
        let shrunk = adjust_region(
            region,
            viewport,
            AspectRatio::WIDESCREEN,
            Gesture::Resize {
                anchor: Anchor::BottomRight,
                dw: -160.0,
            },
        );
        // Fixed corner stays at (420, 280).
        assert!((shrunk.x + shrunk.width - 420.0).abs() < EPS);
        assert!((shrunk.y + shrunk.height - 280.0).abs() < EPS);
        assert!((shrunk.width - 160.0).abs() < EPS);
    }

    #[test]
    fn resize_never_collapses_to_zero() {
        let viewport = Viewport::new(800.0, 450.0);
        let region = CropRegion {
            x: 100.0,
            y: 100.0,
            width: 32.0,
            height: 18.0,
            unit: Unit::Pixel,
        };
        let shrunk = adjust_region(
            region,
            viewport,
            AspectRatio::WIDESCREEN,
            Gesture::Resize {
                anchor: Anchor::TopLeft,
                dw: -10_000.0,
            },
        );
        assert!(shrunk.width >= 1.0);
        assert!(shrunk.height > 0.0);
    }

    #[test]
    fn adjust_accepts_percent_input() {
        let viewport = Viewport::new(1000.0, 1000.0);
        let region = CropRegion {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 50.0,
            unit: Unit::Percent,
        };
        let moved = adjust_region(
            region,
            viewport,
            AspectRatio::new(1, 1),
            Gesture::Move { dx: 0.0, dy: 0.0 },
        );
        assert_eq!(moved.unit, Unit::Pixel);
        assert!((moved.x - 100.0).abs() < EPS);
        assert!((moved.width - 500.0).abs() < EPS);
    }

    // =========================================================================
    // resolve_region / to_natural tests
    // =========================================================================

    #[test]
    fn resolve_percent_region() {
        let rect = resolve_region(
            CropRegion {
                x: 5.0,
                y: 10.0,
                width: 90.0,
                height: 80.0,
                unit: Unit::Percent,
            },
            Viewport::new(800.0, 450.0),
        );
        assert!((rect.x - 40.0).abs() < EPS);
        assert!((rect.y - 45.0).abs() < EPS);
        assert!((rect.width - 720.0).abs() < EPS);
        assert!((rect.height - 360.0).abs() < EPS);
    }

    #[test]
    fn resolve_pixel_region_passes_through() {
        let rect = resolve_region(
            CropRegion {
                x: 3.0,
                y: 4.0,
                width: 5.0,
                height: 6.0,
                unit: Unit::Pixel,
            },
            Viewport::new(800.0, 450.0),
        );
        assert_eq!(
            rect,
            DisplayRect {
                x: 3.0,
                y: 4.0,
                width: 5.0,
                height: 6.0
            }
        );
    }

    #[test]
    fn natural_mapping_at_half_display_scale() {
        // 1000x1000 natural shown at 500x500: s = 2 both axes.
        let rect = DisplayRect {
            x: 100.0,
            y: 100.0,
            width: 200.0,
            height: 200.0,
        };
        let natural = to_natural(
            rect,
            Viewport::new(500.0, 500.0),
            Dimensions {
                width: 1000,
                height: 1000,
            },
        );
        assert_eq!(
            natural,
            NaturalRect {
                x: 200,
                y: 200,
                width: 400,
                height: 400
            }
        );
    }

    #[test]
    fn natural_mapping_anisotropic_scales() {
        // Natural 1000x500 displayed at 500x500: sx=2, sy=1.
        let rect = DisplayRect {
            x: 50.0,
            y: 50.0,
            width: 100.0,
            height: 100.0,
        };
        let natural = to_natural(
            rect,
            Viewport::new(500.0, 500.0),
            Dimensions {
                width: 1000,
                height: 500,
            },
        );
        assert_eq!(
            natural,
            NaturalRect {
                x: 100,
                y: 50,
                width: 200,
                height: 100
            }
        );
    }

    #[test]
    fn natural_mapping_full_image_identity() {
        let natural_dims = Dimensions {
            width: 1234,
            height: 777,
        };
        let rect = DisplayRect {
            x: 0.0,
            y: 0.0,
            width: 617.0,
            height: 388.5,
        };
        let natural = to_natural(rect, Viewport::new(617.0, 388.5), natural_dims);
        assert_eq!(
            natural,
            NaturalRect {
                x: 0,
                y: 0,
                width: 1234,
                height: 777
            }
        );
    }

    #[test]
    fn natural_mapping_enforces_minimum_one_pixel() {
        let rect = DisplayRect {
            x: 10.0,
            y: 10.0,
            width: 0.1,
            height: 0.1,
        };
        let natural = to_natural(
            rect,
            Viewport::new(100.0, 100.0),
            Dimensions {
                width: 100,
                height: 100,
            },
        );
        assert_eq!(natural.width, 1);
        assert_eq!(natural.height, 1);
    }

    #[test]
    fn natural_mapping_clamps_overhang() {
        // Region poking past the right/bottom edges gets pulled inside.
        let rect = DisplayRect {
            x: 90.0,
            y: 95.0,
            width: 50.0,
            height: 50.0,
        };
        let natural = to_natural(
            rect,
            Viewport::new(100.0, 100.0),
            Dimensions {
                width: 200,
                height: 200,
            },
        );
        assert!(natural.x + natural.width <= 200);
        assert!(natural.y + natural.height <= 200);
        assert!(natural.width >= 1 && natural.height >= 1);
    }
}
