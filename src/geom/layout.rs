//! Padding and letterbox fitting of geographic bounds onto a pixel canvas.

use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};
use crate::geom::{GeoBounds, Projector};

/// Span substituted for a zero-width or zero-height envelope, in degrees.
pub const MIN_SPAN: f64 = 1e-6;

/// Fixed pixel margins removed from the canvas before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Options controlling the geographic buffer and how much of the canvas is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Buffer added on every side, as a fraction of the geometry span.
    pub padding: f64,
    /// Fraction of the available width used when fitting to width.
    pub width_fraction: f64,
    /// Fraction of the available height used when fitting to height.
    pub height_fraction: f64,
    /// Pixel margins reserved for titles and metadata.
    pub insets: Insets,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self { padding: 0.1, width_fraction: 0.9, height_fraction: 0.8, insets: Insets::default() }
    }
}

impl LayoutOptions {
    fn validate(&self) -> Result<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(OutlineError::InvalidOptions(format!("padding must be >= 0, got {}", self.padding)));
        }
        for (name, value) in [("width_fraction", self.width_fraction), ("height_fraction", self.height_fraction)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(OutlineError::InvalidOptions(format!("{name} must be in (0, 1], got {value}")));
            }
        }
        let Insets { top, right, bottom, left } = self.insets;
        if [top, right, bottom, left].iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(OutlineError::InvalidOptions("insets must be finite and >= 0".into()));
        }
        Ok(())
    }
}

/// Letterboxed drawing region inside a larger canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRect {
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

impl TargetRect {
    #[inline] pub fn aspect(&self) -> f64 { self.width / self.height }

    #[inline] pub fn right(&self) -> f64 { self.offset_x + self.width }

    #[inline] pub fn bottom(&self) -> f64 { self.offset_y + self.height }

    /// Corners in pixels: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.offset_x, self.offset_y),
            (self.right(), self.offset_y),
            (self.right(), self.bottom()),
            (self.offset_x, self.bottom()),
        ]
    }
}

/// Which canvas dimension the geometry was scaled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Width,
    Height,
}

/// Padded geographic bounds and the pixel rectangle they map onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub padded: GeoBounds,
    pub rect: TargetRect,
    pub fit: Fit,
}

impl Layout {
    /// Build the lon/lat -> pixel projector for this layout.
    #[inline]
    pub fn projector(&self) -> Projector {
        Projector::new(self.padded, self.rect)
    }
}

/// Replace zero spans with `MIN_SPAN` centered on the degenerate coordinate,
/// then grow the bounds by `padding` of each span on every side.
pub fn pad_bounds(bounds: &GeoBounds, padding: f64) -> GeoBounds {
    let (south, north) = widen_degenerate(bounds.south, bounds.north);
    let (west, east) = widen_degenerate(bounds.west, bounds.east);

    let lat_pad = (north - south) * padding;
    let lng_pad = (east - west) * padding;

    GeoBounds {
        north: north + lat_pad,
        south: south - lat_pad,
        east: east + lng_pad,
        west: west - lng_pad,
    }
}

#[inline]
fn widen_degenerate(min: f64, max: f64) -> (f64, f64) {
    if max - min > 0.0 { (min, max) } else { (min - MIN_SPAN / 2.0, max + MIN_SPAN / 2.0) }
}

/// Pad `bounds` and fit them into the canvas, preserving the geometry's aspect ratio.
///
/// The geometry is fitted to the width only when it is strictly wider than the
/// available area; equal aspect ratios fit to the height. The rectangle is
/// centered inside the area left after removing the insets.
pub fn compute_layout(bounds: &GeoBounds, options: &LayoutOptions, canvas_width: f64, canvas_height: f64) -> Result<Layout> {
    options.validate()?;
    if !(canvas_width > 0.0 && canvas_height > 0.0) || !canvas_width.is_finite() || !canvas_height.is_finite() {
        return Err(OutlineError::InvalidOptions(format!("canvas must be positive, got {canvas_width}x{canvas_height}")));
    }

    let insets = &options.insets;
    let area_width = canvas_width - insets.left - insets.right;
    let area_height = canvas_height - insets.top - insets.bottom;
    if !(area_width > 0.0 && area_height > 0.0) {
        return Err(OutlineError::InvalidOptions(format!("insets leave no drawing area on a {canvas_width}x{canvas_height} canvas")));
    }

    let padded = pad_bounds(bounds, options.padding);
    let geom_aspect = padded.aspect();
    let canvas_aspect = area_width / area_height;

    let (fit, width, height) = if geom_aspect > canvas_aspect {
        let width = area_width * options.width_fraction;
        (Fit::Width, width, width / geom_aspect)
    } else {
        let height = area_height * options.height_fraction;
        (Fit::Height, height * geom_aspect, height)
    };

    let rect = TargetRect {
        offset_x: insets.left + (area_width - width) / 2.0,
        offset_y: insets.top + (area_height - height) / 2.0,
        width,
        height,
    };

    log::debug!("[layout] fit={fit:?} geom_aspect={geom_aspect:.6} canvas_aspect={canvas_aspect:.6} rect={rect:?}");

    Ok(Layout { padded, rect, fit })
}
