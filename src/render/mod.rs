//! Drawing surfaces and the boundary outline pipeline.

mod color;
mod pixmap;
mod raster;
mod surface;
mod svg;

pub use color::Rgb;
pub use pixmap::PixmapSurface;
pub use raster::{rasterize, rasterize_commands, validate};
use raster::stroke_rings;
pub use surface::{DrawCommand, RecordingSurface, StrokeStyle, Surface, TextAlign, TextItem};
pub use svg::SvgSurface;

use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};
use crate::geom::{compute_bounds, compute_layout, Geometry, Insets, Layout, LayoutOptions};

/// Print resolution in dots per inch.
pub const PRINT_DPI: f64 = 300.0;

/// Everything needed to place and stroke a boundary on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Logical canvas width; layout and strokes are computed in this space.
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Physical pixels per logical pixel.
    pub scale: f64,
    pub background: Rgb,
    pub layout: LayoutOptions,
    pub stroke: StrokeStyle,
}

impl Default for RenderOptions {
    fn default() -> Self { Self::screen() }
}

impl RenderOptions {
    /// Screen export: 800x1000 portrait at 2x, 3 px line.
    pub fn screen() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 1000.0,
            scale: 2.0,
            background: Rgb::WHITE,
            layout: LayoutOptions::default(),
            stroke: StrokeStyle { color: Rgb::BLACK, line_width: 3.0 },
        }
    }

    /// Print export: US letter at 300 DPI with margins reserved for title and metadata.
    pub fn print() -> Self {
        Self {
            canvas_width: 8.5 * PRINT_DPI,
            canvas_height: 11.0 * PRINT_DPI,
            scale: 1.0,
            background: Rgb::WHITE,
            layout: LayoutOptions {
                padding: 0.1,
                width_fraction: 1.0,
                height_fraction: 1.0,
                insets: Insets {
                    top: PRINT_DPI,
                    right: 0.5 * PRINT_DPI,
                    bottom: 1.5 * PRINT_DPI,
                    left: 0.5 * PRINT_DPI,
                },
            },
            stroke: StrokeStyle { color: Rgb::BLACK, line_width: 0.01 * PRINT_DPI },
        }
    }

    /// Physical surface size in pixels.
    pub fn physical_size(&self) -> Result<(u32, u32)> {
        let (w, h) = ((self.canvas_width * self.scale).round(), (self.canvas_height * self.scale).round());
        if !(self.scale > 0.0 && w >= 1.0 && h >= 1.0 && w <= u32::MAX as f64 && h <= u32::MAX as f64) {
            return Err(OutlineError::InvalidOptions(format!(
                "canvas {}x{} at scale {} has no valid pixel size", self.canvas_width, self.canvas_height, self.scale,
            )));
        }
        Ok((w as u32, h as u32))
    }
}

/// Bounds, layout, projection and stroking in one call.
///
/// The geometry is validated before the surface is touched; on success the
/// surface holds the background and one stroked path per ring.
pub fn render_boundary_outline<S: Surface + ?Sized>(geometry: &Geometry, options: &RenderOptions, surface: &mut S) -> Result<Layout> {
    let bounds = compute_bounds(geometry)?;
    validate(geometry)?;
    let layout = compute_layout(&bounds, &options.layout, options.canvas_width, options.canvas_height)?;

    surface.fill_background(options.background);
    stroke_rings(geometry, &layout.projector(), &options.stroke, surface);

    log::info!(
        "[render] {} with {} ring(s) -> {:.1}x{:.1} px at ({:.1}, {:.1})",
        geometry.type_name(),
        geometry.num_rings(),
        layout.rect.width,
        layout.rect.height,
        layout.rect.offset_x,
        layout.rect.offset_y,
    );

    Ok(layout)
}
