//! Raster surface backed by a tiny-skia pixmap.

use anyhow::{Context, Result, anyhow};
use image::{ImageEncoder, codecs::jpeg::JpegEncoder};
use rusttype::{point, Font, PositionedGlyph, Scale};
use tiny_skia::{Color, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, Transform};

use crate::render::{Rgb, StrokeStyle, Surface, TextAlign, TextItem};

/// DejaVu Sans, embedded so raster exports do not depend on system fonts.
const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Anti-aliased raster canvas. Drawing happens in logical pixels and is
/// scaled by `scale` onto the physical pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    scale: f32,
    path: PathBuilder,
    font: Font<'static>,
}

impl PixmapSurface {
    /// Allocate a `width` x `height` physical pixmap.
    pub fn new(width: u32, height: u32, scale: f64) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("[render::pixmap] Cannot allocate a {width}x{height} pixmap"))?;
        let font = Font::try_from_bytes(FONT_BYTES)
            .ok_or_else(|| anyhow!("[render::pixmap] Embedded font is not a valid TrueType file"))?;
        Ok(Self { pixmap, scale: scale as f32, path: PathBuilder::new(), font })
    }

    #[inline] pub fn width(&self) -> u32 { self.pixmap.width() }

    #[inline] pub fn height(&self) -> u32 { self.pixmap.height() }

    #[inline] pub fn pixmap(&self) -> &Pixmap { &self.pixmap }

    /// Get the demultiplied color at a physical pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgb::new(c.red(), c.green(), c.blue()))
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png()
            .context("[render::pixmap] PNG encoding failed")
    }

    /// Encode as baseline JPEG with the given quality (1-100).
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let rgb = self.pixmap.pixels().iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect::<Vec<u8>>();

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
            .write_image(&rgb, self.width(), self.height(), image::ExtendedColorType::Rgb8)
            .context("[render::pixmap] JPEG encoding failed")?;
        Ok(out)
    }

    #[inline]
    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    /// Lay out `text` with its baseline origin at physical `(x, y)`.
    fn layout_glyphs(&self, text: &str, scale: Scale, x: f32, y: f32) -> Vec<PositionedGlyph<'static>> {
        self.font.layout(text, scale, point(x, y)).collect()
    }
}

/// Advance width of a laid-out line, from the first glyph origin.
fn line_width(glyphs: &[PositionedGlyph<'_>]) -> f32 {
    match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            last.position().x + last.unpositioned().h_metrics().advance_width - first.position().x
        }
        _ => 0.0,
    }
}

/// Source-over of an opaque color at `coverage` onto a premultiplied pixel.
fn blend(dst: PremultipliedColorU8, color: Rgb, coverage: f32) -> PremultipliedColorU8 {
    let a = coverage.clamp(0.0, 1.0);
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    PremultipliedColorU8::from_rgba(
        mix(color.r, dst.red()),
        mix(color.g, dst.green()),
        mix(color.b, dst.blue()),
        mix(255, dst.alpha()),
    )
    .unwrap_or(dst)
}

impl Surface for PixmapSurface {
    fn fill_background(&mut self, color: Rgb) {
        self.pixmap.fill(Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    fn move_to(&mut self, x: f64, y: f64) { self.path.move_to(x as f32, y as f32) }

    fn line_to(&mut self, x: f64, y: f64) { self.path.line_to(x as f32, y as f32) }

    fn close_path(&mut self) { self.path.close() }

    fn stroke(&mut self, style: &StrokeStyle) {
        let builder = std::mem::replace(&mut self.path, PathBuilder::new());
        let Some(path) = builder.finish() else {
            log::debug!("[render::pixmap] skipping empty or degenerate path");
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, 255);
        paint.anti_alias = true;

        let mut stroke = Stroke::default();
        stroke.width = style.line_width as f32;
        stroke.line_join = LineJoin::Miter;

        self.pixmap.stroke_path(&path, &paint, &stroke, self.transform(), None);
    }

    fn text(&mut self, item: &TextItem) {
        let scale = Scale::uniform(item.size as f32 * self.scale);
        let (x, baseline) = (item.x as f32 * self.scale, item.y as f32 * self.scale);
        let x = match item.align {
            TextAlign::Left => x,
            TextAlign::Center => x - line_width(&self.layout_glyphs(&item.text, scale, 0.0, 0.0)) / 2.0,
        };

        let (width, height) = (self.pixmap.width() as i32, self.pixmap.height() as i32);
        let glyphs = self.layout_glyphs(&item.text, scale, x, baseline);
        let pixels = self.pixmap.pixels_mut();

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else { continue };
            glyph.draw(|gx, gy, coverage| {
                let (px, py) = (bb.min.x + gx as i32, bb.min.y + gy as i32);
                if px < 0 || py < 0 || px >= width || py >= height { return }
                let dst = &mut pixels[(py * width + px) as usize];
                *dst = blend(*dst, item.color, coverage);
            });
        }
        log::debug!("[render::pixmap] text {:?} at ({x:.1}, {baseline:.1}) px", item.text);
    }
}
