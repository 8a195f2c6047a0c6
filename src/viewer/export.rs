//! Screen and print exports of a selected division.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;

use crate::geom::{Geometry, Layout};
use crate::io::fs::{sanitize_file_stem, write_atomic};
use crate::render::{
    render_boundary_outline, PixmapSurface, RenderOptions, Rgb, SvgSurface, Surface, TextAlign, TextItem, PRINT_DPI,
};
use crate::viewer::{format_thousands, SelectedArea};

/// JPEG quality used for print exports.
pub const PRINT_JPEG_QUALITY: u8 = 95;

/// Encoded output format, chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg { quality: u8 },
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg { quality: PRINT_JPEG_QUALITY }),
            "svg" => Ok(OutputFormat::Svg),
            _ => bail!("[export] Unsupported output extension {:?} (expected png, jpg or svg)", path.display().to_string()),
        }
    }
}

/// `{name}_outline.png`, with path separators replaced.
pub fn outline_file_name(name: &str) -> String {
    format!("{}_outline.png", name.replace(['/', '\\'], "_"))
}

/// `{name}_boundary_print.jpg` with every non-alphanumeric character replaced.
pub fn print_file_name(name: &str) -> String {
    format!("{}_boundary_print.jpg", sanitize_file_stem(name))
}

/// Title line above the screen outline.
pub fn outline_annotations(name: &str) -> Vec<TextItem> {
    let options = RenderOptions::screen();
    vec![TextItem {
        text: format!("{name} - Boundary Outline"),
        x: options.canvas_width / 2.0,
        y: 40.0,
        size: 20.0,
        align: TextAlign::Center,
        color: Rgb::BLACK,
    }]
}

/// Title and metadata block of the print page for a selected area.
pub fn print_annotations(area: &SelectedArea, generated: NaiveDateTime) -> Vec<TextItem> {
    let lines = vec![
        format!("Type: {}", area.kind),
        format!("Region: {}", area.region),
        format!("Country: {}", area.country.as_deref().unwrap_or("N/A")),
        format!("Population: {}", area.population.map(format_thousands).unwrap_or_else(|| "N/A".into())),
        generated_line(generated),
    ];
    print_page(&area.name, lines)
}

/// `Generated: M/D/YYYY at h:MM:SS AM`.
pub fn generated_line(generated: NaiveDateTime) -> String {
    format!("Generated: {} at {}", generated.format("%-m/%-d/%Y"), generated.format("%-I:%M:%S %p"))
}

/// Print page title plus `lines` in the metadata block below the drawing area.
pub fn print_page(name: &str, lines: Vec<String>) -> Vec<TextItem> {
    let options = RenderOptions::print();
    let dpi = PRINT_DPI;

    let mut items = vec![TextItem {
        text: format!("{name} - Boundary Map"),
        x: options.canvas_width / 2.0,
        y: 0.5 * dpi,
        size: (0.08 * dpi).floor(),
        align: TextAlign::Center,
        color: Rgb::BLACK,
    }];

    let top = options.canvas_height - 1.5 * dpi + 0.2 * dpi;
    let line_height = 0.06 * dpi;
    items.extend(lines.into_iter().enumerate().map(|(i, text)| TextItem {
        text,
        x: 0.5 * dpi,
        y: top + i as f64 * line_height,
        size: (0.04 * dpi).floor(),
        align: TextAlign::Left,
        color: Rgb::BLACK,
    }));
    items
}

fn geometry_of(area: &SelectedArea) -> Result<&Geometry> {
    area.geometry.as_ref()
        .with_context(|| format!("[export] No geometry loaded for {} ({})", area.name, area.id))
}

/// Draw the outline and its annotations onto any surface.
pub fn draw<S: Surface + ?Sized>(geometry: &Geometry, options: &RenderOptions, annotations: &[TextItem], surface: &mut S) -> Result<Layout> {
    let layout = render_boundary_outline(geometry, options, surface)
        .context("[export] Failed to render boundary")?;
    for item in annotations {
        surface.text(item);
    }
    Ok(layout)
}

/// Rasterize `geometry` with `options` into a fresh pixmap.
pub fn render_pixmap(geometry: &Geometry, options: &RenderOptions, annotations: &[TextItem]) -> Result<(PixmapSurface, Layout)> {
    let (width, height) = options.physical_size()?;
    let mut surface = PixmapSurface::new(width, height, options.scale)?;
    let layout = draw(geometry, options, annotations, &mut surface)?;
    Ok((surface, layout))
}

/// Screen preview of the selected area (1600x2000 px).
pub fn render_outline(area: &SelectedArea) -> Result<PixmapSurface> {
    let (surface, _) = render_pixmap(geometry_of(area)?, &RenderOptions::screen(), &outline_annotations(&area.name))?;
    Ok(surface)
}

/// Print page of the selected area (2550x3300 px).
pub fn render_print(area: &SelectedArea, generated: NaiveDateTime) -> Result<PixmapSurface> {
    let (surface, _) = render_pixmap(geometry_of(area)?, &RenderOptions::print(), &print_annotations(area, generated))?;
    Ok(surface)
}

/// Render and atomically write `geometry` to `path` in the given format.
pub fn render_to_file(
    geometry: &Geometry,
    options: &RenderOptions,
    annotations: &[TextItem],
    path: &Path,
    format: OutputFormat,
    force: bool,
) -> Result<(PathBuf, Layout)> {
    let (bytes, layout) = match format {
        OutputFormat::Svg => {
            let mut surface = SvgSurface::new(options.canvas_width, options.canvas_height, options.scale);
            let layout = draw(geometry, options, annotations, &mut surface)?;
            let mut bytes = Vec::new();
            surface.write_to(&mut bytes)?;
            (bytes, layout)
        }
        OutputFormat::Png => {
            let (surface, layout) = render_pixmap(geometry, options, annotations)?;
            (surface.encode_png()?, layout)
        }
        OutputFormat::Jpeg { quality } => {
            let (surface, layout) = render_pixmap(geometry, options, annotations)?;
            (surface.encode_jpeg(quality)?, layout)
        }
    };

    let written = write_atomic(path, &bytes, force)
        .with_context(|| format!("[export] Failed to write {}", path.display()))?;
    log::info!("[export] wrote {} ({} bytes)", written.display(), bytes.len());
    Ok((written, layout))
}
