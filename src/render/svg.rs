//! SVG document surface for vector output.

use std::{fmt::Write as _, io::Write};

use anyhow::{Context, Result};

use crate::render::{Rgb, StrokeStyle, Surface, TextAlign, TextItem};

/// Builds an SVG document in memory; one `<path>` element per stroked ring.
pub struct SvgSurface {
    width: f64,
    height: f64,
    scale: f64,
    background: Option<Rgb>,
    body: String,
    path: String,
}

impl SvgSurface {
    /// `width`/`height` are logical pixels; the document is `scale` times larger.
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self { width, height, scale, background: None, body: String::new(), path: String::new() }
    }

    /// Render the complete document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let (width, height) = (self.width * self.scale, self.height * self.scale);
        // Writing to a String cannot fail.
        let _ = writeln!(out, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##);
        let _ = writeln!(out, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##);
        if let Some(color) = self.background {
            let _ = writeln!(out, r##"<rect width="100%" height="100%" fill="{color}"/>"##);
        }
        let _ = writeln!(out, r##"<g transform="scale({})">"##, self.scale);
        out.push_str(&self.body);
        let _ = writeln!(out, "</g>");
        let _ = writeln!(out, "</svg>");
        out
    }

    /// Write the document to any writer.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(self.to_svg_string().as_bytes())
            .context("[render::svg] Failed to write SVG document")
    }
}

impl Surface for SvgSurface {
    fn fill_background(&mut self, color: Rgb) { self.background = Some(color) }

    fn move_to(&mut self, x: f64, y: f64) {
        if !self.path.is_empty() { self.path.push(' ') }
        let _ = write!(self.path, "M{x:.3},{y:.3}");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, " L{x:.3},{y:.3}");
    }

    fn close_path(&mut self) { self.path.push('Z') }

    fn stroke(&mut self, style: &StrokeStyle) {
        if self.path.is_empty() { return }
        let d = std::mem::take(&mut self.path);
        let _ = writeln!(
            self.body,
            r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="miter"/>"#,
            style.color,
            style.line_width,
        );
    }

    fn text(&mut self, item: &TextItem) {
        let anchor = match item.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
        };
        let _ = writeln!(
            self.body,
            r#"<text x="{:.3}" y="{:.3}" font-family="Arial, sans-serif" font-size="{}" text-anchor="{anchor}" fill="{}">{}</text>"#,
            item.x,
            item.y,
            item.size,
            item.color,
            escape_xml(&item.text),
        );
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
