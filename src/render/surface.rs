//! Drawing surface abstraction and the in-memory command recorder.

use serde::{Deserialize, Serialize};

use crate::render::Rgb;

/// Line color and width used for every stroked ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: Rgb,
    /// Width in logical pixels (before the surface scale is applied).
    pub line_width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self { Self { color: Rgb::BLACK, line_width: 3.0 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single line of text placed outside the drawing region.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Font size in logical pixels.
    pub size: f64,
    pub align: TextAlign,
    pub color: Rgb,
}

/// Path construction and stroking in logical pixel coordinates.
pub trait Surface {
    /// Paint the whole canvas with a solid color.
    fn fill_background(&mut self, color: Rgb);

    /// Start a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Connect the current point back to the start of the subpath.
    fn close_path(&mut self);

    /// Stroke and discard the current path.
    fn stroke(&mut self, style: &StrokeStyle);

    /// Draw a line of text. Surfaces without text support may ignore it.
    fn text(&mut self, item: &TextItem);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Rgb),
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Stroke(StrokeStyle),
    Text(TextItem),
}

/// Surface that records every call, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn commands(&self) -> &[DrawCommand] { &self.commands }

    pub fn into_commands(self) -> Vec<DrawCommand> { self.commands }

    /// Number of stroke calls, i.e. rings drawn.
    pub fn stroke_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Stroke(_))).count()
    }

    /// Every projected vertex, in draw order.
    pub fn vertices(&self) -> Vec<(f64, f64)> {
        self.commands.iter()
            .filter_map(|c| match *c {
                DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => Some((x, y)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_background(&mut self, color: Rgb) { self.commands.push(DrawCommand::Background(color)) }

    fn move_to(&mut self, x: f64, y: f64) { self.commands.push(DrawCommand::MoveTo { x, y }) }

    fn line_to(&mut self, x: f64, y: f64) { self.commands.push(DrawCommand::LineTo { x, y }) }

    fn close_path(&mut self) { self.commands.push(DrawCommand::ClosePath) }

    fn stroke(&mut self, style: &StrokeStyle) { self.commands.push(DrawCommand::Stroke(*style)) }

    fn text(&mut self, item: &TextItem) { self.commands.push(DrawCommand::Text(item.clone())) }
}
