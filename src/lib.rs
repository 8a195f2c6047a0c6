#![doc = "Division boundary outlines: bounds, letterboxed layout, projection and stroked rendering"]
pub mod cli;
pub mod commands;
pub mod error;
pub mod geom;
pub mod io;
pub mod render;
pub mod viewer;

#[doc(inline)]
pub use error::{OutlineError, Result, RingDefect};

#[doc(inline)]
pub use geom::{compute_bounds, compute_layout, GeoBounds, Geometry, Layout, LayoutOptions, Projector, TargetRect};

#[doc(inline)]
pub use render::{render_boundary_outline, rasterize, RenderOptions, StrokeStyle, Surface};

#[doc(inline)]
pub use viewer::{SelectedArea, Viewer};
