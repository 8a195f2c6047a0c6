//! Geometry model, bounds, layout and projection.

mod bounds;
mod geometry;
mod layout;
mod proj;

pub use bounds::{compute_bounds, GeoBounds};
pub use geometry::Geometry;
pub(crate) use geometry::ring_vertices;
pub use layout::{compute_layout, pad_bounds, Fit, Insets, Layout, LayoutOptions, TargetRect, MIN_SPAN};
pub use proj::Projector;
