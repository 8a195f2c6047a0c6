//! Selection state, search types and exports of the boundary viewer.

mod area;
mod controller;
pub mod export;

pub use area::{format_thousands, AreaKind, SearchFilters, SearchRequest, SearchResult, SelectedArea, ViewBox};
pub use controller::{Basemap, Viewer};
pub use export::OutputFormat;
