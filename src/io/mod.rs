//! Reading geometry, talking to the division service, and writing exports.

pub mod client;
pub mod fs;
pub mod geojson;

#[cfg(feature = "download")]
pub use client::HttpClient;
pub use client::{FileSource, GeometrySource, SearchSource};
pub use fs::{write_atomic, PendingWrite};
pub use geojson::{parse_geometry, parse_geometry_response, write_geometry};
