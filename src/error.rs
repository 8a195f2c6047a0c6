//! Error taxonomy for the outline engine.

use std::fmt;

use thiserror::Error;

/// Result alias used by the geometry, layout and rasterization core.
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Why a ring was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingDefect {
    /// Fewer than three distinct vertices (closing duplicate not counted).
    TooFewVertices(usize),
    /// At least one coordinate is NaN or infinite.
    NonFinite,
}

impl fmt::Display for RingDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingDefect::TooFewVertices(n) => write!(f, "ring has {n} vertices, need at least 3"),
            RingDefect::NonFinite => write!(f, "ring contains a non-finite coordinate"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OutlineError {
    /// The geometry contains no coordinates at all.
    #[error("geometry contains no coordinates")]
    EmptyGeometry,

    /// A ring cannot be drawn; aborts the whole render.
    #[error("invalid ring {ring} of polygon {polygon}: {defect}")]
    InvalidRing { polygon: usize, ring: usize, defect: RingDefect },

    /// Layout or render options outside their valid range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The geometry service did not deliver a usable geometry.
    #[error("geometry fetch failed for {id}: {reason}")]
    GeometryFetch { id: String, reason: String },

    /// The search service failed or returned an unreadable body.
    #[error("search failed: {0}")]
    Search(String),

    /// Well-formed JSON that is not an acceptable geometry.
    #[error("malformed GeoJSON: {0}")]
    Parse(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl OutlineError {
    pub(crate) fn fetch(id: &str, reason: impl fmt::Display) -> Self {
        OutlineError::GeometryFetch { id: id.to_string(), reason: reason.to_string() }
    }
}
