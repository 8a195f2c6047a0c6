use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result, RingDefect};
use crate::geom::Geometry;

/// A lon/lat bounding box in degrees. Antimeridian crossing is not represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    /// Degenerate bounds around a single coordinate.
    #[inline]
    fn at(coord: &Coord<f64>) -> Self {
        Self { north: coord.y, south: coord.y, east: coord.x, west: coord.x }
    }

    #[inline]
    fn extend(&mut self, coord: &Coord<f64>) {
        self.north = self.north.max(coord.y);
        self.south = self.south.min(coord.y);
        self.east = self.east.max(coord.x);
        self.west = self.west.min(coord.x);
    }

    /// Latitude extent in degrees.
    #[inline] pub fn lat_span(&self) -> f64 { self.north - self.south }

    /// Longitude extent in degrees.
    #[inline] pub fn lng_span(&self) -> f64 { self.east - self.west }

    /// Width over height, in degrees.
    #[inline] pub fn aspect(&self) -> f64 { self.lng_span() / self.lat_span() }

    /// Inclusive containment check for a lon/lat coordinate.
    pub fn contains(&self, coord: &Coord<f64>) -> bool {
        coord.x >= self.west && coord.x <= self.east && coord.y >= self.south && coord.y <= self.north
    }

    /// Corners as lon/lat: north-west, north-east, south-east, south-west.
    pub fn corners(&self) -> [Coord<f64>; 4] {
        [
            Coord { x: self.west, y: self.north },
            Coord { x: self.east, y: self.north },
            Coord { x: self.east, y: self.south },
            Coord { x: self.west, y: self.south },
        ]
    }
}

/// Compute the exact envelope of every coordinate in every ring, holes included.
pub fn compute_bounds(geometry: &Geometry) -> Result<GeoBounds> {
    let mut bounds: Option<GeoBounds> = None;

    for (polygon, ring, line) in geometry.rings() {
        for coord in &line.0 {
            if !coord.x.is_finite() || !coord.y.is_finite() {
                return Err(OutlineError::InvalidRing { polygon, ring, defect: RingDefect::NonFinite });
            }
            bounds = Some(match bounds {
                Some(mut acc) => { acc.extend(coord); acc }
                None => GeoBounds::at(coord),
            });
        }
    }

    bounds.ok_or(OutlineError::EmptyGeometry)
}
