use geo::Coord;

use crate::geom::{GeoBounds, TargetRect, MIN_SPAN};

/// Maps lon/lat degrees onto canvas pixels, north up.
///
/// A plain value: no captured state, safe to copy and share between draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    bounds: GeoBounds,
    rect: TargetRect,
    lat_span: f64,
    lng_span: f64,
}

impl Projector {
    pub fn new(bounds: GeoBounds, rect: TargetRect) -> Self {
        Self {
            bounds,
            rect,
            lat_span: bounds.lat_span().max(MIN_SPAN),
            lng_span: bounds.lng_span().max(MIN_SPAN),
        }
    }

    #[inline] pub fn bounds(&self) -> &GeoBounds { &self.bounds }

    #[inline] pub fn rect(&self) -> &TargetRect { &self.rect }

    /// Project a latitude/longitude pair to `(x, y)` pixels.
    #[inline]
    pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
        let x = self.rect.offset_x + ((lng - self.bounds.west) / self.lng_span) * self.rect.width;
        let y = self.rect.offset_y + ((self.bounds.north - lat) / self.lat_span) * self.rect.height; // invert vertically
        (x, y)
    }

    /// Project a `geo` coordinate (x = longitude, y = latitude).
    #[inline]
    pub fn project_coord(&self, coord: &Coord<f64>) -> (f64, f64) {
        self.project(coord.y, coord.x)
    }
}
