use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

use crate::io::geojson::GeoJsonGeometry;

/// Boundary geometry of a division, in lon/lat degrees.
///
/// Rings are stored as `geo` line strings, so they are closed on construction;
/// the closing coordinate is never treated as a separate vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonGeometry", into = "GeoJsonGeometry")]
pub enum Geometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Geometry {
    /// Build a polygon from lon/lat rings; ring 0 is the exterior, the rest are holes.
    pub fn polygon(rings: Vec<Vec<(f64, f64)>>) -> Self {
        Geometry::Polygon(polygon_from_rings(rings))
    }

    /// Build a multipolygon from a list of polygons given as lon/lat rings.
    pub fn multi_polygon(polygons: Vec<Vec<Vec<(f64, f64)>>>) -> Self {
        Geometry::MultiPolygon(MultiPolygon(polygons.into_iter().map(polygon_from_rings).collect()))
    }

    /// Get the constituent polygons in input order.
    #[inline]
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            Geometry::Polygon(polygon) => std::slice::from_ref(polygon),
            Geometry::MultiPolygon(multi) => &multi.0,
        }
    }

    /// Iterate `(polygon index, ring index, ring)` over every ring, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = (usize, usize, &LineString<f64>)> {
        self.polygons().iter().enumerate()
            .flat_map(|(p, polygon)| polygon_rings(polygon).enumerate().map(move |(r, ring)| (p, r, ring)))
    }

    /// Total number of rings, holes included.
    pub fn num_rings(&self) -> usize {
        self.polygons().iter().map(|polygon| 1 + polygon.interiors().len()).sum()
    }

    /// Get the GeoJSON type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

impl From<Polygon<f64>> for Geometry {
    fn from(polygon: Polygon<f64>) -> Self { Geometry::Polygon(polygon) }
}

impl From<MultiPolygon<f64>> for Geometry {
    fn from(multi: MultiPolygon<f64>) -> Self { Geometry::MultiPolygon(multi) }
}

/// Exterior ring followed by the holes.
#[inline]
pub(crate) fn polygon_rings(polygon: &Polygon<f64>) -> impl Iterator<Item = &LineString<f64>> {
    std::iter::once(polygon.exterior()).chain(polygon.interiors().iter())
}

/// The drawable vertices of a ring, without the closing duplicate.
#[inline]
pub(crate) fn ring_vertices(ring: &LineString<f64>) -> &[Coord<f64>] {
    match ring.0.as_slice() {
        [first, .., last] if first == last => &ring.0[..ring.0.len() - 1],
        coords => coords,
    }
}

fn polygon_from_rings(rings: Vec<Vec<(f64, f64)>>) -> Polygon<f64> {
    let mut rings = rings.into_iter()
        .map(|ring| LineString(ring.into_iter().map(|(x, y)| Coord { x, y }).collect()));
    let exterior = rings.next().unwrap_or_else(|| LineString(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_duplicate_is_not_a_vertex() {
        let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]]);
        let (_, _, ring) = geometry.rings().next().unwrap();
        assert_eq!(ring_vertices(ring).len(), 3);
    }

    #[test]
    fn open_rings_are_closed_on_construction() {
        let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]]);
        let (_, _, ring) = geometry.rings().next().unwrap();
        assert_eq!(ring.0.len(), 4);
        assert_eq!(ring_vertices(ring).len(), 3);
    }

    #[test]
    fn rings_are_enumerated_per_polygon() {
        let square = vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        let hole = vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)];
        let island = vec![(10.0, 10.0), (11.0, 10.0), (11.0, 11.0)];
        let geometry = Geometry::multi_polygon(vec![vec![square, hole], vec![island]]);

        let indices = geometry.rings().map(|(p, r, _)| (p, r)).collect::<Vec<_>>();
        assert_eq!(indices, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(geometry.num_rings(), 3);
        assert_eq!(geometry.type_name(), "MultiPolygon");
    }

    #[test]
    fn polygon_without_rings_has_empty_exterior() {
        let geometry = Geometry::polygon(Vec::new());
        assert!(geometry.polygons()[0].exterior().0.is_empty());
    }
}
