//! GeoJSON reading and writing for boundary geometries.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OutlineError, Result};
use crate::geom::Geometry;

/// A GeoJSON position: `[lon, lat]` with an optional, ignored altitude.
type Position = Vec<f64>;

/// Wire form of the geometries the engine accepts, tagged on `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum GeoJsonGeometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl TryFrom<GeoJsonGeometry> for Geometry {
    type Error = OutlineError;

    fn try_from(value: GeoJsonGeometry) -> Result<Self> {
        Ok(match value {
            GeoJsonGeometry::Polygon { coordinates } => Geometry::Polygon(parse_polygon(coordinates)?),
            GeoJsonGeometry::MultiPolygon { coordinates } => Geometry::MultiPolygon(MultiPolygon(
                coordinates.into_iter().map(parse_polygon).collect::<Result<_>>()?,
            )),
        })
    }
}

impl From<Geometry> for GeoJsonGeometry {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Polygon(polygon) => GeoJsonGeometry::Polygon { coordinates: polygon_positions(&polygon) },
            Geometry::MultiPolygon(multi) => GeoJsonGeometry::MultiPolygon {
                coordinates: multi.0.iter().map(polygon_positions).collect(),
            },
        }
    }
}

fn parse_polygon(rings: Vec<Vec<Position>>) -> Result<Polygon<f64>> {
    let mut rings = rings.into_iter().map(parse_ring);
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString(Vec::new()));
    Ok(Polygon::new(exterior, rings.collect::<Result<_>>()?))
}

fn parse_ring(positions: Vec<Position>) -> Result<LineString<f64>> {
    positions.into_iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(OutlineError::Parse(format!("position needs at least two numbers, got {position:?}"))),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString)
}

fn polygon_positions(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.0.iter().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

/// Pick the geometry object out of a bare geometry, a `Feature`, or a
/// `{"geometry": ...}` service envelope.
fn geometry_value(value: Value) -> Result<Value> {
    let is_feature = value.get("type").and_then(Value::as_str) == Some("Feature");
    let is_envelope = value.get("type").is_none() && value.get("geometry").is_some();

    if !(is_feature || is_envelope) { return Ok(value) }

    match value.get("geometry") {
        Some(Value::Null) | None => Err(OutlineError::Parse("missing geometry".into())),
        Some(geometry) => Ok(geometry.clone()),
    }
}

/// Parse a Polygon or MultiPolygon from GeoJSON bytes.
pub fn parse_geometry(bytes: &[u8]) -> Result<Geometry> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(serde_json::from_value(geometry_value(value)?)?)
}

/// Parse the geometry endpoint's `{"geometry": {...}}` response.
/// A missing or null `geometry` field is an error.
pub fn parse_geometry_response(bytes: &[u8]) -> Result<Geometry> {
    #[derive(Deserialize)]
    struct Envelope {
        geometry: Option<Geometry>,
    }

    let envelope: Envelope = serde_json::from_slice(bytes)?;
    envelope.geometry.ok_or_else(|| OutlineError::Parse("response has no geometry".into()))
}

/// Serialize a geometry as a GeoJSON geometry object.
pub fn write_geometry(geometry: &Geometry) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(geometry)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_polygon_with_hole() {
        let geometry = parse_geometry(br#"{
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
                [[1, 1], [2, 1], [2, 2], [1, 1]]
            ]
        }"#).unwrap();

        let Geometry::Polygon(polygon) = geometry else { panic!("expected polygon") };
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.interiors().len(), 1);
    }

    #[test]
    fn parses_multipolygon_and_ignores_altitude() {
        let geometry = parse_geometry(br#"{
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0, 12.5], [1, 0, 3], [1, 1, 0]]],
                [[[5, 5], [6, 5], [6, 6]]]
            ]
        }"#).unwrap();

        assert_eq!(geometry.polygons().len(), 2);
        assert_eq!(geometry.polygons()[0].exterior().0[0], Coord { x: 0.0, y: 0.0 });
    }

    #[test]
    fn unwraps_feature_and_envelope() {
        let feature = br#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1]]]}}"#;
        let envelope = br#"{"geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1]]]}}"#;
        assert_eq!(parse_geometry(feature).unwrap(), parse_geometry(envelope).unwrap());
    }

    #[test]
    fn rejects_other_geometry_types() {
        assert!(parse_geometry(br#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
    }

    #[test]
    fn rejects_short_positions() {
        let err = parse_geometry(br#"{"type": "Polygon", "coordinates": [[[0], [1, 0], [1, 1]]]}"#).unwrap_err();
        assert!(err.to_string().contains("two numbers"));
    }

    #[test]
    fn response_without_geometry_is_an_error() {
        assert!(parse_geometry_response(br#"{"geometry": null}"#).is_err());
        assert!(parse_geometry_response(br#"{"error": "Internal server error"}"#).is_err());
        assert!(parse_geometry_response(br#"{"geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1]]]}}"#).is_ok());
    }

    #[test]
    fn written_geometry_parses_back() {
        let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.0)]]);
        let bytes = write_geometry(&geometry).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with(r#"{"type":"Polygon""#));
        assert_eq!(parse_geometry(&bytes).unwrap(), geometry);
    }
}
