//! Stroke-only rasterization of polygon rings through a projector.

use crate::error::{OutlineError, Result, RingDefect};
use crate::geom::{ring_vertices, Geometry, Projector};
use crate::render::{DrawCommand, RecordingSurface, StrokeStyle, Surface};

/// Check every ring before anything is drawn: at least 3 vertices, all finite.
pub fn validate(geometry: &Geometry) -> Result<()> {
    if geometry.rings().all(|(_, _, ring)| ring.0.is_empty()) { return Err(OutlineError::EmptyGeometry) }

    for (polygon, ring, line) in geometry.rings() {
        let vertices = ring_vertices(line);
        if vertices.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(OutlineError::InvalidRing { polygon, ring, defect: RingDefect::NonFinite });
        }
        if vertices.len() < 3 {
            return Err(OutlineError::InvalidRing { polygon, ring, defect: RingDefect::TooFewVertices(vertices.len()) });
        }
    }
    Ok(())
}

/// Draw every ring of every polygon as its own closed, stroked path.
///
/// Holes are stroked exactly like exteriors and nothing is filled. An invalid
/// ring fails the whole call before the first command reaches the surface.
pub fn rasterize<S: Surface + ?Sized>(geometry: &Geometry, projector: &Projector, style: &StrokeStyle, surface: &mut S) -> Result<()> {
    validate(geometry)?;
    stroke_rings(geometry, projector, style, surface);
    Ok(())
}

/// Stroke every ring of an already validated geometry.
pub(crate) fn stroke_rings<S: Surface + ?Sized>(geometry: &Geometry, projector: &Projector, style: &StrokeStyle, surface: &mut S) {
    for (_, _, ring) in geometry.rings() {
        let mut points = ring_vertices(ring).iter().map(|coord| projector.project_coord(coord));
        if let Some((x, y)) = points.next() {
            surface.move_to(x, y);
            for (x, y) in points {
                surface.line_to(x, y);
            }
        }
        surface.close_path();
        surface.stroke(style);
    }
}

/// Rasterize into a fresh command list.
pub fn rasterize_commands(geometry: &Geometry, projector: &Projector, style: &StrokeStyle) -> Result<Vec<DrawCommand>> {
    let mut surface = RecordingSurface::new();
    rasterize(geometry, projector, style, &mut surface)?;
    Ok(surface.into_commands())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{GeoBounds, TargetRect};

    fn unit_projector() -> Projector {
        Projector::new(
            GeoBounds::new(1.0, 0.0, 1.0, 0.0),
            TargetRect { offset_x: 0.0, offset_y: 0.0, width: 100.0, height: 100.0 },
        )
    }

    #[test]
    fn ring_is_moved_lined_closed_and_stroked() {
        let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]]);
        let commands = rasterize_commands(&geometry, &unit_projector(), &StrokeStyle::default()).unwrap();

        assert_eq!(commands, vec![
            DrawCommand::MoveTo { x: 0.0, y: 100.0 },
            DrawCommand::LineTo { x: 0.0, y: 0.0 },
            DrawCommand::LineTo { x: 100.0, y: 100.0 },
            DrawCommand::ClosePath,
            DrawCommand::Stroke(StrokeStyle::default()),
        ]);
    }

    #[test]
    fn multipolygon_parts_are_drawn_in_order() {
        let geometry = Geometry::multi_polygon(vec![
            vec![vec![(0.0, 0.0), (0.5, 0.0), (0.5, 0.5)]],
            vec![vec![(1.0, 1.0), (0.5, 1.0), (0.5, 0.5)]],
        ]);
        let mut surface = RecordingSurface::new();
        rasterize(&geometry, &unit_projector(), &StrokeStyle::default(), &mut surface).unwrap();

        assert_eq!(surface.stroke_count(), 2);
        assert_eq!(surface.vertices().first(), Some(&(0.0, 100.0)));
        assert_eq!(surface.vertices()[3], (100.0, 0.0));
    }

    #[test]
    fn short_ring_aborts_without_drawing() {
        let geometry = Geometry::multi_polygon(vec![
            vec![vec![(0.0, 0.0), (0.5, 0.0), (0.5, 0.5)]],
            vec![vec![(1.0, 1.0), (0.5, 1.0)]],
        ]);
        let mut surface = RecordingSurface::new();
        let err = rasterize(&geometry, &unit_projector(), &StrokeStyle::default(), &mut surface).unwrap_err();

        assert!(matches!(err, OutlineError::InvalidRing { polygon: 1, ring: 0, defect: RingDefect::TooFewVertices(2) }));
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn empty_hole_is_invalid() {
        let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], Vec::new()]);
        assert!(matches!(
            validate(&geometry),
            Err(OutlineError::InvalidRing { polygon: 0, ring: 1, defect: RingDefect::TooFewVertices(0) })
        ));
    }

    #[test]
    fn geometry_without_coordinates_is_empty() {
        assert!(matches!(validate(&Geometry::polygon(vec![Vec::new()])), Err(OutlineError::EmptyGeometry)));
        assert!(matches!(validate(&Geometry::multi_polygon(Vec::new())), Err(OutlineError::EmptyGeometry)));
    }

    #[test]
    fn infinite_vertex_is_invalid() {
        let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (f64::INFINITY, 0.0), (1.0, 1.0)]]);
        assert!(matches!(validate(&geometry), Err(OutlineError::InvalidRing { defect: RingDefect::NonFinite, .. })));
    }

    #[test]
    fn collinear_ring_still_draws() {
        let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)]]);
        let commands = rasterize_commands(&geometry, &unit_projector(), &StrokeStyle::default()).unwrap();
        assert_eq!(commands.len(), 5);
    }
}
