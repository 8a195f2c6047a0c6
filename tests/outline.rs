// Integration tests for the outline pipeline:
//   compute_bounds, compute_layout, Projector and rasterize, end to end
//   against the recording, SVG and pixmap surfaces.

use division_outline::geom::Fit;
use division_outline::render::{rasterize_commands, DrawCommand, PixmapSurface, RecordingSurface, Rgb, SvgSurface};
use division_outline::{
    compute_bounds, compute_layout, rasterize, render_boundary_outline, Geometry, LayoutOptions, OutlineError,
    RenderOptions, StrokeStyle,
};

fn unit_square_at_origin() -> Geometry {
    Geometry::polygon(vec![vec![(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5), (-0.5, -0.5)]])
}

fn square_with_hole() -> Geometry {
    Geometry::polygon(vec![
        vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0), (4.0, 4.0)],
    ])
}

fn samples() -> Vec<Geometry> {
    vec![
        unit_square_at_origin(),
        square_with_hole(),
        Geometry::polygon(vec![vec![(-124.4, 32.5), (-114.1, 32.7), (-114.6, 42.0), (-124.2, 42.0)]]),
        Geometry::polygon(vec![vec![(-97.9, 30.1), (-97.6, 30.1), (-97.6, 30.5)]]),
        Geometry::multi_polygon(vec![
            vec![vec![(-80.0, 25.0), (-79.0, 25.0), (-79.0, 26.0)]],
            vec![vec![(-70.0, 40.0), (-69.0, 40.0), (-69.0, 47.0), (-70.0, 47.0)]],
        ]),
        // long thin strip
        Geometry::polygon(vec![vec![(0.0, 0.0), (40.0, 0.0), (40.0, 0.5), (0.0, 0.5)]]),
    ]
}

#[test]
fn bounds_enclose_every_coordinate() {
    for geometry in samples() {
        let bounds = compute_bounds(&geometry).unwrap();
        assert!(bounds.north >= bounds.south);
        assert!(bounds.east >= bounds.west);
        for (_, _, ring) in geometry.rings() {
            for coord in &ring.0 {
                assert!(bounds.contains(coord), "{coord:?} outside {bounds:?}");
            }
        }
    }
}

#[test]
fn layout_fits_canvas_and_keeps_aspect() {
    let canvases = [(800.0, 1000.0), (1000.0, 1000.0), (2550.0, 3300.0), (1920.0, 400.0)];
    for geometry in samples() {
        let bounds = compute_bounds(&geometry).unwrap();
        for (width, height) in canvases {
            let layout = compute_layout(&bounds, &LayoutOptions::default(), width, height).unwrap();
            let rect = layout.rect;
            assert!(rect.offset_x >= 0.0 && rect.offset_y >= 0.0);
            assert!(rect.right() <= width + 1e-9 && rect.bottom() <= height + 1e-9);
            assert!((rect.aspect() - layout.padded.aspect()).abs() < 1e-6);
        }
    }
}

#[test]
fn padded_corners_project_onto_rect_corners() {
    for geometry in samples() {
        let bounds = compute_bounds(&geometry).unwrap();
        let layout = compute_layout(&bounds, &LayoutOptions::default(), 800.0, 1000.0).unwrap();
        let projector = layout.projector();

        for (geo, (x, y)) in layout.padded.corners().iter().zip(layout.rect.corners()) {
            let (px, py) = projector.project_coord(geo);
            assert!((px - x).abs() < 1.0 && (py - y).abs() < 1.0, "({px}, {py}) vs ({x}, {y})");
        }
    }
}

#[test]
fn rasterize_is_deterministic() {
    for geometry in samples() {
        let bounds = compute_bounds(&geometry).unwrap();
        let projector = compute_layout(&bounds, &LayoutOptions::default(), 800.0, 1000.0).unwrap().projector();
        let style = StrokeStyle::default();

        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        rasterize(&geometry, &projector, &style, &mut first).unwrap();
        rasterize(&geometry, &projector, &style, &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.into_commands(), rasterize_commands(&geometry, &projector, &style).unwrap());
    }
}

#[test]
fn unit_square_ties_to_height() {
    let bounds = compute_bounds(&unit_square_at_origin()).unwrap();
    let layout = compute_layout(&bounds, &LayoutOptions::default(), 1000.0, 1000.0).unwrap();

    assert_eq!(layout.fit, Fit::Height);
    assert!((layout.rect.width - 800.0).abs() < 1e-9);
    assert!((layout.rect.height - 800.0).abs() < 1e-9);
    assert!((layout.rect.offset_x - 100.0).abs() < 1e-9);
    assert!((layout.rect.offset_y - 100.0).abs() < 1e-9);
}

#[test]
fn triangle_fills_fitted_rect() {
    let triangle = Geometry::polygon(vec![vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]]);
    let options = RenderOptions {
        canvas_width: 200.0,
        canvas_height: 200.0,
        scale: 1.0,
        layout: LayoutOptions { padding: 0.0, ..LayoutOptions::default() },
        ..RenderOptions::screen()
    };

    let mut surface = RecordingSurface::new();
    let layout = render_boundary_outline(&triangle, &options, &mut surface).unwrap();
    assert_eq!((layout.rect.offset_x, layout.rect.offset_y, layout.rect.width, layout.rect.height), (20.0, 20.0, 160.0, 160.0));

    let commands = surface.commands();
    assert!(matches!(commands[0], DrawCommand::Background(_)));
    assert_eq!(&commands[1..], &[
        DrawCommand::MoveTo { x: 20.0, y: 180.0 },
        DrawCommand::LineTo { x: 20.0, y: 20.0 },
        DrawCommand::LineTo { x: 180.0, y: 180.0 },
        DrawCommand::ClosePath,
        DrawCommand::Stroke(options.stroke),
    ]);
}

#[test]
fn hole_is_its_own_closed_path() {
    let with_hole = square_with_hole();
    let outer_only = Geometry::polygon(vec![with_hole.polygons()[0].exterior().0.iter().map(|c| (c.x, c.y)).collect()]);
    assert_eq!(compute_bounds(&with_hole).unwrap(), compute_bounds(&outer_only).unwrap());

    let mut surface = RecordingSurface::new();
    render_boundary_outline(&with_hole, &RenderOptions::screen(), &mut surface).unwrap();
    assert_eq!(surface.stroke_count(), 2);

    let closes = surface.commands().iter().filter(|c| matches!(c, DrawCommand::ClosePath)).count();
    let moves = surface.commands().iter().filter(|c| matches!(c, DrawCommand::MoveTo { .. })).count();
    assert_eq!((moves, closes), (2, 2));
}

#[test]
fn short_ring_aborts_without_output() {
    let geometry = Geometry::multi_polygon(vec![
        vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]],
        vec![vec![(5.0, 5.0), (6.0, 6.0)]],
    ]);
    let mut surface = RecordingSurface::new();
    let err = render_boundary_outline(&geometry, &RenderOptions::screen(), &mut surface).unwrap_err();

    assert!(matches!(err, OutlineError::InvalidRing { polygon: 1, ring: 0, .. }));
    assert!(surface.commands().is_empty());
}

#[test]
fn empty_geometry_is_reported() {
    let geometry = Geometry::multi_polygon(vec![]);
    let mut surface = RecordingSurface::new();
    assert!(matches!(
        render_boundary_outline(&geometry, &RenderOptions::screen(), &mut surface),
        Err(OutlineError::EmptyGeometry)
    ));
}

#[test]
fn svg_has_one_path_per_ring() {
    let mut surface = SvgSurface::new(800.0, 1000.0, 2.0);
    render_boundary_outline(&square_with_hole(), &RenderOptions::screen(), &mut surface).unwrap();
    let svg = surface.to_svg_string();

    assert_eq!(svg.matches("<path").count(), 2);
    assert!(svg.contains(r#"width="1600""#));
}

#[test]
fn pixmap_strokes_outline_at_scale() {
    // Square 0..1 on the screen preset fits to width: left edge at x = 100 logical, y 200..800.
    let geometry = Geometry::polygon(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]]);
    let options = RenderOptions::screen();
    let (width, height) = options.physical_size().unwrap();
    let mut surface = PixmapSurface::new(width, height, options.scale).unwrap();

    let layout = render_boundary_outline(&geometry, &options, &mut surface).unwrap();
    assert_eq!(layout.fit, Fit::Width);
    assert_eq!(surface.pixel(200, 1000), Some(Rgb::BLACK));
    assert_eq!(surface.pixel(10, 10), Some(Rgb::WHITE));
    assert_eq!(surface.pixel(800, 1000), Some(Rgb::WHITE));
}
