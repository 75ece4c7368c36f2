use egui::{Color32, Pos2};
use sketchpad::{ColorParseError, DrawingSurface, StrokeId};

// Helper to draw a full gesture: pointer down, a move per extra point, pointer up
fn draw(surface: &mut DrawingSurface, points: &[(f32, f32)]) -> StrokeId {
    let (first, rest) = points.split_first().expect("at least one point");
    surface.on_pointer_down(Pos2::new(first.0, first.1));
    for (x, y) in rest {
        surface.on_pointer_move(Pos2::new(*x, *y));
    }
    surface.on_pointer_up();
    surface.committed_strokes().last().unwrap().id()
}

fn committed_ids(surface: &DrawingSurface) -> Vec<StrokeId> {
    surface.committed_strokes().iter().map(|s| s.id()).collect()
}

fn undone_ids(surface: &DrawingSurface) -> Vec<StrokeId> {
    surface.undo_stack().iter().map(|s| s.id()).collect()
}

#[test]
fn test_gesture_adds_one_stroke_with_origin_plus_moves() {
    let mut surface = DrawingSurface::new(1.0);
    for moves in 0..5 {
        let before = surface.committed_strokes().len();
        surface.on_pointer_down(Pos2::new(0.0, 0.0));
        for i in 0..moves {
            surface.on_pointer_move(Pos2::new(i as f32, 1.0));
        }
        surface.on_pointer_up();

        assert_eq!(surface.committed_strokes().len(), before + 1);
        assert_eq!(surface.committed_strokes().last().unwrap().len(), 1 + moves);
        assert!(!surface.is_drawing());
    }
}

#[test]
fn test_red_three_point_stroke() {
    let mut surface = DrawingSurface::new(1.0);
    surface.set_color("#FF0000").unwrap();
    draw(&mut surface, &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);

    let stroke = &surface.committed_strokes()[0];
    assert_eq!(stroke.color(), Color32::RED);
    assert_eq!(stroke.points().len(), 3);
}

#[test]
fn test_undo_moves_last_stroke_to_undo_stack() {
    let mut surface = DrawingSurface::new(1.0);
    let a = draw(&mut surface, &[(0.0, 0.0), (5.0, 5.0)]);
    let b = draw(&mut surface, &[(10.0, 0.0), (15.0, 5.0)]);

    surface.undo();
    assert_eq!(committed_ids(&surface), vec![a]);
    assert_eq!(undone_ids(&surface), vec![b]);

    surface.undo();
    assert!(surface.committed_strokes().is_empty());
    assert_eq!(undone_ids(&surface), vec![b, a]);
}

#[test]
fn test_undo_then_redo_restores_same_strokes() {
    let mut surface = DrawingSurface::new(1.0);
    draw(&mut surface, &[(0.0, 0.0), (5.0, 5.0)]);
    draw(&mut surface, &[(1.0, 0.0), (6.0, 5.0), (7.0, 7.0)]);
    let before = committed_ids(&surface);
    let before_points: Vec<Vec<Pos2>> = surface
        .committed_strokes()
        .iter()
        .map(|s| s.points().to_vec())
        .collect();

    surface.undo();
    surface.redo();

    assert_eq!(committed_ids(&surface), before);
    let after_points: Vec<Vec<Pos2>> = surface
        .committed_strokes()
        .iter()
        .map(|s| s.points().to_vec())
        .collect();
    assert_eq!(after_points, before_points);
    assert!(surface.undo_stack().is_empty());
}

#[test]
fn test_undo_on_empty_is_noop() {
    let mut surface = DrawingSurface::new(1.0);
    surface.undo();
    assert!(surface.committed_strokes().is_empty());
    assert!(surface.undo_stack().is_empty());
}

#[test]
fn test_redo_on_empty_is_noop() {
    let mut surface = DrawingSurface::new(1.0);
    let a = draw(&mut surface, &[(0.0, 0.0), (1.0, 1.0)]);
    surface.redo();
    assert_eq!(committed_ids(&surface), vec![a]);
    assert!(surface.undo_stack().is_empty());
}

#[test]
fn test_new_stroke_keeps_redo_available() {
    let mut surface = DrawingSurface::new(1.0);
    let a = draw(&mut surface, &[(0.0, 0.0), (1.0, 1.0)]);
    surface.undo();
    let b = draw(&mut surface, &[(2.0, 2.0), (3.0, 3.0)]);

    assert_eq!(undone_ids(&surface), vec![a]);
    surface.redo();
    // Redone stroke is painted on top of the newer one
    assert_eq!(committed_ids(&surface), vec![b, a]);
}

#[test]
fn test_stroke_lives_in_exactly_one_list() {
    let mut surface = DrawingSurface::new(1.0);
    let ids: Vec<StrokeId> = (0..4)
        .map(|i| draw(&mut surface, &[(i as f32, 0.0), (i as f32, 9.0)]))
        .collect();

    for op in [0, 0, 1, 0, 1, 1, 1, 0] {
        if op == 0 {
            surface.undo();
        } else {
            surface.redo();
        }
        let mut all = committed_ids(&surface);
        all.extend(undone_ids(&surface));
        all.sort_by_key(|id| id.to_string());
        let mut expected = ids.clone();
        expected.sort_by_key(|id| id.to_string());
        assert_eq!(all, expected);
    }
}

#[test]
fn test_invalid_color_keeps_current() {
    let mut surface = DrawingSurface::new(1.0);
    surface.set_color("#00FF00").unwrap();

    let err: ColorParseError = surface.set_color("notacolor").unwrap_err();
    assert_eq!(err.input, "notacolor");
    assert_eq!(surface.current_color(), Color32::from_rgb(0, 255, 0));
}

#[test]
fn test_color_applies_to_next_stroke_only() {
    let mut surface = DrawingSurface::new(1.0);
    draw(&mut surface, &[(0.0, 0.0), (1.0, 1.0)]);
    surface.set_color("blue").unwrap();
    draw(&mut surface, &[(0.0, 0.0), (1.0, 1.0)]);

    let strokes = surface.committed_strokes();
    assert_eq!(strokes[0].color(), Color32::BLACK);
    assert_eq!(strokes[1].color(), Color32::from_rgb(0, 0, 255));
}

#[test]
fn test_composite_is_idempotent() {
    let mut surface = DrawingSurface::new(1.0);
    surface.on_resize(32, 24);
    surface.set_brush_size(3.0);
    draw(&mut surface, &[(2.0, 2.0), (30.0, 20.0), (5.0, 20.0)]);
    surface.on_pointer_down(Pos2::new(16.0, 0.0));
    surface.on_pointer_move(Pos2::new(16.0, 24.0));

    let first = surface.composite_to_image().unwrap();
    let second = surface.composite_to_image().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_undo_removes_stroke_pixels() {
    let mut surface = DrawingSurface::new(1.0);
    surface.on_resize(20, 20);
    surface.set_brush_size(4.0);
    let blank = surface.composite_to_image().unwrap();

    draw(&mut surface, &[(0.0, 10.0), (20.0, 10.0)]);
    assert_ne!(surface.composite_to_image().unwrap(), blank);

    surface.undo();
    assert_eq!(surface.composite_to_image().unwrap(), blank);
}

#[test]
fn test_resize_keeps_absolute_stroke_positions() {
    let mut surface = DrawingSurface::new(1.0);
    surface.on_resize(40, 40);
    surface.set_brush_size(4.0);
    draw(&mut surface, &[(0.0, 10.0), (40.0, 10.0)]);
    let points_before = surface.committed_strokes()[0].points().to_vec();

    surface.on_resize(20, 60);
    let image = surface.composite_to_image().unwrap();

    assert_eq!(image.dimensions(), (20, 60));
    assert_eq!(surface.committed_strokes()[0].points(), points_before.as_slice());
    // Still drawn at y=10, not rescaled to the new height
    assert_eq!(image.get_pixel(10, 10).0, [0, 0, 0, 255]);
    assert_eq!(image.get_pixel(10, 30).0, [255, 255, 255, 255]);
}

#[test]
fn test_degenerate_coordinates_are_stored_as_is() {
    let mut surface = DrawingSurface::new(1.0);
    surface.on_resize(10, 10);
    surface.on_pointer_down(Pos2::new(-50.0, 1e9));
    surface.on_pointer_move(Pos2::new(f32::NAN, 3.0));
    surface.on_pointer_up();

    let stroke = &surface.committed_strokes()[0];
    assert_eq!(stroke.points()[0], Pos2::new(-50.0, 1e9));
    assert!(stroke.points()[1].x.is_nan());
    // Rendering must not panic
    let _ = surface.composite_to_image().unwrap();
}

#[test]
fn test_surfaces_are_independent() {
    let mut first = DrawingSurface::new(1.0);
    let mut second = DrawingSurface::new(2.0);
    first.set_color("red").unwrap();
    first.set_brush_size(7.0);

    assert_eq!(second.current_color(), Color32::BLACK);
    second.set_brush_size(7.0);
    assert_eq!(first.current_thickness(), 7.0);
    assert_eq!(second.current_thickness(), 14.0);
}
