#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::coords::ClipPoint;

fn core_with_viewport() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(400.0, 400.0);
    core
}

fn pt(x: f64, y: f64) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_shape_is_point() {
    let core = EngineCore::new();
    assert_eq!(core.shape(), ShapeKind::Point);
}

#[test]
fn no_preview_before_pointer_moves() {
    let core = core_with_viewport();
    assert!(core.preview().is_none());
}

// =============================================================
// Pointer flow
// =============================================================

#[test]
fn pointer_move_builds_preview_at_clip_center() {
    let mut core = core_with_viewport();
    core.set_shape(ShapeKind::Square);

    // Screen (300, 100) on a 400x400 canvas is clip (0.5, 0.5).
    let effect = core.on_pointer_move(pt(300.0, 100.0));
    assert_eq!(effect, Effect::None);

    let expected = ShapeKind::Square.vertices(ClipPoint::new(0.5, 0.5));
    assert_eq!(core.preview(), Some(expected.as_slice()));
}

#[test]
fn click_stamps_the_preview() {
    let mut core = core_with_viewport();
    core.set_shape(ShapeKind::Triangle);
    core.on_pointer_move(pt(200.0, 200.0));

    let effect = core.on_pointer_down();
    let expected = ShapeKind::Triangle.vertices(ClipPoint::new(0.0, 0.0));
    assert_eq!(effect, Effect::SceneDirty(expected.clone()));
    assert_eq!(core.scene.stamps_for(ShapeKind::Triangle), &[expected]);
}

#[test]
fn click_without_move_is_ignored() {
    let mut core = core_with_viewport();
    let effect = core.on_pointer_down();
    assert_eq!(effect, Effect::None);
    assert!(core.scene.is_empty());
}

#[test]
fn click_restamps_last_preview_until_pointer_moves_again() {
    let mut core = core_with_viewport();
    core.on_pointer_move(pt(100.0, 100.0));
    core.on_pointer_down();
    core.on_pointer_down();
    assert_eq!(core.scene.stamps_for(ShapeKind::Point).len(), 2);
}

#[test]
fn dirty_buffer_equals_scene_flatten() {
    let mut core = core_with_viewport();
    core.set_shape(ShapeKind::HLine);
    core.on_pointer_move(pt(120.0, 80.0));
    core.on_pointer_down();
    core.set_shape(ShapeKind::Point);
    core.on_pointer_move(pt(50.0, 350.0));

    let Effect::SceneDirty(buffer) = core.on_pointer_down() else {
        panic!("expected a dirty scene");
    };
    assert_eq!(buffer, core.scene.flatten());
}

// =============================================================
// Shape selection
// =============================================================

#[test]
fn set_shape_invalidates_stale_preview() {
    let mut core = core_with_viewport();
    core.on_pointer_move(pt(200.0, 200.0));
    core.set_shape(ShapeKind::VLine);

    // The old preview was built for Point; clicking now must not stamp it.
    assert!(core.preview().is_none());
    assert_eq!(core.on_pointer_down(), Effect::None);
}

#[test]
fn set_shape_changes_what_gets_stamped() {
    let mut core = core_with_viewport();
    core.set_shape(ShapeKind::Square);
    core.on_pointer_move(pt(200.0, 200.0));
    core.on_pointer_down();

    assert!(core.scene.stamps_for(ShapeKind::Point).is_empty());
    assert_eq!(core.scene.stamps_for(ShapeKind::Square).len(), 1);
}

// =============================================================
// Clearing and snapshots
// =============================================================

#[test]
fn clear_empties_scene_and_reports_dirty() {
    let mut core = core_with_viewport();
    core.on_pointer_move(pt(10.0, 10.0));
    core.on_pointer_down();

    let effect = core.clear();
    assert_eq!(effect, Effect::SceneDirty(Vec::new()));
    assert!(core.scene.is_empty());
}

#[test]
fn clear_preserves_the_preview() {
    let mut core = core_with_viewport();
    core.on_pointer_move(pt(10.0, 10.0));
    core.clear();
    assert!(core.preview().is_some());
}

#[test]
fn snapshot_round_trips_through_core() {
    let mut source = core_with_viewport();
    source.set_shape(ShapeKind::Triangle);
    source.on_pointer_move(pt(300.0, 300.0));
    source.on_pointer_down();
    source.set_shape(ShapeKind::Point);
    source.on_pointer_move(pt(40.0, 60.0));
    source.on_pointer_down();

    let mut restored = EngineCore::new();
    let effect = restored.load_snapshot(source.snapshot()).unwrap();

    assert_eq!(effect, Effect::SceneDirty(source.scene.flatten()));
    assert_eq!(restored.scene.flatten(), source.scene.flatten());
}

#[test]
fn load_snapshot_rejects_malformed_geometry() {
    let mut core = core_with_viewport();
    core.on_pointer_move(pt(10.0, 10.0));
    core.on_pointer_down();
    let before = core.scene.flatten();

    let result = core.load_snapshot(vec![crate::scene::StampRecord {
        kind: ShapeKind::HLine,
        vertices: vec![0.0; 6],
    }]);

    assert!(result.is_err());
    assert_eq!(core.scene.flatten(), before);
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn viewport_feeds_the_clip_transform() {
    let mut core = EngineCore::new();
    core.set_viewport(100.0, 100.0);
    core.on_pointer_move(pt(75.0, 25.0));
    let expected = ShapeKind::Point.vertices(ClipPoint::new(0.5, 0.5));
    assert_eq!(core.preview(), Some(expected.as_slice()));
}

#[test]
fn viewport_refresh_rescales_the_preview() {
    // A canvas resize between pointer events must feed the next move's
    // transform, not the size captured at startup.
    let mut core = EngineCore::new();
    core.set_viewport(100.0, 100.0);
    core.on_pointer_move(pt(75.0, 25.0));
    let narrow = ShapeKind::Point.vertices(ClipPoint::new(0.5, 0.5));
    assert_eq!(core.preview(), Some(narrow.as_slice()));

    core.set_viewport(300.0, 100.0);
    core.on_pointer_move(pt(75.0, 25.0));
    let wide = ShapeKind::Point.vertices(ClipPoint::new(-0.5, 0.5));
    assert_eq!(core.preview(), Some(wide.as_slice()));
}

#[test]
fn zero_viewport_previews_at_origin() {
    let mut core = EngineCore::new();
    core.on_pointer_move(pt(999.0, 999.0));
    let expected = ShapeKind::Point.vertices(ClipPoint::new(0.0, 0.0));
    assert_eq!(core.preview(), Some(expected.as_slice()));
}
