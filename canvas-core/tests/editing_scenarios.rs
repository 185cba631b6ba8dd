//! Editing Scenario Tests
//!
//! End-to-end flows through the public workspace API:
//! - Drop, drag and alignment snapping
//! - Locked elements
//! - Breakpoint overrides and deletion
//! - Snapshot persistence

use canvas_core::{
    normalize_rotation, resize_rect, Breakpoint, ElementKind, GuideOrientation, InputEvent, Point,
    PointerTarget, Rect, ResizeHandle, SnapshotStore, StylePatch, Workspace, MIN_ELEMENT_SIZE,
};

/// Workspace with an 80x80 rectangle at (100, 100) and a default circle
/// dropped at (300, 140).
fn rect_and_circle() -> (Workspace, canvas_core::ElementId, canvas_core::ElementId) {
    let mut workspace = Workspace::new();
    let rect = workspace.drop_shape(ElementKind::Rectangle, Point::new(140.0, 140.0));
    workspace
        .write_style(rect, &StylePatch::geometry(Rect::new(100.0, 100.0, 80.0, 80.0)))
        .expect("resize rectangle");
    let circle = workspace.drop_shape(ElementKind::Circle, Point::new(300.0, 140.0));
    (workspace, rect, circle)
}

// ----------------------------------------------------------------------------
// Drag + snap
// ----------------------------------------------------------------------------

#[test]
fn test_circle_snaps_to_rectangle_right_edge() {
    let (mut workspace, _, circle) = rect_and_circle();
    assert_eq!(
        workspace.store().get(circle).expect("circle").rect(),
        Rect::new(260.0, 100.0, 80.0, 80.0)
    );

    assert!(workspace.begin_drag(circle, Point::new(300.0, 140.0)));
    workspace.pointer_move(Point::new(222.0, 140.0));

    let during = workspace.effective_element(circle).expect("circle");
    assert_eq!(during.style.x.to_bits(), 180.0_f32.to_bits());
    let vertical = workspace
        .guides()
        .iter()
        .find(|g| g.orientation == GuideOrientation::Vertical)
        .expect("vertical guide during drag");
    assert!((vertical.position - 180.0).abs() < f32::EPSILON);

    workspace.pointer_release();
    assert!(workspace.guides().is_empty());
    assert!(workspace.session().is_none());
    let after = workspace.store().get(circle).expect("circle");
    assert_eq!(after.style.x.to_bits(), 180.0_f32.to_bits());
}

#[test]
fn test_event_stream_drag() {
    let (mut workspace, _, circle) = rect_and_circle();
    let events = [
        InputEvent::PointerDown {
            target: PointerTarget::Body { element: circle },
            at: Point::new(300.0, 140.0),
        },
        InputEvent::PointerMove {
            at: Point::new(260.0, 140.0),
        },
        InputEvent::PointerMove {
            at: Point::new(222.0, 140.0),
        },
        InputEvent::PointerUp,
    ];
    for event in &events {
        workspace.process_event(event);
    }
    let element = workspace.store().get(circle).expect("circle");
    assert!((element.style.x - 180.0).abs() < f32::EPSILON);
    assert!(workspace.guides().is_empty());
}

#[test]
fn test_no_snap_without_alignment_assist() {
    let (mut workspace, _, circle) = rect_and_circle();
    workspace.canvas_mut().alignment_assist = false;

    assert!(workspace.begin_drag(circle, Point::new(300.0, 140.0)));
    workspace.pointer_move(Point::new(222.0, 140.0));
    assert!(workspace.guides().is_empty());
    workspace.pointer_release();

    let element = workspace.store().get(circle).expect("circle");
    assert!((element.style.x - 182.0).abs() < f32::EPSILON);
}

// ----------------------------------------------------------------------------
// Locking
// ----------------------------------------------------------------------------

#[test]
fn test_locked_element_does_not_move() {
    let (mut workspace, rect, _) = rect_and_circle();
    workspace
        .apply_edit(rect, canvas_core::PropertyEdit::Locked(true))
        .expect("lock");

    workspace.process_event(&InputEvent::PointerDown {
        target: PointerTarget::Body { element: rect },
        at: Point::new(140.0, 140.0),
    });
    workspace.process_event(&InputEvent::PointerMove {
        at: Point::new(400.0, 400.0),
    });
    workspace.process_event(&InputEvent::PointerUp);

    let element = workspace.store().get(rect).expect("rect");
    assert_eq!(element.rect(), Rect::new(100.0, 100.0, 80.0, 80.0));
    assert!(!workspace
        .begin_resize(rect, ResizeHandle::Se, Point::new(180.0, 180.0)));
}

// ----------------------------------------------------------------------------
// Breakpoints
// ----------------------------------------------------------------------------

#[test]
fn test_tablet_drag_leaves_desktop_untouched() {
    let (mut workspace, _, circle) = rect_and_circle();
    workspace.set_breakpoint(Breakpoint::Tablet);
    assert!(workspace.begin_drag(circle, Point::new(300.0, 140.0)));
    workspace.pointer_move(Point::new(300.0, 440.0));
    workspace.pointer_release();

    let desktop = workspace
        .store()
        .effective_style(circle, Breakpoint::Desktop)
        .expect("desktop");
    let tablet = workspace
        .store()
        .effective_style(circle, Breakpoint::Tablet)
        .expect("tablet");
    assert!((desktop.y - 100.0).abs() < f32::EPSILON);
    assert!((tablet.y - 400.0).abs() < f32::EPSILON);

    workspace.delete(circle).expect("delete");
    assert!(!workspace.store().overrides().references(circle));
}

#[test]
fn test_ids_not_reused_after_delete() {
    let (mut workspace, rect, circle) = rect_and_circle();
    workspace.delete(circle).expect("delete");
    let next = workspace.drop_shape(ElementKind::Square, Point::new(0.0, 0.0));
    assert!(next > circle && next > rect);
}

// ----------------------------------------------------------------------------
// Persistence
// ----------------------------------------------------------------------------

#[test]
fn test_snapshot_restore_preserves_id_counter() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SnapshotStore::with_data_dir(dir.path()).expect("store");

    let (mut workspace, _, circle) = rect_and_circle();
    workspace.set_breakpoint(Breakpoint::Mobile);
    workspace
        .write_style(circle, &StylePatch::position(10.0, 10.0))
        .expect("override");
    workspace.delete(circle).expect("delete");
    workspace.set_breakpoint(Breakpoint::Desktop);
    store.save(&workspace.snapshot()).expect("save");

    let mut restored = store.load_or_default();
    assert_eq!(restored.snapshot(), workspace.snapshot());
    let fresh = restored.drop_shape(ElementKind::Input, Point::new(0.0, 0.0));
    assert!(fresh > circle);
}

// ----------------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------------

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_handle() -> impl Strategy<Value = ResizeHandle> {
        (0usize..8).prop_map(|i| ResizeHandle::ALL[i])
    }

    proptest! {
        #[test]
        fn prop_resize_never_below_floor(
            handle in arb_handle(),
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            width in 30.0f32..400.0,
            height in 30.0f32..400.0,
            dx in -5000.0f32..5000.0,
            dy in -5000.0f32..5000.0,
        ) {
            let rect = resize_rect(Rect::new(x, y, width, height), handle, dx, dy);
            prop_assert!(rect.width >= MIN_ELEMENT_SIZE);
            prop_assert!(rect.height >= MIN_ELEMENT_SIZE);
        }

        #[test]
        fn prop_resize_anchors_opposite_corner(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            dx in -100.0f32..100.0,
            dy in -100.0f32..100.0,
        ) {
            let origin = Rect::new(x, y, 200.0, 200.0);
            let rect = resize_rect(origin, ResizeHandle::Se, dx, dy);
            prop_assert_eq!(rect.x, origin.x);
            prop_assert_eq!(rect.y, origin.y);
        }

        #[test]
        fn prop_rotation_normalized(degrees in -100_000.0f32..100_000.0) {
            let r = normalize_rotation(degrees);
            prop_assert!((0.0..360.0).contains(&r), "rotation {} out of range", r);
        }
    }
}
