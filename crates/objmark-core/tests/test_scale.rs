use approx::assert_relative_eq;

use objmark_core::geometry::{DisplayScale, Point, Rect};
use objmark_core::host::NullSurface;
use objmark_core::session::ViewerSession;

// ---------------------------------------------------------------------------
// DisplayScale
// ---------------------------------------------------------------------------

#[test]
fn test_default_scale_is_identity() {
    let scale = DisplayScale::default();
    assert_relative_eq!(scale.get(), 1.0);
    let r = Rect::new(3, 4, 5, 6);
    assert_eq!(scale.to_display(&r), r);
    assert_eq!(scale.to_source(&r), r);
}

#[test]
fn test_scale_rejects_non_positive() {
    let mut scale = DisplayScale::new_or_default(2.0);
    assert!(!scale.set(0.0));
    assert!(!scale.set(-1.5));
    assert!(!scale.set(f64::NAN));
    assert_relative_eq!(scale.get(), 2.0);

    assert_relative_eq!(DisplayScale::new_or_default(-3.0).get(), 1.0);
}

#[test]
fn test_scale_rounds_half_up() {
    let scale = DisplayScale::new_or_default(0.5);
    assert_eq!(scale.to_display(&Rect::new(11, 13, 21, 7)), Rect::new(6, 7, 11, 4));
}

#[test]
fn test_display_size() {
    let scale = DisplayScale::new_or_default(0.5);
    assert_eq!(scale.display_size(100, 81), (50, 41));
    assert_eq!(DisplayScale::new_or_default(0.001).display_size(10, 10), (1, 1));
}

#[test]
fn test_round_trip_within_one_pixel() {
    for factor in [0.3, 0.5, 0.75, 1.0, 1.5, 2.0, 3.7] {
        let scale = DisplayScale::new_or_default(factor);
        for source in [
            Rect::new(0, 0, 1, 1),
            Rect::new(11, 13, 21, 7),
            Rect::new(123, 457, 89, 31),
        ] {
            let back = scale.to_source(&scale.to_display(&source));
            let tolerance = (1.0 / factor).ceil() as i32;
            assert!((back.x - source.x).abs() <= tolerance, "{factor}: {back:?}");
            assert!((back.y - source.y).abs() <= tolerance, "{factor}: {back:?}");
            assert!((back.width - source.width).abs() <= tolerance, "{factor}: {back:?}");
            assert!((back.height - source.height).abs() <= tolerance, "{factor}: {back:?}");
        }
    }
}

#[test]
fn test_session_round_trip_at_half_scale() {
    let mut session = ViewerSession::new(NullSurface);
    assert!(session.set_display_scale(0.5));

    let source = Rect::new(11, 13, 21, 7);
    session.set_markers(&[source]);
    let back = session.markers();

    assert_eq!(back.len(), 1);
    assert!((back[0].x - source.x).abs() <= 1);
    assert!((back[0].y - source.y).abs() <= 1);
    assert!((back[0].width - source.width).abs() <= 1);
    assert!((back[0].height - source.height).abs() <= 1);
}

// ---------------------------------------------------------------------------
// Rect helpers
// ---------------------------------------------------------------------------

#[test]
fn test_from_corners_rounds_fractional_points() {
    let r = Rect::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 4.5));
    assert_eq!(r, Rect::new(0, 0, 10, 5));
}

#[test]
fn test_overlaps_image_edges() {
    assert!(Rect::new(95, 95, 10, 10).overlaps_image(100, 100));
    assert!(!Rect::new(100, 0, 10, 10).overlaps_image(100, 100));
    assert!(!Rect::new(-10, 0, 10, 10).overlaps_image(100, 100));
    assert!(Rect::new(-9, 0, 10, 10).overlaps_image(100, 100));
}
