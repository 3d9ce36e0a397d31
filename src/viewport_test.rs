#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn container() -> Size {
    Size::new(800.0, 600.0)
}

fn image_vp() -> Viewport {
    Viewport::new(ViewTransform::default(), container(), ZoomLimits { min: 0.15, max: 8.0 }, 0.95)
}

fn transparent_vp() -> Viewport {
    Viewport::new(
        ViewTransform::identity_for(&Background::External),
        container(),
        ZoomLimits { min: 1.0, max: 4.0 },
        0.95,
    )
}

/// The transparent clamp invariant: the scaled layer always covers the container.
fn assert_transparent_invariant(vp: &Viewport) {
    let t = vp.transform();
    let s = t.scale();
    let o = t.offset();
    assert!(s >= 1.0, "scale below 1: {s}");
    if s <= 1.0 {
        assert_eq!(o, Point::default());
    } else {
        let c = vp.container();
        assert!(o.x <= 0.0 && o.y <= 0.0, "exposes top/left: {o:?}");
        assert!(o.x + c.width * s >= c.width - EPSILON, "exposes right: {o:?}");
        assert!(o.y + c.height * s >= c.height - EPSILON, "exposes bottom: {o:?}");
    }
}

// =============================================================
// ViewTransform
// =============================================================

#[test]
fn transform_identity_per_background() {
    assert_eq!(
        ViewTransform::identity_for(&Background::External),
        ViewTransform::Transparent { scale: 1.0, translate: Point::default() }
    );
    assert_eq!(
        ViewTransform::identity_for(&Background::Image(Size::new(1.0, 1.0))),
        ViewTransform::Image { zoom: 1.0, pan: Point::default() }
    );
}

#[test]
fn transform_apply_invert_round_trip() {
    let t = ViewTransform::Image { zoom: 2.5, pan: Point::new(-30.0, 12.0) };
    let p = Point::new(123.4, -56.7);
    assert!(point_approx_eq(t.invert(t.apply(p)), p));
}

#[test]
fn transform_with_parts_keeps_variant() {
    let t = ViewTransform::Transparent { scale: 1.0, translate: Point::default() };
    assert!(t.with_parts(2.0, Point::new(-1.0, -1.0)).is_transparent());
}

#[test]
fn transform_lerp_endpoints_are_exact() {
    let a = ViewTransform::Image { zoom: 1.0, pan: Point::new(0.0, 0.0) };
    let b = ViewTransform::Image { zoom: 3.0, pan: Point::new(-200.0, 50.0) };
    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);
    let mid = a.lerp(&b, 0.5);
    assert!(approx_eq(mid.scale(), 2.0));
    assert!(point_approx_eq(mid.offset(), Point::new(-100.0, 25.0)));
}

// =============================================================
// pan
// =============================================================

#[test]
fn image_pan_is_unbounded() {
    let mut vp = image_vp();
    assert!(vp.pan(5000.0, -5000.0));
    assert_eq!(vp.transform().offset(), Point::new(5000.0, -5000.0));
}

#[test]
fn transparent_pan_at_scale_one_stays_at_origin() {
    let mut vp = transparent_vp();
    assert!(!vp.pan(-50.0, -50.0));
    assert_eq!(vp.transform().offset(), Point::default());
}

#[test]
fn transparent_pan_is_clamped_when_zoomed() {
    let mut vp = transparent_vp();
    vp.set_transform(ViewTransform::Transparent { scale: 2.0, translate: Point::new(-100.0, -100.0) });
    vp.pan(-10_000.0, 10_000.0);
    let o = vp.transform().offset();
    assert_eq!(o, Point::new(-800.0, 0.0));
    assert_transparent_invariant(&vp);
}

// =============================================================
// zoom_at
// =============================================================

#[test]
fn zoom_at_keeps_screen_point_fixed() {
    let mut vp = image_vp();
    vp.set_transform(ViewTransform::Image { zoom: 1.2, pan: Point::new(75.0, -30.0) });
    let focus = Point::new(420.0, 260.0);
    let before = vp.transform().invert(focus);
    assert!(vp.zoom_at(focus, 3.0));
    let after = vp.transform().invert(focus);
    assert!(point_approx_eq(before, after));
    assert!(approx_eq(vp.transform().scale(), 3.0));
}

#[test]
fn zoom_at_clamps_to_limits() {
    let mut vp = image_vp();
    vp.zoom_at(Point::new(0.0, 0.0), 100.0);
    assert_eq!(vp.transform().scale(), 8.0);
    vp.zoom_at(Point::new(0.0, 0.0), 0.0001);
    assert_eq!(vp.transform().scale(), 0.15);
}

#[test]
fn zoom_out_from_large_image_fit_stays_at_fit() {
    let mut vp = Viewport::new(
        ViewTransform::default(),
        Size::new(400.0, 300.0),
        ZoomLimits { min: 0.15, max: 8.0 },
        0.95,
    );
    vp.fit_to_container(&Background::Image(Size::new(8000.0, 6000.0)));
    let fit = vp.transform();
    assert!(approx_eq(fit.scale(), 0.0475));
    assert!(approx_eq(vp.limits().min, 0.0475));
    vp.zoom_at(Point::new(200.0, 150.0), fit.scale() / 1.1);
    assert!(approx_eq(vp.transform().scale(), 0.0475));
    assert!(point_approx_eq(vp.transform().offset(), fit.offset()));
}

#[test]
fn zoom_in_on_tiny_image_fit_never_shrinks() {
    let mut vp = image_vp();
    vp.fit_to_container(&Background::Image(Size::new(10.0, 10.0)));
    let fit = vp.transform().scale();
    // min(800/10, 600/10) * 0.95 = 57
    assert!(approx_eq(fit, 57.0));
    vp.zoom_at(Point::new(400.0, 300.0), fit * 1.1);
    assert!(approx_eq(vp.transform().scale(), 57.0));
    vp.pinch(
        (Point::new(300.0, 300.0), Point::new(500.0, 300.0)),
        (Point::new(200.0, 300.0), Point::new(600.0, 300.0)),
    );
    assert!(approx_eq(vp.transform().scale(), 57.0));
    vp.zoom_at(Point::new(400.0, 300.0), 0.0001);
    assert_eq!(vp.transform().scale(), 0.15);
}

#[test]
fn limits_are_configured_before_any_fit() {
    let vp = image_vp();
    assert_eq!(vp.limits(), ZoomLimits { min: 0.15, max: 8.0 });
}

#[test]
fn transparent_zoom_at_never_goes_below_one() {
    let mut vp = transparent_vp();
    vp.zoom_at(Point::new(400.0, 300.0), 0.5);
    assert_eq!(vp.transform(), ViewTransform::Transparent { scale: 1.0, translate: Point::default() });
}

#[test]
fn transparent_zoom_at_center_stays_clamped() {
    let mut vp = transparent_vp();
    vp.zoom_at(Point::new(400.0, 300.0), 2.0);
    assert!(point_approx_eq(vp.transform().offset(), Point::new(-400.0, -300.0)));
    assert_transparent_invariant(&vp);
}

// =============================================================
// pinch
// =============================================================

#[test]
fn pinch_only_keeps_midpoint_anchor_fixed() {
    let mut vp = image_vp();
    vp.set_transform(ViewTransform::Image { zoom: 1.3, pan: Point::new(40.0, -25.0) });
    let prev = (Point::new(300.0, 300.0), Point::new(400.0, 300.0));
    let cur = (Point::new(250.0, 300.0), Point::new(450.0, 300.0));
    let mid = prev.0.midpoint(prev.1);
    let anchor = vp.transform().invert(mid);

    assert!(vp.pinch(prev, cur));

    assert!(approx_eq(vp.transform().scale(), 2.6));
    assert!(point_approx_eq(vp.transform().apply(anchor), mid));
}

#[test]
fn pinch_with_drag_moves_anchor_with_midpoint() {
    let mut vp = image_vp();
    let prev = (Point::new(100.0, 100.0), Point::new(200.0, 100.0));
    let cur = (Point::new(130.0, 150.0), Point::new(230.0, 150.0));
    let anchor = vp.transform().invert(prev.0.midpoint(prev.1));

    vp.pinch(prev, cur);

    assert!(approx_eq(vp.transform().scale(), 1.0));
    assert!(point_approx_eq(vp.transform().apply(anchor), cur.0.midpoint(cur.1)));
}

#[test]
fn pinch_with_coincident_fingers_is_ignored() {
    let mut vp = image_vp();
    let p = Point::new(10.0, 10.0);
    assert!(!vp.pinch((p, p), (p, Point::new(20.0, 20.0))));
}

#[test]
fn transparent_pinch_anchor_and_invariant() {
    let mut vp = transparent_vp();
    let prev = (Point::new(350.0, 300.0), Point::new(450.0, 300.0));
    let cur = (Point::new(300.0, 300.0), Point::new(500.0, 300.0));
    let mid = Point::new(400.0, 300.0);
    let anchor = vp.transform().invert(mid);

    vp.pinch(prev, cur);

    assert!(approx_eq(vp.transform().scale(), 2.0));
    assert!(point_approx_eq(vp.transform().apply(anchor), mid));
    assert_transparent_invariant(&vp);
}

#[test]
fn transparent_pinch_out_returns_to_identity() {
    let mut vp = transparent_vp();
    vp.set_transform(ViewTransform::Transparent { scale: 1.5, translate: Point::new(-100.0, -100.0) });
    let prev = (Point::new(300.0, 300.0), Point::new(500.0, 300.0));
    let cur = (Point::new(390.0, 300.0), Point::new(410.0, 300.0));
    vp.pinch(prev, cur);
    assert_eq!(vp.transform(), ViewTransform::Transparent { scale: 1.0, translate: Point::default() });
}

#[test]
fn transparent_invariant_holds_over_gesture_sequence() {
    let mut vp = transparent_vp();
    let steps: [(f64, f64, f64); 6] = [
        (1.8, -120.0, 40.0),
        (1.1, 300.0, -700.0),
        (0.7, -20.0, -20.0),
        (2.5, -900.0, 900.0),
        (1.0, 15.0, 15.0),
        (0.2, 0.0, 0.0),
    ];
    let mut a = Point::new(350.0, 250.0);
    let mut b = Point::new(450.0, 350.0);
    for (ratio, dx, dy) in steps {
        let mid = a.midpoint(b);
        let na = Point::new(mid.x + (a.x - mid.x) * ratio, mid.y + (a.y - mid.y) * ratio);
        let nb = Point::new(mid.x + (b.x - mid.x) * ratio, mid.y + (b.y - mid.y) * ratio);
        vp.pinch((a, b), (na, nb));
        assert_transparent_invariant(&vp);
        vp.pan(dx, dy);
        assert_transparent_invariant(&vp);
        a = na;
        b = nb;
    }
}

// =============================================================
// fit / clamp
// =============================================================

#[test]
fn fit_image_centres_with_margin() {
    let vp = image_vp();
    let t = vp.fit_transform(&Background::Image(Size::new(1600.0, 600.0)));
    // min(800/1600, 600/600) * 0.95 = 0.475
    assert!(approx_eq(t.scale(), 0.475));
    assert!(approx_eq(t.offset().x, (800.0 - 1600.0 * 0.475) / 2.0));
    assert!(approx_eq(t.offset().y, (600.0 - 600.0 * 0.475) / 2.0));
}

#[test]
fn fit_image_with_unknown_size_is_identity() {
    let vp = image_vp();
    assert_eq!(vp.fit_transform(&Background::Image(Size::default())), ViewTransform::default());
}

#[test]
fn fit_transparent_is_identity() {
    let mut vp = transparent_vp();
    vp.set_transform(ViewTransform::Transparent { scale: 3.0, translate: Point::new(-500.0, -500.0) });
    assert!(vp.fit_to_container(&Background::External));
    assert_eq!(vp.transform(), ViewTransform::Transparent { scale: 1.0, translate: Point::default() });
}

#[test]
fn clamp_forces_origin_at_scale_one() {
    let vp = transparent_vp();
    let t = vp.clamped(ViewTransform::Transparent { scale: 1.0, translate: Point::new(-5.0, -5.0) });
    assert_eq!(t.offset(), Point::default());
}

#[test]
fn clamp_leaves_image_transforms_alone() {
    let vp = image_vp();
    let t = ViewTransform::Image { zoom: 0.01, pan: Point::new(9e6, -9e6) };
    assert_eq!(vp.clamped(t), t);
}

#[test]
fn shrinking_container_reclamps() {
    let mut vp = transparent_vp();
    vp.set_transform(ViewTransform::Transparent { scale: 2.0, translate: Point::new(-800.0, -600.0) });
    vp.set_container(Size::new(400.0, 300.0));
    assert_transparent_invariant(&vp);
    assert_eq!(vp.transform().offset(), Point::new(-400.0, -300.0));
}
