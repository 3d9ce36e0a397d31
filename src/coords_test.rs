#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

fn image_space(zoom: f64, pan: Point) -> CoordinateSpace {
    CoordinateSpace::new(
        Background::Image(Size::new(2000.0, 1000.0)),
        Size::new(800.0, 600.0),
        ViewTransform::Image { zoom, pan },
    )
}

fn transparent_space(scale: f64, translate: Point) -> CoordinateSpace {
    CoordinateSpace::new(
        Background::External,
        Size::new(800.0, 600.0),
        ViewTransform::Transparent { scale, translate },
    )
}

// --- Size / Background ---

#[test]
fn size_is_positive() {
    assert!(Size::new(1.0, 1.0).is_positive());
    assert!(!Size::new(0.0, 1.0).is_positive());
    assert!(!Size::default().is_positive());
}

#[test]
fn background_is_external() {
    assert!(Background::External.is_external());
    assert!(!Background::Image(Size::new(1.0, 1.0)).is_external());
}

// --- Named conversions ---

#[test]
fn normalized_to_image_pixel_scales_by_image() {
    let space = image_space(1.0, Point::default());
    let p = space.normalized_to_image_pixel(Point::new(0.5, 0.25));
    assert_eq!(p, Some(Point::new(1000.0, 250.0)));
}

#[test]
fn normalized_to_image_pixel_is_none_in_transparent_mode() {
    let space = transparent_space(1.0, Point::default());
    assert!(space.normalized_to_image_pixel(Point::new(0.5, 0.5)).is_none());
}

#[test]
fn image_pixel_to_canvas_pixel_applies_zoom_then_pan() {
    let space = image_space(0.5, Point::new(10.0, 20.0));
    let p = space.image_pixel_to_canvas_pixel(Point::new(100.0, 200.0));
    assert_eq!(p, Point::new(60.0, 120.0));
}

#[test]
fn normalized_to_screen_pixel_uses_container_and_ignores_zoom() {
    let space = transparent_space(3.0, Point::new(-100.0, -50.0));
    let p = space.normalized_to_screen_pixel(Point::new(0.5, 0.5));
    assert_eq!(p, Point::new(400.0, 300.0));
}

// --- Round trips ---

#[test]
fn canvas_image_round_trip_for_several_transforms() {
    let transforms = [
        (1.0, Point::new(0.0, 0.0)),
        (0.15, Point::new(-13.7, 42.3)),
        (7.9, Point::new(1234.5, -987.6)),
        (0.3333, Point::new(0.1, 0.2)),
    ];
    let samples = [Point::new(0.0, 0.0), Point::new(399.5, 12.25), Point::new(-50.0, 800.0)];
    for (zoom, pan) in transforms {
        let space = image_space(zoom, pan);
        for p in samples {
            let back = space.image_pixel_to_canvas_pixel(space.canvas_pixel_to_image_pixel(p));
            assert!(point_approx_eq(back, p), "zoom {zoom} pan {pan:?} p {p:?} -> {back:?}");
        }
    }
}

#[test]
fn normalized_screen_round_trip_image_mode() {
    let space = image_space(1.7, Point::new(-40.0, 15.0));
    let p = Point::new(0.3, 0.8);
    assert!(point_approx_eq(space.screen_to_normalized(space.normalized_to_screen(p)), p));
}

#[test]
fn normalized_screen_round_trip_transparent_mode() {
    let space = transparent_space(2.5, Point::new(-300.0, -200.0));
    let p = Point::new(0.65, 0.1);
    assert!(point_approx_eq(space.screen_to_normalized(space.normalized_to_screen(p)), p));
}

#[test]
fn transparent_identity_maps_container_pixels_to_normalized() {
    let space = transparent_space(1.0, Point::default());
    assert_eq!(space.screen_to_normalized(Point::new(400.0, 150.0)), Point::new(0.5, 0.25));
}

#[test]
fn transparent_screen_to_content_undoes_host_transform() {
    let space = transparent_space(2.0, Point::new(-100.0, -60.0));
    assert_eq!(space.screen_to_content(Point::new(100.0, 140.0)), Point::new(100.0, 100.0));
}

#[test]
fn content_to_normalized_with_zero_content_is_origin() {
    let space = CoordinateSpace::new(Background::External, Size::default(), ViewTransform::default());
    assert_eq!(space.content_to_normalized(Point::new(5.0, 5.0)), Point::default());
}

#[test]
fn content_size_follows_background() {
    assert_eq!(image_space(1.0, Point::default()).content_size(), Size::new(2000.0, 1000.0));
    assert_eq!(transparent_space(1.0, Point::default()).content_size(), Size::new(800.0, 600.0));
}
