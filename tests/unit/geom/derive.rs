use super::*;
use crate::foundation::core::{Point, Rgba};

#[test]
fn viewport_rect_spans_the_port() {
    let g = compute_viewport_rect(Viewport::new(640, 480));
    assert_eq!(g.rect, Rect::new(0.0, 0.0, 640.0, 480.0));
    assert_eq!(g.center(), Point::new(320.0, 240.0));
}

#[test]
fn fraction_inset_scales_against_extent() {
    let parent = Geom::centered(Point::new(100.0, 50.0), Vec2::new(200.0, 100.0))
        .with_colors(Rgba::opaque(1.0, 0.0, 0.0), Rgba::opaque(0.0, 0.0, 0.0));
    let inner = compute_inset_rect(&parent, Inset::Fraction(Vec2::new(0.05, 0.1))).unwrap();
    assert_eq!(inner.rect, Rect::new(10.0, 10.0, 190.0, 90.0));
    assert_eq!(inner.extent, Vec2::new(180.0, 80.0));
    assert_eq!(inner.line_color, parent.line_color);
    assert!(parent.encloses(&inner));
}

#[test]
fn absolute_inset_uses_pixels() {
    let parent = Geom::centered(Point::new(0.0, 0.0), Vec2::new(100.0, 100.0));
    let inner = compute_inset_rect(&parent, Inset::Absolute(Vec2::new(5.0, 20.0))).unwrap();
    assert_eq!(inner.rect, Rect::new(-45.0, -30.0, 45.0, 30.0));
}

#[test]
fn inverted_inset_is_invalid_configuration() {
    let parent = Geom::centered(Point::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let err = compute_inset_rect(&parent, Inset::Absolute(Vec2::new(6.0, 0.0))).unwrap_err();
    assert!(matches!(err, ReticleError::InvalidConfiguration(_)));
}

#[test]
fn non_finite_inset_is_rejected() {
    let parent = Geom::centered(Point::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let err =
        compute_inset_rect(&parent, Inset::Fraction(Vec2::new(f64::INFINITY, 0.0))).unwrap_err();
    assert!(matches!(err, ReticleError::InvalidConfiguration(_)));
}
