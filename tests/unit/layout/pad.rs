use super::*;
use crate::foundation::core::{Point, Rgba};
use crate::layout::filmback::resolve_filmback;
use crate::test_support::{academy_config, assert_approx};

#[test]
fn disabled_or_zero_pad_is_none() {
    let filmback = Geom::centered(Point::new(0.0, 0.0), Vec2::new(100.0, 50.0));
    let mut pad = PadConfig::default();
    pad.amount = Vec2::new(0.1, 0.1);
    assert!(resolve_pad(&filmback, &pad, 10.0, 10.0).unwrap().is_none());
    pad.enabled = true;
    pad.amount = Vec2::ZERO;
    assert!(resolve_pad(&filmback, &pad, 10.0, 10.0).unwrap().is_none());
}

#[test]
fn pad_shrinks_by_physical_amount() {
    let filmback = Geom::centered(Point::new(50.0, 25.0), Vec2::new(100.0, 50.0));
    let pad = PadConfig {
        enabled: true,
        amount: Vec2::new(2.0, 1.0),
        ..PadConfig::default()
    };
    let g = resolve_pad(&filmback, &pad, 10.0, 20.0).unwrap().unwrap();
    assert_eq!(g.width(), 80.0);
    assert_eq!(g.height(), 30.0);
    assert_eq!(g.center(), filmback.center());
    assert_eq!(g.line_color, Rgba::opaque(1.0, 0.0, 0.0));
}

#[test]
fn pad_larger_than_filmback_is_invalid() {
    let filmback = Geom::centered(Point::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let pad = PadConfig {
        enabled: true,
        amount: Vec2::new(5.0, 0.0),
        ..PadConfig::default()
    };
    assert!(resolve_pad(&filmback, &pad, 10.0, 10.0).is_err());
}

#[test]
fn filmback_resolver_removes_pad_from_image_aperture() {
    let mut cfg = academy_config();
    cfg.pad.enabled = true;
    cfg.pad.amount = Vec2::new(0.1, 0.05);
    let fl = resolve_filmback(&cfg, crate::foundation::core::Viewport::new(1920, 1080)).unwrap();
    let ps = 1920.0 / 0.864;
    let pad = fl.pad.unwrap();
    assert_approx(pad.width(), (0.864 - 0.1) * ps, 1e-6);
    assert_approx(pad.height(), (0.630 - 0.05) * ps, 1e-6);
    assert_approx(fl.image.unwrap().width(), pad.width(), 1e-6);
    assert_approx(fl.image_aperture.y, 0.58, 1e-12);
    assert!(fl.filmback.encloses(&pad));
}
