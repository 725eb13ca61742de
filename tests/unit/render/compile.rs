use super::*;
use crate::config::model::{
    AnchorLevel, AspectRatioEntry, RelativePosition, TextElement, TextType,
};
use crate::foundation::core::{Vec2, Viewport};
use crate::layout::solver::compute_layout;
use crate::test_support::{academy_config, assert_approx};

fn compile(config: &ReticleConfig, width: u32, height: u32) -> (OverlayPlan, ReticleLayout) {
    let mut layout = compute_layout(config, Viewport::new(width, height));
    let plan = compile_overlay(config, &mut layout, &TextContext::default());
    (plan, layout)
}

fn kinds(plan: &OverlayPlan) -> Vec<&'static str> {
    plan.primitives
        .iter()
        .map(|p| match p {
            DrawPrimitive::MaskQuad { .. } => "mask",
            DrawPrimitive::LineLoop { .. } => "loop",
            DrawPrimitive::LineSegment { .. } => "line",
            DrawPrimitive::Text(_) => "text",
        })
        .collect()
}

fn masks(plan: &OverlayPlan) -> Vec<(Rgba, bool, bool)> {
    plan.primitives
        .iter()
        .filter_map(|p| match p {
            DrawPrimitive::MaskQuad {
                color,
                draw_sides,
                draw_top,
                ..
            } => Some((*color, *draw_sides, *draw_top)),
            _ => None,
        })
        .collect()
}

#[test]
fn default_config_draws_nothing() {
    let (plan, _) = compile(&academy_config(), 1920, 1080);
    assert!(plan.is_empty());
    assert!(plan.issues.is_empty());
}

#[test]
fn disabled_or_orthographic_yields_empty_plan() {
    let mut cfg = academy_config();
    cfg.filmback.display = DisplayMode::Lines;
    cfg.options.drawing_enabled = false;
    assert!(compile(&cfg, 640, 480).0.is_empty());

    cfg.options.drawing_enabled = true;
    cfg.camera.orthographic = true;
    assert!(compile(&cfg, 640, 480).0.is_empty());
}

#[test]
fn filmback_then_aspect_masks_then_outlines() {
    let mut cfg = academy_config();
    cfg.filmback.display = DisplayMode::Mask;
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(2.35, DisplayMode::DashedLines));
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(1.85, DisplayMode::Mask));
    let (plan, layout) = compile(&cfg, 1920, 1080);

    assert_eq!(kinds(&plan), ["mask", "loop", "mask", "loop", "loop"]);
    let fl = layout.filmback.as_ref().unwrap();
    match &plan.primitives[0] {
        DrawPrimitive::MaskQuad { outer, inner, .. } => {
            assert_eq!(*outer, layout.port.rect);
            assert_eq!(*inner, fl.filmback.rect);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &plan.primitives[2] {
        DrawPrimitive::MaskQuad {
            outer, draw_sides, ..
        } => {
            assert_eq!(*outer, fl.filmback.rect);
            assert!(*draw_sides);
        }
        other => panic!("unexpected {other:?}"),
    }
    match (&plan.primitives[3], &plan.primitives[4]) {
        (
            DrawPrimitive::LineLoop {
                sides: s0, dashed: d0, ..
            },
            DrawPrimitive::LineLoop {
                sides: s1, dashed: d1, ..
            },
        ) => {
            assert!(*s0 && !*d0);
            assert!(!*s1 && *d1);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn outer_aspect_mask_chains_from_inner_box() {
    let mut cfg = academy_config();
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(1.85, DisplayMode::Mask));
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(2.39, DisplayMode::Mask));
    let (plan, layout) = compile(&cfg, 1920, 1080);
    let inner = layout.aspect_ratios[0].as_ref().unwrap().geom.rect;
    let outer_box = layout.aspect_ratios[1].as_ref().unwrap().geom.rect;
    match &plan.primitives[1] {
        DrawPrimitive::MaskQuad {
            outer,
            inner: i,
            draw_sides,
            ..
        } => {
            assert_eq!(*outer, inner);
            assert_eq!(*i, outer_box);
            assert!(!*draw_sides);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn distant_camera_tints_aspect_masks() {
    let mut cfg = academy_config();
    cfg.camera.translation = [0.0, -12_000.0, 50.0];
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(1.85, DisplayMode::Mask));
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(2.39, DisplayMode::Mask));
    let (plan, layout) = compile(&cfg, 1920, 1080);
    assert_eq!(layout.max_distance, -12_000.0);

    let m = masks(&plan);
    let base = AspectRatioEntry::default().mask_color;
    assert_eq!(m[0].0, Rgba::new(1.0, 0.0, 0.0, base.a));
    assert_eq!(m[1].0, base.tinted(1.5, 0.5, 0.5));

    cfg.options.maximum_distance = 0.0;
    let (plan, _) = compile(&cfg, 1920, 1080);
    assert_eq!(masks(&plan)[0].0, base);
}

#[test]
fn safe_area_masks_fade_with_nesting() {
    let mut cfg = academy_config();
    let mut entry = AspectRatioEntry::new(1.85, DisplayMode::Mask);
    entry.safe_action = DisplayMode::Mask;
    entry.safe_title = DisplayMode::Mask;
    cfg.aspect_ratios.insert(entry);
    let (plan, _) = compile(&cfg, 1920, 1080);

    let m = masks(&plan);
    assert_eq!(m.len(), 3);
    let a = AspectRatioEntry::default().mask_color.a;
    assert_approx(f64::from(m[1].0.a), f64::from(a * 0.66), 1e-6);
    assert_approx(f64::from(m[2].0.a), f64::from(a * 0.33), 1e-6);
    // aspect outline plus both safe outlines
    assert_eq!(kinds(&plan).iter().filter(|k| **k == "loop").count(), 3);
}

#[test]
fn pan_scan_mask_covers_sides_only() {
    let mut cfg = academy_config();
    cfg.pan_scan.base.display = DisplayMode::Mask;
    cfg.pan_scan.pan_scan_ratio = 1.0;
    let (plan, layout) = compile(&cfg, 1920, 1080);
    assert_eq!(kinds(&plan), ["mask", "loop"]);
    match &plan.primitives[0] {
        DrawPrimitive::MaskQuad {
            outer,
            draw_sides,
            draw_top,
            ..
        } => {
            assert_eq!(*outer, layout.filmback.as_ref().unwrap().image.unwrap().rect);
            assert!(*draw_sides && !*draw_top);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn soundtrack_line_sits_on_image_left_edge() {
    let mut cfg = academy_config();
    cfg.filmback.display = DisplayMode::Lines;
    cfg.filmback.sound_track_width = 0.1;
    let (plan, layout) = compile(&cfg, 1920, 1080);
    let image = layout.filmback.as_ref().unwrap().image.unwrap();
    assert_eq!(kinds(&plan), ["loop", "line"]);
    match &plan.primitives[1] {
        DrawPrimitive::LineSegment { from, to, .. } => {
            assert_eq!(from.x, image.x1());
            assert_eq!(to.x, image.x1());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn field_guide_lines_and_numbers() {
    let mut cfg = academy_config();
    cfg.options.display_field_guide = true;
    let (plan, _) = compile(&cfg, 1920, 1080);
    let k = kinds(&plan);
    assert_eq!(k.iter().filter(|k| **k == "loop").count(), 1);
    assert_eq!(k.iter().filter(|k| **k == "line").count(), 11 * 4 + 4);
    let labels: Vec<&str> = plan
        .primitives
        .iter()
        .filter_map(|p| match p {
            DrawPrimitive::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels.len(), 44);
    assert_eq!(labels[0], "11");
    assert_eq!(labels[43], "1");
}

#[test]
fn guides_use_image_and_container() {
    let mut cfg = academy_config();
    cfg.options.display_line_h = true;
    cfg.options.display_thirds_v = true;
    cfg.options.display_crosshair = true;
    let (plan, layout) = compile(&cfg, 1920, 1080);
    assert_eq!(kinds(&plan).len(), 1 + 2 + 4);
    match &plan.primitives[2] {
        DrawPrimitive::LineSegment { from, .. } => {
            assert_approx(from.x, layout.port.width() * 2.0 / 3.0, 1e-9)
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn text_anchors_and_skips() {
    let mut cfg = academy_config();
    cfg.aspect_ratios
        .insert(AspectRatioEntry::new(1.85, DisplayMode::Lines));
    cfg.text = vec![
        TextElement {
            text_type: TextType::AspectRatio,
            level: AnchorLevel::AspectRatio,
            ar_level: 5,
            ..TextElement::default()
        },
        TextElement {
            text: "A".to_owned(),
            level: AnchorLevel::AspectRatio,
            position: RelativePosition::TopRight,
            offset: Vec2::new(-5.0, -5.0),
            ..TextElement::default()
        },
        TextElement {
            text: "hidden".to_owned(),
            enabled: false,
            ..TextElement::default()
        },
    ];
    let (plan, layout) = compile(&cfg, 1920, 1080);
    assert_eq!(plan.issues.len(), 1);
    assert_eq!(plan.issues[0].element, "text 0");

    let texts: Vec<&TextPrimitive> = plan
        .primitives
        .iter()
        .filter_map(|p| match p {
            DrawPrimitive::Text(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 1);
    let ar = layout.aspect_ratios[0].as_ref().unwrap().geom;
    let image = layout.filmback.as_ref().unwrap().image.unwrap();
    assert_eq!(texts[0].text, "A");
    assert_approx(texts[0].position.x, image.x2() - 5.0, 1e-9);
    assert_approx(texts[0].position.y, ar.y2() - 5.0, 1e-9);

    cfg.options.enable_text_drawing = false;
    let (plan, _) = compile(&cfg, 1920, 1080);
    assert!(plan.issues.is_empty());
    assert_eq!(kinds(&plan), ["loop"]);
}

#[test]
fn rejected_pad_still_draws_filmback_guides_and_text() {
    let mut cfg = academy_config();
    cfg.filmback.display = DisplayMode::Lines;
    cfg.pad.enabled = true;
    cfg.pad.amount = Vec2::new(2.0, 0.0);
    cfg.options.display_line_h = true;
    cfg.text.push(TextElement {
        text: "A".to_owned(),
        level: AnchorLevel::Filmback,
        ..TextElement::default()
    });
    let (plan, layout) = compile(&cfg, 1920, 1080);
    assert_eq!(kinds(&plan), ["loop", "line", "text"]);
    assert_eq!(plan.issues.len(), 1);
    assert_eq!(plan.issues[0].element, "image");

    let filmback = layout.filmback.as_ref().unwrap().filmback;
    match &plan.primitives[1] {
        DrawPrimitive::LineSegment { from, to, .. } => {
            assert_approx(from.x, filmback.x1(), 1e-9);
            assert_approx(to.x, filmback.x2(), 1e-9);
        }
        other => panic!("unexpected {other:?}"),
    }
}
