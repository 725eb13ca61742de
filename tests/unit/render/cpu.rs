use super::*;
use crate::render::backend::execute_overlay;
use crate::render::plan::{DrawPrimitive, OverlayPlan};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn pixel(frame: &FrameRGBA, x: u32, row: u32) -> [u8; 4] {
    let i = ((row * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn render(viewport: Viewport, primitives: Vec<DrawPrimitive>) -> FrameRGBA {
    let mut plan = OverlayPlan::new(viewport);
    plan.primitives = primitives;
    let mut backend = CpuOverlayBackend::new(RenderSettings::default());
    execute_overlay(&mut backend, &plan).unwrap()
}

#[test]
fn mask_band_is_flipped_to_top_down_rows() {
    let frame = render(
        Viewport::new(8, 8),
        vec![DrawPrimitive::MaskQuad {
            outer: Rect::new(0.0, 0.0, 8.0, 8.0),
            inner: Rect::new(0.0, 4.0, 8.0, 8.0),
            color: Rgba::opaque(1.0, 0.0, 0.0),
            draw_sides: true,
            draw_top: true,
        }],
    );
    assert_eq!(frame.data.len(), 8 * 8 * 4);
    assert!(frame.premultiplied);
    // layout y in [0, 4) is the bottom half of the image
    assert_eq!(pixel(&frame, 3, 7), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 3, 4), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 3, 3), CLEAR);
    assert_eq!(pixel(&frame, 3, 0), CLEAR);
}

#[test]
fn clear_color_fills_background() {
    let mut backend = CpuOverlayBackend::new(RenderSettings {
        clear_rgba: Some([10, 20, 30, 255]),
    });
    let frame = execute_overlay(&mut backend, &OverlayPlan::new(Viewport::new(3, 2))).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn dashed_line_leaves_gaps() {
    let line = |dashed| DrawPrimitive::LineSegment {
        from: Point::new(0.0, 4.5),
        to: Point::new(40.0, 4.5),
        color: Rgba::default(),
        dashed,
    };
    let solid = render(Viewport::new(40, 8), vec![line(false)]);
    let dashed = render(Viewport::new(40, 8), vec![line(true)]);
    assert_eq!(pixel(&solid, 5, 3), WHITE);
    assert_eq!(pixel(&solid, 20, 3), WHITE);
    assert_eq!(pixel(&dashed, 5, 3), WHITE);
    assert_eq!(pixel(&dashed, 20, 3), CLEAR);
    assert_eq!(pixel(&dashed, 36, 3), WHITE);
    assert_eq!(pixel(&dashed, 5, 1), CLEAR);
}

#[test]
fn transparent_primitives_are_skipped() {
    let frame = render(
        Viewport::new(4, 4),
        vec![DrawPrimitive::LineLoop {
            rect: Rect::new(0.5, 0.5, 3.5, 3.5),
            color: Rgba::default().with_alpha(0.0),
            sides: true,
            dashed: false,
        }],
    );
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn text_is_aligned_from_its_extent() {
    let text = TextPrimitive {
        text: "HH".to_owned(),
        position: Point::new(16.0, 8.0),
        color: Rgba::default(),
        align: HAlign::Right,
        v_align: VAlign::Bottom,
        size: 8,
        bold: false,
        scale: 1.0,
    };
    assert_eq!(text_extent(&text), Vec2::new(16.0, 8.0));

    let frame = render(Viewport::new(32, 16), vec![DrawPrimitive::Text(text)]);
    let lit = |x0: u32, x1: u32, r0: u32, r1: u32| {
        (r0..r1).any(|r| (x0..x1).any(|x| pixel(&frame, x, r)[3] > 0))
    };
    // right-aligned at x=16, sitting on layout y=8: columns 0..16, rows 0..8
    assert!(lit(0, 16, 0, 8));
    assert!(!lit(16, 32, 0, 16));
    assert!(!lit(0, 32, 8, 16));
}

#[test]
fn backend_rejects_bad_surfaces() {
    let mut backend = CpuOverlayBackend::new(RenderSettings::default());
    assert!(backend.begin(Viewport::new(0, 10)).is_err());
    assert!(backend.begin(Viewport::new(70_000, 10)).is_err());
    assert!(
        backend
            .draw_line(Point::ORIGIN, Point::new(1.0, 1.0), Rgba::default(), false)
            .is_err()
    );
    assert!(backend.finish().is_err());
}
