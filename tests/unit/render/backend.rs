use super::*;
use crate::config::model::{HAlign, VAlign};
use crate::foundation::error::ReticleError;

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
    viewport: Option<Viewport>,
    fail_on_text: bool,
}

impl OverlayBackend for Recorder {
    fn begin(&mut self, viewport: Viewport) -> ReticleResult<()> {
        self.viewport = Some(viewport);
        self.calls.push("begin".into());
        Ok(())
    }

    fn draw_mask(
        &mut self,
        _: &Rect,
        _: &Rect,
        _: Rgba,
        sides: bool,
        top: bool,
    ) -> ReticleResult<()> {
        self.calls.push(format!("mask sides={sides} top={top}"));
        Ok(())
    }

    fn draw_line_loop(
        &mut self,
        _: &Rect,
        _: Rgba,
        sides: bool,
        dashed: bool,
    ) -> ReticleResult<()> {
        self.calls.push(format!("loop sides={sides} dashed={dashed}"));
        Ok(())
    }

    fn draw_line(&mut self, _: Point, _: Point, _: Rgba, dashed: bool) -> ReticleResult<()> {
        self.calls.push(format!("line dashed={dashed}"));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ReticleResult<()> {
        if self.fail_on_text {
            return Err(ReticleError::validation("no font"));
        }
        self.calls.push(format!("text {}", text.text));
        Ok(())
    }

    fn finish(&mut self) -> ReticleResult<FrameRGBA> {
        self.calls.push("finish".into());
        let vp = self.viewport.unwrap_or(Viewport::new(0, 0));
        Ok(FrameRGBA {
            width: vp.width,
            height: vp.height,
            data: vec![0; (vp.width * vp.height * 4) as usize],
            premultiplied: true,
        })
    }
}

fn sample_plan() -> OverlayPlan {
    let r = Rect::new(0.0, 0.0, 4.0, 4.0);
    let mut plan = OverlayPlan::new(Viewport::new(4, 4));
    plan.primitives = vec![
        DrawPrimitive::MaskQuad {
            outer: r,
            inner: r.inset(-1.0),
            color: Rgba::default(),
            draw_sides: true,
            draw_top: false,
        },
        DrawPrimitive::LineLoop {
            rect: r,
            color: Rgba::default(),
            sides: false,
            dashed: true,
        },
        DrawPrimitive::LineSegment {
            from: Point::ORIGIN,
            to: Point::new(4.0, 4.0),
            color: Rgba::default(),
            dashed: false,
        },
        DrawPrimitive::Text(TextPrimitive {
            text: "7".into(),
            position: Point::new(2.0, 2.0),
            color: Rgba::default(),
            align: HAlign::Center,
            v_align: VAlign::Middle,
            size: 12,
            bold: false,
            scale: 1.0,
        }),
    ];
    plan
}

#[test]
fn execute_overlay_dispatches_in_plan_order() {
    let mut rec = Recorder::default();
    let frame = execute_overlay(&mut rec, &sample_plan()).unwrap();
    assert_eq!(
        rec.calls,
        [
            "begin",
            "mask sides=true top=false",
            "loop sides=false dashed=true",
            "line dashed=false",
            "text 7",
            "finish",
        ]
    );
    assert_eq!((frame.width, frame.height), (4, 4));
}

#[test]
fn backend_errors_abort_execution() {
    let mut rec = Recorder {
        fail_on_text: true,
        ..Recorder::default()
    };
    assert!(execute_overlay(&mut rec, &sample_plan()).is_err());
    assert!(!rec.calls.iter().any(|c| c == "finish"));
}

#[test]
fn straight_alpha_conversion() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 9, 9, 9, 0],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![128, 64, 0, 128, 0, 0, 0, 0]);

    let straight = FrameRGBA {
        premultiplied: false,
        ..frame.clone()
    };
    assert_eq!(straight.to_straight_rgba8(), straight.data);
}
