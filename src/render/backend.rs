use crate::{
    foundation::core::{Point, Rect, Rgba, Viewport},
    foundation::error::ReticleResult,
    render::plan::{DrawPrimitive, OverlayPlan, TextPrimitive},
};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[..3].fill(0);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Background fill; transparent when `None`.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Draw-call sink for an [`OverlayPlan`]. Coordinates are viewport pixels, origin bottom left.
pub trait OverlayBackend {
    fn begin(&mut self, viewport: Viewport) -> ReticleResult<()>;

    fn draw_mask(
        &mut self,
        outer: &Rect,
        inner: &Rect,
        color: Rgba,
        draw_sides: bool,
        draw_top: bool,
    ) -> ReticleResult<()>;

    fn draw_line_loop(
        &mut self,
        rect: &Rect,
        color: Rgba,
        sides: bool,
        dashed: bool,
    ) -> ReticleResult<()>;

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, dashed: bool) -> ReticleResult<()>;

    fn draw_text(&mut self, text: &TextPrimitive) -> ReticleResult<()>;

    fn finish(&mut self) -> ReticleResult<FrameRGBA>;
}

pub fn execute_overlay<B: OverlayBackend + ?Sized>(
    backend: &mut B,
    plan: &OverlayPlan,
) -> ReticleResult<FrameRGBA> {
    backend.begin(plan.viewport)?;
    for prim in &plan.primitives {
        match prim {
            DrawPrimitive::MaskQuad {
                outer,
                inner,
                color,
                draw_sides,
                draw_top,
            } => backend.draw_mask(outer, inner, *color, *draw_sides, *draw_top)?,
            DrawPrimitive::LineLoop {
                rect,
                color,
                sides,
                dashed,
            } => backend.draw_line_loop(rect, *color, *sides, *dashed)?,
            DrawPrimitive::LineSegment {
                from,
                to,
                color,
                dashed,
            } => backend.draw_line(*from, *to, *color, *dashed)?,
            DrawPrimitive::Text(t) => backend.draw_text(t)?,
        }
    }
    backend.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
