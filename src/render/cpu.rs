use font8x8::{BASIC_FONTS, UnicodeFonts};

use crate::{
    config::model::{HAlign, VAlign},
    foundation::core::{EPSILON, Point, Rect, Rgba, Vec2, Viewport},
    foundation::error::{ReticleError, ReticleResult},
    render::backend::{FrameRGBA, OverlayBackend, RenderSettings},
    render::plan::{TextPrimitive, line_loop_segments, mask_quads},
};

/// Dash length of outline stipple (on and off), in pixels.
const LOOP_DASH: f64 = 8.0;
/// Dash length of single dashed lines, in pixels.
const LINE_DASH: f64 = 16.0;
const LINE_WIDTH: f64 = 1.0;
/// font8x8 glyphs are 8x8 cells.
const GLYPH_CELLS: f64 = 8.0;

/// Software rasteriser for overlay plans.
///
/// Shapes are filled with `vello_cpu`; lines become thin quads and text is drawn from
/// `font8x8` bitmaps scaled to the requested size. Output is premultiplied RGBA8, top row
/// first.
pub struct CpuOverlayBackend {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuOverlayBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    fn surface(&mut self) -> ReticleResult<&mut CpuSurface> {
        self.surface
            .as_mut()
            .ok_or_else(|| ReticleError::validation("cpu overlay: begin() was not called"))
    }
}

impl OverlayBackend for CpuOverlayBackend {
    fn begin(&mut self, viewport: Viewport) -> ReticleResult<()> {
        if viewport.is_empty() {
            return Err(ReticleError::validation(format!(
                "cpu overlay: viewport {}x{} has no pixels",
                viewport.width, viewport.height
            )));
        }
        let width: u16 = viewport
            .width
            .try_into()
            .map_err(|_| ReticleError::validation("cpu overlay: width exceeds u16"))?;
        let height: u16 = viewport
            .height
            .try_into()
            .map_err(|_| ReticleError::validation("cpu overlay: height exceeds u16"))?;

        let mut surface = CpuSurface {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        };
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            surface
                .ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            surface.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }
        self.surface = Some(surface);
        Ok(())
    }

    fn draw_mask(
        &mut self,
        outer: &Rect,
        inner: &Rect,
        color: Rgba,
        draw_sides: bool,
        draw_top: bool,
    ) -> ReticleResult<()> {
        let s = self.surface()?;
        if !s.set_color(color) {
            return Ok(());
        }
        for quad in mask_quads(outer, inner, draw_sides, draw_top) {
            s.fill_polygon(&quad);
        }
        Ok(())
    }

    fn draw_line_loop(
        &mut self,
        rect: &Rect,
        color: Rgba,
        sides: bool,
        dashed: bool,
    ) -> ReticleResult<()> {
        let s = self.surface()?;
        if !s.set_color(color) {
            return Ok(());
        }
        let dash = dashed.then_some(LOOP_DASH);
        for (from, to) in line_loop_segments(rect, sides) {
            s.stroke_segment(from, to, dash);
        }
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgba,
        dashed: bool,
    ) -> ReticleResult<()> {
        let s = self.surface()?;
        if s.set_color(color) {
            s.stroke_segment(from, to, dashed.then_some(LINE_DASH));
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ReticleResult<()> {
        let s = self.surface()?;
        if s.set_color(text.color) {
            s.fill_text(text);
        }
        Ok(())
    }

    fn finish(&mut self) -> ReticleResult<FrameRGBA> {
        let mut s = self
            .surface
            .take()
            .ok_or_else(|| ReticleError::validation("cpu overlay: begin() was not called"))?;
        s.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(s.width, s.height);
        s.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(s.width),
            height: u32::from(s.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Pixel extent of `text` when drawn with font8x8 glyphs.
pub fn text_extent(text: &TextPrimitive) -> Vec2 {
    let cell = text.pixel_size();
    Vec2::new(text.text.chars().count() as f64 * cell, cell)
}

impl CpuSurface {
    /// Sets the paint; returns false for fully transparent colors.
    fn set_color(&mut self, color: Rgba) -> bool {
        let [r, g, b, a] = color.to_rgba8();
        if a == 0 {
            return false;
        }
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        true
    }

    fn device_point(&self, p: Point) -> vello_cpu::kurbo::Point {
        vello_cpu::kurbo::Point::new(p.x, f64::from(self.height) - p.y)
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(self.device_point(*first));
        for p in rest {
            path.line_to(self.device_point(*p));
        }
        path.close_path();
        self.ctx.fill_path(&path);
    }

    /// Axis-aligned fill given in layout coordinates.
    fn fill_box(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let h = f64::from(self.height);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x0, h - y1, x1, h - y0));
    }

    fn stroke_segment(&mut self, from: Point, to: Point, dash: Option<f64>) {
        let d = to - from;
        let len = d.hypot();
        if len < EPSILON {
            return;
        }
        let dir = d / len;
        let n = Vec2::new(-dir.y, dir.x) * (LINE_WIDTH / 2.0);
        let mut piece = |t0: f64, t1: f64| {
            let a = from + dir * t0;
            let b = from + dir * t1;
            self.fill_polygon(&[a + n, b + n, b - n, a - n]);
        };
        match dash {
            None => piece(0.0, len),
            Some(step) => {
                let mut t = 0.0;
                while t < len {
                    piece(t, (t + step).min(len));
                    t += step * 2.0;
                }
            }
        }
    }

    fn fill_text(&mut self, text: &TextPrimitive) {
        let extent = text_extent(text);
        let cell = extent.y / GLYPH_CELLS;
        if cell <= 0.0 {
            return;
        }
        let mut x = text.position.x;
        let mut y = text.position.y;
        match text.align {
            HAlign::Left => {}
            HAlign::Center => x -= extent.x / 2.0,
            HAlign::Right => x -= extent.x,
        }
        match text.v_align {
            VAlign::Bottom => {}
            VAlign::Middle => y -= extent.y / 2.0,
            VAlign::Top => y -= extent.y,
        }
        let advance = extent.y;
        let bold = if text.bold { cell / 2.0 } else { 0.0 };

        for ch in text.text.chars() {
            if let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) {
                for (row, bits) in glyph.iter().enumerate() {
                    let top = y + extent.y - row as f64 * cell;
                    for col in 0..8u8 {
                        if (bits >> col) & 1 == 0 {
                            continue;
                        }
                        let left = x + f64::from(col) * cell;
                        self.fill_box(left, top - cell, left + cell + bold, top);
                    }
                }
            }
            x += advance;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
