use crate::{
    config::model::{DisplayMode, HAlign, ReticleConfig, VAlign},
    foundation::core::{EPSILON, Point, Rgba, nearly_equal},
    foundation::error::ReticleError,
    geom::rect::Geom,
    layout::aspect::AspectLayout,
    layout::filmback::FilmbackLayout,
    layout::solver::{LayoutIssue, ReticleLayout},
    render::plan::{DrawPrimitive, OverlayPlan, TextPrimitive},
    text::anchor::{resolve_anchor, resolve_position, text_scale},
    text::dynamic::{TextContext, resolve_text},
};

/// Nested lines per side of the field guide.
pub const FIELD_GUIDE_LINES: u32 = 11;
const CROSSHAIR_OUTER: f64 = 25.0;
const CROSSHAIR_INNER: f64 = 5.0;
const GUIDE_TEXT_SIZE: u32 = 12;

/// Builds the draw list for one frame.
///
/// Primitives are emitted back to front: filmback, pad mask, aspect masks, aspect outlines,
/// pan/scan, projection gate, filmback safe areas, guides, pad outline, then text. Text
/// anchors may resolve safe areas lazily, which is why the layout is borrowed mutably.
/// Elements that cannot be drawn are recorded in `OverlayPlan::issues` and skipped.
#[tracing::instrument(
    skip_all,
    fields(width = layout.viewport.width, height = layout.viewport.height)
)]
pub fn compile_overlay(
    config: &ReticleConfig,
    layout: &mut ReticleLayout,
    ctx: &TextContext,
) -> OverlayPlan {
    let mut plan = OverlayPlan::new(layout.viewport);
    plan.issues.extend(layout.issues.iter().cloned());

    if !config.options.drawing_enabled || config.camera.orthographic {
        tracing::debug!("overlay drawing disabled");
        return plan;
    }

    if let Some(fl) = layout.filmback.clone() {
        let container = compile_frame(config, layout, &fl, &mut plan);
        compile_guides(config, &fl, &container, &mut plan);
        if let Some(pad) = fl.pad {
            let mode = config.pad.display;
            if mode.is_displayed() {
                plan.outline(&pad, pad.line_color, true, mode.is_dashed());
            }
        }
    }
    if config.options.enable_text_drawing {
        compile_text(config, layout, ctx, &mut plan);
    }

    tracing::debug!(
        primitives = plan.len(),
        skipped = plan.issues.len(),
        "overlay compiled"
    );
    plan
}

impl OverlayPlan {
    fn mask(&mut self, outer: &Geom, inner: &Geom, color: Rgba, draw_sides: bool, draw_top: bool) {
        self.primitives.push(DrawPrimitive::MaskQuad {
            outer: outer.rect,
            inner: inner.rect,
            color,
            draw_sides,
            draw_top,
        });
    }

    fn outline(&mut self, geom: &Geom, color: Rgba, sides: bool, dashed: bool) {
        self.primitives.push(DrawPrimitive::LineLoop {
            rect: geom.rect,
            color,
            sides,
            dashed,
        });
    }

    fn segment(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba) {
        self.primitives.push(DrawPrimitive::LineSegment {
            from: Point::new(from.0, from.1),
            to: Point::new(to.0, to.1),
            color,
            dashed: false,
        });
    }

    fn skip(&mut self, element: String, err: &ReticleError) {
        let issue = LayoutIssue::new(element, err);
        tracing::warn!(element = %issue.element, "{}", issue.message);
        self.issues.push(issue);
    }
}

/// Filmback, pad, aspect, pan/scan, gate and filmback safe-area primitives. Returns the
/// aspect container (viewport, masked filmback or pad) the thirds guides are drawn in.
fn compile_frame(
    config: &ReticleConfig,
    layout: &ReticleLayout,
    fl: &FilmbackLayout,
    plan: &mut OverlayPlan,
) -> Geom {
    let mut container = layout.port;

    let fb_mode = config.filmback.display;
    if fb_mode.is_displayed() {
        if fb_mode.is_mask() {
            plan.mask(&container, &fl.filmback, fl.filmback.mask_color, true, true);
            container = fl.filmback;
        }
        plan.outline(&fl.filmback, fl.filmback.line_color, true, fb_mode.is_dashed());
        if let (true, Some(image)) = (config.filmback.sound_track_width > EPSILON, fl.image) {
            let x = image.x1();
            plan.segment((x, image.y1()), (x, image.y2()), image.line_color);
        }
    }

    if let Some(pad) = fl.pad {
        if config.pad.display.is_mask() {
            plan.mask(&container, &pad, pad.mask_color, true, true);
        }
        container = pad;
    }

    let options = &config.options;
    let over_distance =
        options.maximum_distance > 0.0 && layout.max_distance.abs() >= options.maximum_distance;

    for (idx, entry) in config.aspect_ratios.iter().enumerate() {
        if !entry.display.is_mask() {
            continue;
        }
        let Some(ar) = layout.aspect_ratios.get(idx).and_then(Option::as_ref) else {
            continue;
        };
        let innermost = layout.aspect_ratios[..idx].iter().all(Option::is_none);
        let outer = layout.aspect_predecessor(idx, container);
        let mut color = ar.geom.mask_color;
        if over_distance {
            color = if innermost {
                Rgba::new(1.0, 0.0, 0.0, color.a)
            } else {
                color.tinted(1.5, 0.5, 0.5)
            };
        }
        plan.mask(&outer, &ar.geom, color, innermost, true);
        safe_area_masks(plan, ar, entry.safe_action, entry.safe_title, color);
    }

    let mut previous: Option<Geom> = None;
    for (idx, entry) in config.aspect_ratios.iter().enumerate() {
        let Some(ar) = layout.aspect_ratios.get(idx).and_then(Option::as_ref) else {
            continue;
        };
        let sides = previous.is_none_or(|p| !nearly_equal(p.width(), ar.geom.width()));
        plan.outline(&ar.geom, ar.geom.line_color, sides, entry.display.is_dashed());
        safe_area_lines(plan, ar, entry.safe_action, entry.safe_title);
        previous = Some(ar.geom);
    }

    let ps_entry = &config.pan_scan.base;
    if let (true, Some(ps)) = (ps_entry.display.is_displayed(), layout.pan_scan.as_ref()) {
        if ps_entry.display.is_mask() {
            let color = ps.geom.mask_color;
            plan.mask(&fl.image_or_filmback(), &ps.geom, color, true, false);
            safe_area_masks(plan, ps, ps_entry.safe_action, ps_entry.safe_title, color);
        }
        plan.outline(&ps.geom, ps.geom.line_color, true, false);
        safe_area_lines(plan, ps, ps_entry.safe_action, ps_entry.safe_title);
    }

    if let Some(gate) = layout.projection_gate {
        let mode = config.projection_gate.display;
        if mode.is_mask() {
            plan.mask(&fl.filmback, &gate, gate.mask_color, true, true);
        }
        plan.outline(&gate, gate.line_color, true, mode.is_dashed());
    }

    for (mode, geom) in [
        (config.safe_action.display, layout.filmback_safe_action),
        (config.safe_title.display, layout.filmback_safe_title),
    ] {
        if let (true, Some(g)) = (mode.is_displayed(), geom) {
            plan.outline(&g, g.line_color, true, mode.is_dashed());
        }
    }

    container
}

/// Safe-area bands inside an aspect or pan/scan box. Opacity drops to 0.66/0.33 of the
/// parent mask when both are masked, 0.5 when only one is.
fn safe_area_masks(
    plan: &mut OverlayPlan,
    ar: &AspectLayout,
    action: DisplayMode,
    title: DisplayMode,
    color: Rgba,
) {
    let mut outer = ar.geom;
    if let (true, Some(sa)) = (action.is_mask(), ar.safe_action) {
        let factor = if title.is_mask() { 0.66 } else { 0.5 };
        plan.mask(&ar.geom, &sa, color.with_alpha(color.a * factor), true, true);
        outer = sa;
    }
    if let (true, Some(st)) = (title.is_mask(), ar.safe_title) {
        let factor = if action.is_mask() { 0.33 } else { 0.5 };
        plan.mask(&outer, &st, color.with_alpha(color.a * factor), true, true);
    }
}

fn safe_area_lines(
    plan: &mut OverlayPlan,
    ar: &AspectLayout,
    action: DisplayMode,
    title: DisplayMode,
) {
    for (mode, geom) in [(action, ar.safe_action), (title, ar.safe_title)] {
        if let (true, Some(g)) = (mode.is_displayed(), geom) {
            plan.outline(&g, g.line_color, true, mode.is_dashed());
        }
    }
}

fn compile_guides(
    config: &ReticleConfig,
    fl: &FilmbackLayout,
    container: &Geom,
    plan: &mut OverlayPlan,
) {
    let options = &config.options;
    let color = options.line_color;
    let image = fl.image_or_filmback();
    let cx = image.center().x;
    let cy = fl.center.y;

    if options.display_line_h {
        plan.segment((image.x1(), cy), (image.x2(), cy), color);
    }
    if options.display_line_v {
        plan.segment((cx, image.y1()), (cx, image.y2()), color);
    }
    if options.display_thirds_h {
        for t in [1.0 / 3.0, 2.0 / 3.0] {
            let y = container.y1() + container.height() * t;
            plan.segment((container.x1(), y), (container.x2(), y), color);
        }
    }
    if options.display_thirds_v {
        for t in [1.0 / 3.0, 2.0 / 3.0] {
            let x = container.x1() + container.width() * t;
            plan.segment((x, container.y1()), (x, container.y2()), color);
        }
    }
    if options.display_crosshair {
        let (o, i) = (CROSSHAIR_OUTER, CROSSHAIR_INNER);
        plan.segment((cx - o, cy), (cx - i, cy), color);
        plan.segment((cx + o, cy), (cx + i, cy), color);
        plan.segment((cx, cy - o), (cx, cy - i), color);
        plan.segment((cx, cy + o), (cx, cy + i), color);
    }
    if options.display_field_guide {
        compile_field_guide(config, fl, plan);
    }
}

fn compile_field_guide(config: &ReticleConfig, fl: &FilmbackLayout, plan: &mut OverlayPlan) {
    let options = &config.options;
    let color = options.line_color;
    let image = fl.image_or_filmback();
    let n = FIELD_GUIDE_LINES;
    let steps = f64::from(n + 1);
    let sx = image.extent.x / 2.0 / steps;
    let sy = image.extent.y / 2.0 / steps;
    let c = image.center();

    if !config.filmback.display.is_displayed() {
        plan.outline(&fl.filmback, color, true, false);
    }

    for i in 1..=n {
        let (lx1, lx2) = (image.x1() + sx * f64::from(i), image.x2() - sx * f64::from(i));
        let (ly1, ly2) = (image.y1() + sy * f64::from(i), image.y2() - sy * f64::from(i));
        plan.segment((lx1, image.y1()), (lx1, image.y2()), color);
        plan.segment((lx2, image.y1()), (lx2, image.y2()), color);
        plan.segment((image.x1(), ly1), (image.x2(), ly1), color);
        plan.segment((image.x1(), ly2), (image.x2(), ly2), color);
    }

    plan.segment((c.x, image.y1()), (c.x, image.y2()), color);
    plan.segment((image.x1(), c.y), (image.x2(), c.y), color);
    plan.segment((image.x1(), image.y1()), (image.x2(), image.y2()), color);
    plan.segment((image.x1(), image.y2()), (image.x2(), image.y1()), color);

    for i in 1..=n {
        let label = (n - i + 1).to_string();
        let (lx1, lx2) = (image.x1() + sx * f64::from(i), image.x2() - sx * f64::from(i));
        let (ly1, ly2) = (image.y1() + sy * f64::from(i), image.y2() - sy * f64::from(i));
        for (x, y) in [(lx1, ly1), (lx2, ly1), (lx1, ly2), (lx2, ly2)] {
            plan.primitives.push(DrawPrimitive::Text(TextPrimitive {
                text: label.clone(),
                position: Point::new(x, y),
                color: options.text_color,
                align: HAlign::Center,
                v_align: VAlign::Middle,
                size: GUIDE_TEXT_SIZE,
                bold: false,
                scale: 1.0,
            }));
        }
    }
}

fn compile_text(
    config: &ReticleConfig,
    layout: &mut ReticleLayout,
    ctx: &TextContext,
    plan: &mut OverlayPlan,
) {
    for (idx, text) in config.text.iter().enumerate() {
        if !text.enabled {
            continue;
        }
        let element = format!("text {idx}");
        let string = match resolve_text(text, config, layout.max_distance, ctx) {
            Ok(s) => s,
            Err(err) => {
                plan.skip(element, &err);
                continue;
            }
        };
        let geom = match resolve_anchor(text, config, layout) {
            Ok(g) => g,
            Err(err) => {
                plan.skip(element, &err);
                continue;
            }
        };
        if string.is_empty() {
            continue;
        }
        let scale = text_scale(text, layout);
        plan.primitives.push(DrawPrimitive::Text(TextPrimitive {
            text: string,
            position: resolve_position(text, &geom, scale),
            color: text.color,
            align: text.align,
            v_align: text.v_align,
            size: text.clamped_size(),
            bold: text.bold,
            scale,
        }));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compile.rs"]
mod tests;
