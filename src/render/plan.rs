use crate::{
    config::model::{HAlign, VAlign},
    foundation::core::{EPSILON, Point, Rect, Rgba, Viewport},
    layout::solver::LayoutIssue,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    /// Anchor point, offset already applied. Alignment is resolved by the backend.
    pub position: Point,
    pub color: Rgba,
    pub align: HAlign,
    pub v_align: VAlign,
    pub size: u32,
    pub bold: bool,
    /// Multiplier on `size` (screen-relative text).
    pub scale: f64,
}

impl TextPrimitive {
    /// Nominal glyph height in pixels.
    pub fn pixel_size(&self) -> f64 {
        f64::from(self.size) * self.scale
    }
}

/// One overlay draw call, in viewport pixels with the origin at the bottom left.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawPrimitive {
    /// Band between `outer` and `inner`. Top and bottom bands are skipped when `draw_top` is
    /// false; left and right bands only exist when `draw_sides` is set.
    MaskQuad {
        outer: Rect,
        inner: Rect,
        color: Rgba,
        draw_sides: bool,
        draw_top: bool,
    },
    /// Rectangle outline. Without `sides` only the bottom and top edges are drawn.
    LineLoop {
        rect: Rect,
        color: Rgba,
        sides: bool,
        dashed: bool,
    },
    LineSegment {
        from: Point,
        to: Point,
        color: Rgba,
        dashed: bool,
    },
    Text(TextPrimitive),
}

/// Ordered draw list for one frame plus the elements skipped while building it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayPlan {
    pub viewport: Viewport,
    pub primitives: Vec<DrawPrimitive>,
    pub issues: Vec<LayoutIssue>,
}

impl OverlayPlan {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            primitives: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }
}

/// Quadrilaterals covering a mask band, counter-clockwise from the first vertex.
///
/// Bottom and top bands span the full outer width and taper to the inner edge; side bands
/// fill the remaining trapezoids. Bands thinner than [`EPSILON`] are dropped.
pub fn mask_quads(outer: &Rect, inner: &Rect, draw_sides: bool, draw_top: bool) -> Vec<[Point; 4]> {
    let mut quads = Vec::with_capacity(4);
    let mut o = *outer;
    if draw_top {
        if inner.y0 - o.y0 > EPSILON {
            quads.push([
                Point::new(o.x0, o.y0),
                Point::new(o.x1, o.y0),
                Point::new(inner.x1, inner.y0),
                Point::new(inner.x0, inner.y0),
            ]);
        }
        if o.y1 - inner.y1 > EPSILON {
            quads.push([
                Point::new(inner.x0, inner.y1),
                Point::new(inner.x1, inner.y1),
                Point::new(o.x1, o.y1),
                Point::new(o.x0, o.y1),
            ]);
        }
    } else {
        o.y0 = inner.y0;
        o.y1 = inner.y1;
    }
    if draw_sides {
        if inner.x0 - o.x0 > EPSILON {
            quads.push([
                Point::new(o.x0, o.y0),
                Point::new(inner.x0, inner.y0),
                Point::new(inner.x0, inner.y1),
                Point::new(o.x0, o.y1),
            ]);
        }
        if o.x1 - inner.x1 > EPSILON {
            quads.push([
                Point::new(inner.x1, inner.y0),
                Point::new(o.x1, o.y0),
                Point::new(o.x1, o.y1),
                Point::new(inner.x1, inner.y1),
            ]);
        }
    }
    quads
}

/// Edges of a rectangle outline: bottom and top, plus left and right with `sides`.
pub fn line_loop_segments(rect: &Rect, sides: bool) -> Vec<(Point, Point)> {
    let bl = Point::new(rect.x0, rect.y0);
    let br = Point::new(rect.x1, rect.y0);
    let tr = Point::new(rect.x1, rect.y1);
    let tl = Point::new(rect.x0, rect.y1);
    if sides {
        vec![(bl, br), (br, tr), (tr, tl), (tl, bl)]
    } else {
        vec![(bl, br), (tr, tl)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
