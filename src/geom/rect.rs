use crate::foundation::core::{EPSILON, Point, Rect, Rgba, Vec2};

/// One labelled rectangle of the reticle, in viewport pixels (bottom-left origin).
///
/// `rect` holds the bounds. `extent` is the nominal size the rectangle was derived from and
/// is what proportional insets scale against: for the filmback, image and pan/scan windows it
/// is the on-screen (squeezed) size, for aspect-ratio boxes the horizontal component is the
/// de-squeezed width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geom {
    pub rect: Rect,
    pub extent: Vec2,
    pub line_color: Rgba,
    pub mask_color: Rgba,
}

impl Geom {
    pub fn new(rect: Rect, extent: Vec2) -> Self {
        Self {
            rect,
            extent,
            line_color: Rgba::default(),
            mask_color: Rgba::default(),
        }
    }

    /// Rectangle of `size` centred on `center`; the extent is the size itself.
    pub fn centered(center: Point, size: Vec2) -> Self {
        Self::new(Rect::from_center_size(center, size.to_size()), size)
    }

    pub fn with_colors(self, line_color: Rgba, mask_color: Rgba) -> Self {
        Self {
            line_color,
            mask_color,
            ..self
        }
    }

    pub fn x1(&self) -> f64 {
        self.rect.x0
    }

    pub fn x2(&self) -> f64 {
        self.rect.x1
    }

    /// Bottom edge.
    pub fn y1(&self) -> f64 {
        self.rect.y0
    }

    /// Top edge.
    pub fn y2(&self) -> f64 {
        self.rect.y1
    }

    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// True when `inner` lies inside `self`, allowing for float noise at the edges.
    pub fn encloses(&self, inner: &Geom) -> bool {
        inner.x1() >= self.x1() - EPSILON
            && inner.x2() <= self.x2() + EPSILON
            && inner.y1() >= self.y1() - EPSILON
            && inner.y2() <= self.y2() + EPSILON
    }
}
