pub use kurbo::{Point, Rect, Vec2};

/// Tolerance used when comparing physical measurements (inches) and pixel extents.
pub const EPSILON: f64 = 1e-7;

/// Viewport size in pixels, pulled from the host every frame.
///
/// Layout coordinates use a bottom-left origin with `y` growing upwards, matching the host
/// viewport; raster backends flip the axis when writing pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight-alpha color with float channels in `[0, 1]`; `a` is opacity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Build from a color plus the host's "transparency" convention (0 = opaque).
    pub fn from_transparency(r: f32, g: f32, b: f32, transparency: f32) -> Self {
        Self::new(r, g, b, 1.0 - transparency.clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Component-wise multiply of the color channels; alpha is untouched.
    pub fn tinted(self, r: f32, g: f32, b: f32) -> Self {
        Self {
            r: self.r * r,
            g: self.g * g,
            b: self.b * b,
            a: self.a,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        fn channel(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(1.0, 1.0, 1.0)
    }
}

pub(crate) fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
