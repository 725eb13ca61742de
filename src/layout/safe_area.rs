use crate::{
    foundation::core::Vec2,
    foundation::error::ReticleResult,
    geom::derive::{Inset, compute_inset_rect},
    geom::rect::Geom,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeArea {
    /// 90% of the parent.
    Action,
    /// 80% of the parent.
    Title,
}

impl SafeArea {
    pub fn reference(self) -> f64 {
        match self {
            Self::Action => 0.9,
            Self::Title => 0.8,
        }
    }
}

/// Proportional inset of `parent`.
///
/// With `w >= 0` the horizontal margin is `(ref_w - w) / 2 / ref_w` of the parent's extent
/// (explicit sizes against a reference aperture); with `w < 0` it is `(1 - ref_w) / 2`
/// (a plain percentage). Same for `h`. The horizontal margin is scaled by `lens_squeeze`.
pub fn derive_inset(
    parent: &Geom,
    w: f64,
    h: f64,
    ref_w: f64,
    ref_h: f64,
    lens_squeeze: f64,
) -> ReticleResult<Geom> {
    let pw = if w >= 0.0 {
        ((ref_w - w) / 2.0) / ref_w
    } else {
        (1.0 - ref_w) / 2.0
    };
    let ph = if h >= 0.0 {
        ((ref_h - h) / 2.0) / ref_h
    } else {
        (1.0 - ref_h) / 2.0
    };
    compute_inset_rect(parent, Inset::Fraction(Vec2::new(pw * lens_squeeze, ph)))
}

pub fn derive_safe_area(parent: &Geom, area: SafeArea, lens_squeeze: f64) -> ReticleResult<Geom> {
    let r = area.reference();
    derive_inset(parent, -1.0, -1.0, r, r, lens_squeeze)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/safe_area.rs"]
mod tests;
