use crate::{
    config::model::AspectRatioEntry,
    foundation::core::{Point, Rect, Vec2},
    foundation::error::{ReticleError, ReticleResult},
    geom::rect::Geom,
    layout::safe_area::{SafeArea, derive_safe_area},
};

/// A resolved aspect-ratio (or pan/scan) box with its lazily derived safe areas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AspectLayout {
    pub ratio: f64,
    pub geom: Geom,
    pub lens_squeeze: f64,
    pub safe_action: Option<Geom>,
    pub safe_title: Option<Geom>,
}

impl AspectLayout {
    /// Builds the layout and eagerly derives the safe areas the entry displays.
    pub(crate) fn with_safe_areas(
        ratio: f64,
        geom: Geom,
        lens_squeeze: f64,
        entry: &AspectRatioEntry,
    ) -> ReticleResult<Self> {
        let mut out = Self {
            ratio,
            geom,
            lens_squeeze,
            safe_action: None,
            safe_title: None,
        };
        if entry.safe_action.is_displayed() {
            out.safe_area(SafeArea::Action)?;
        }
        if entry.safe_title.is_displayed() {
            out.safe_area(SafeArea::Title)?;
        }
        Ok(out)
    }

    /// Returns the memoized safe area, deriving it on first use.
    pub fn safe_area(&mut self, area: SafeArea) -> ReticleResult<Geom> {
        let parent = self.geom;
        let squeeze = self.lens_squeeze;
        let slot = match area {
            SafeArea::Action => &mut self.safe_action,
            SafeArea::Title => &mut self.safe_title,
        };
        if let Some(g) = slot {
            return Ok(*g);
        }
        let g = derive_safe_area(&parent, area, squeeze)?;
        *slot = Some(g);
        Ok(g)
    }
}

/// Letterboxed box for one entry: horizontal bounds are the image's, height follows the ratio
/// from the de-squeezed image width, vertically centred on `center`.
pub fn resolve_aspect(
    entry: &AspectRatioEntry,
    image: &Geom,
    center: Point,
    lens_squeeze: f64,
) -> ReticleResult<AspectLayout> {
    if !(entry.ratio.is_finite() && entry.ratio > 0.0) {
        return Err(ReticleError::invalid_config(format!(
            "aspect ratio must be > 0, got {}",
            entry.ratio
        )));
    }
    let width = image.extent.x / lens_squeeze;
    let height = width / entry.ratio;
    let rect = Rect::new(
        image.x1(),
        center.y - height / 2.0,
        image.x2(),
        center.y + height / 2.0,
    );
    let geom =
        Geom::new(rect, Vec2::new(width, height)).with_colors(entry.line_color, entry.mask_color);
    AspectLayout::with_safe_areas(entry.ratio, geom, lens_squeeze, entry)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/aspect.rs"]
mod tests;
