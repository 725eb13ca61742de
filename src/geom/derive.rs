use crate::{
    foundation::core::{EPSILON, Rect, Vec2, Viewport},
    foundation::error::{ReticleError, ReticleResult},
    foundation::math::rect_is_finite,
    geom::rect::Geom,
};

/// How far each edge of a parent rectangle moves inwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inset {
    /// Per-side margin as a fraction of the parent's extent.
    Fraction(Vec2),
    /// Per-side margin in pixels.
    Absolute(Vec2),
}

pub fn compute_viewport_rect(viewport: Viewport) -> Geom {
    let size = viewport.size();
    Geom::new(Rect::new(0.0, 0.0, size.x, size.y), size)
}

/// Shrinks `parent` symmetrically. Colors are inherited from the parent.
pub fn compute_inset_rect(parent: &Geom, inset: Inset) -> ReticleResult<Geom> {
    let margin = match inset {
        Inset::Fraction(f) => Vec2::new(parent.extent.x * f.x, parent.extent.y * f.y),
        Inset::Absolute(px) => px,
    };
    let rect = Rect::new(
        parent.rect.x0 + margin.x,
        parent.rect.y0 + margin.y,
        parent.rect.x1 - margin.x,
        parent.rect.y1 - margin.y,
    );
    if !rect_is_finite(&rect) {
        return Err(ReticleError::invalid_config(
            "inset produced non-finite bounds",
        ));
    }
    if rect.x0 > rect.x1 + EPSILON || rect.y0 > rect.y1 + EPSILON {
        return Err(ReticleError::invalid_config(format!(
            "inset ({:.3}, {:.3}) exceeds parent rectangle {}x{}",
            margin.x,
            margin.y,
            parent.width(),
            parent.height()
        )));
    }
    Ok(Geom {
        rect,
        extent: parent.extent - margin * 2.0,
        ..*parent
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geom/derive.rs"]
mod tests;
