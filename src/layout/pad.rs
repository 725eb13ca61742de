use crate::{
    config::model::PadConfig,
    foundation::core::Vec2,
    foundation::error::ReticleResult,
    geom::derive::{Inset, compute_inset_rect},
    geom::rect::Geom,
};

/// Pad rectangle: the filmback shrunk by a fixed physical amount (inches), centred.
///
/// Returns `None` when padding is off or both amounts are ~0, so "no pad" is distinguishable
/// from a pad drawn at zero size.
pub fn resolve_pad(
    filmback: &Geom,
    pad: &PadConfig,
    pixel_scale_x: f64,
    pixel_scale: f64,
) -> ReticleResult<Option<Geom>> {
    if !pad.is_active() {
        return Ok(None);
    }
    let margin = Vec2::new(
        pad.amount.x * pixel_scale_x / 2.0,
        pad.amount.y * pixel_scale / 2.0,
    );
    let geom = compute_inset_rect(filmback, Inset::Absolute(margin))?
        .with_colors(pad.line_color, pad.mask_color);
    Ok(Some(geom))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pad.rs"]
mod tests;
