use crate::{
    config::model::PanScanEntry,
    foundation::core::{Point, Rect, Vec2},
    foundation::error::{ReticleError, ReticleResult},
    geom::rect::Geom,
    layout::aspect::AspectLayout,
};

/// Pan-and-scan crop window inside the image rectangle.
///
/// The three fit branches are evaluated in order; at ties the first matching branch wins.
pub fn resolve_pan_scan(
    entry: &PanScanEntry,
    image: &Geom,
    image_aperture: Vec2,
    center: Point,
    lens_squeeze: f64,
) -> ReticleResult<AspectLayout> {
    let film_ar = image_aperture.x / image_aperture.y;
    let area_ar = if entry.base.ratio < 0.0 {
        film_ar
    } else {
        entry.base.ratio
    };
    let ratio = entry.pan_scan_ratio;
    for (what, v) in [
        ("filmback ratio", film_ar),
        ("pan/scan aspect ratio", area_ar),
        ("pan/scan ratio", ratio),
    ] {
        if !(v.is_finite() && v > 0.0) {
            return Err(ReticleError::invalid_config(format!(
                "{what} must be > 0, got {v}"
            )));
        }
    }

    let desqueezed_width = image.extent.x / lens_squeeze;
    let (mut width, height) = if area_ar > film_ar && ratio < area_ar {
        let h = desqueezed_width / area_ar;
        (h * ratio, h)
    } else if ratio > film_ar {
        (desqueezed_width, desqueezed_width / ratio)
    } else {
        let h = image.extent.y;
        (h * ratio, h)
    };
    width *= lens_squeeze;

    let offset = entry.pan_scan_offset.clamp(-1.0, 1.0);
    let x1 = image.x1() + ((offset + 1.0) / 2.0) * (image.extent.x - width);
    let rect = Rect::new(
        x1,
        center.y - height / 2.0,
        x1 + width,
        center.y + height / 2.0,
    );
    let geom = Geom::new(rect, Vec2::new(width, height))
        .with_colors(entry.base.line_color, entry.base.mask_color);
    AspectLayout::with_safe_areas(ratio, geom, lens_squeeze, &entry.base)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pan_scan.rs"]
mod tests;
