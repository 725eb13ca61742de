use crate::{
    config::model::{AnchorLevel, ReticleConfig, RelativePosition, TextElement, TextType},
    foundation::core::Point,
    foundation::error::{ReticleError, ReticleResult},
    geom::rect::Geom,
    layout::safe_area::SafeArea,
    layout::solver::ReticleLayout,
};

/// Filmback width at which scaled text is drawn at its nominal size.
pub const TEXT_REFERENCE_WIDTH: f64 = 1280.0;

fn safe_area_marker(text_type: TextType) -> Option<SafeArea> {
    match text_type {
        TextType::SafeAction => Some(SafeArea::Action),
        TextType::SafeTitle => Some(SafeArea::Title),
        _ => None,
    }
}

/// Rectangle a text element is anchored to.
///
/// Safe-area sub-rectangles of the filmback, aspect-ratio and pan/scan levels are derived
/// on demand and memoized in `layout`, so repeated calls return the same geometry.
pub fn resolve_anchor(
    text: &TextElement,
    config: &ReticleConfig,
    layout: &mut ReticleLayout,
) -> ReticleResult<Geom> {
    let safe = safe_area_marker(text.text_type);
    match text.level {
        AnchorLevel::Window => Ok(layout.port),
        AnchorLevel::PadOrFilmback => Ok(layout.pad_or_filmback()),
        AnchorLevel::Filmback => match safe {
            Some(area) => layout.filmback_safe_area(config, area),
            None => layout
                .filmback
                .as_ref()
                .map(|fl| fl.filmback)
                .ok_or_else(|| ReticleError::invalid_config("filmback could not be resolved")),
        },
        AnchorLevel::ProjectionGate => {
            if !config.projection_gate.display.is_displayed() {
                return Err(ReticleError::undisplayed("projection gate is not displayed"));
            }
            layout.projection_gate.ok_or_else(|| {
                ReticleError::invalid_config("projection gate could not be resolved")
            })
        }
        AnchorLevel::AspectRatio => {
            let ar = layout.aspect_layout(i64::from(text.ar_level))?;
            match safe {
                Some(area) => ar.safe_area(area),
                None => Ok(ar.geom),
            }
        }
        AnchorLevel::PanScan => {
            let ps = layout.pan_scan_layout(config)?;
            match safe {
                Some(area) => ps.safe_area(area),
                None => Ok(ps.geom),
            }
        }
    }
}

/// Corner, edge midpoint or centre of `geom` (y up: `y1` is the bottom edge).
pub fn anchor_point(position: RelativePosition, geom: &Geom) -> Point {
    let c = geom.center();
    let (x, y) = match position {
        RelativePosition::BottomLeft => (geom.x1(), geom.y1()),
        RelativePosition::BottomCenter => (c.x, geom.y1()),
        RelativePosition::BottomRight => (geom.x2(), geom.y1()),
        RelativePosition::MiddleLeft => (geom.x1(), c.y),
        RelativePosition::Center => (c.x, c.y),
        RelativePosition::MiddleRight => (geom.x2(), c.y),
        RelativePosition::TopLeft => (geom.x1(), geom.y2()),
        RelativePosition::TopCenter => (c.x, geom.y2()),
        RelativePosition::TopRight => (geom.x2(), geom.y2()),
    };
    Point::new(x, y)
}

/// Size and offset multiplier: `filmback_width / 1280` for scaled text, else 1.
pub fn text_scale(text: &TextElement, layout: &ReticleLayout) -> f64 {
    if !text.scale {
        return 1.0;
    }
    layout
        .filmback
        .as_ref()
        .map_or(1.0, |fl| fl.filmback.width() / TEXT_REFERENCE_WIDTH)
}

/// Anchor point plus the element's pixel offset, scaled by `scale`.
pub fn resolve_position(text: &TextElement, geom: &Geom, scale: f64) -> Point {
    anchor_point(text.position, geom) + text.offset * scale
}

#[cfg(test)]
#[path = "../../tests/unit/text/anchor.rs"]
mod tests;
