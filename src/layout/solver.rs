use crate::{
    config::model::ReticleConfig,
    foundation::core::{Point, Viewport},
    foundation::error::{ReticleError, ReticleResult},
    foundation::math::dominant_component,
    geom::derive::compute_viewport_rect,
    geom::rect::Geom,
    layout::aspect::{AspectLayout, resolve_aspect},
    layout::filmback::{FilmbackLayout, resolve_filmback},
    layout::pan_scan::resolve_pan_scan,
    layout::safe_area::{SafeArea, derive_inset},
};

/// An element that was skipped for this frame, with the reason.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutIssue {
    pub element: String,
    pub message: String,
}

impl LayoutIssue {
    pub fn new(element: impl Into<String>, err: &ReticleError) -> Self {
        Self {
            element: element.into(),
            message: err.to_string(),
        }
    }
}

/// The computed rectangle tree for one viewport.
///
/// Everything except `port` is optional: an element is `None` when it is not displayed or
/// when its resolver rejected the configuration (see `issues`). Safe areas that are not
/// displayed are derived on first request and memoized here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReticleLayout {
    pub viewport: Viewport,
    pub port: Geom,
    pub filmback: Option<FilmbackLayout>,
    pub projection_gate: Option<Geom>,
    pub filmback_safe_action: Option<Geom>,
    pub filmback_safe_title: Option<Geom>,
    /// Parallel to `config.aspect_ratios` (ascending ratio).
    pub aspect_ratios: Vec<Option<AspectLayout>>,
    pub pan_scan: Option<AspectLayout>,
    /// Signed largest-magnitude camera translation component (0 when the check is off).
    pub max_distance: f64,
    pub issues: Vec<LayoutIssue>,
}

#[tracing::instrument(skip(config))]
pub fn compute_layout(config: &ReticleConfig, viewport: Viewport) -> ReticleLayout {
    let mut layout = ReticleLayout {
        viewport,
        port: compute_viewport_rect(viewport),
        filmback: None,
        projection_gate: None,
        filmback_safe_action: None,
        filmback_safe_title: None,
        aspect_ratios: vec![None; config.aspect_ratios.len()],
        pan_scan: None,
        max_distance: 0.0,
        issues: Vec::new(),
    };
    if config.options.maximum_distance > 0.0 {
        layout.max_distance = dominant_component(config.camera.translation);
    }

    let fl = match resolve_filmback(config, viewport) {
        Ok(fl) => fl,
        Err(err) => {
            layout.push_issue("filmback", &err);
            return layout;
        }
    };
    if let Some(message) = &fl.image_error {
        let issue = LayoutIssue {
            element: "image".to_owned(),
            message: message.clone(),
        };
        tracing::warn!(element = %issue.element, "{}", issue.message);
        layout.issues.push(issue);
    }
    layout.filmback = Some(fl);

    if config.projection_gate.display.is_displayed() {
        match layout.projection_gate_geom(config) {
            Ok(g) => layout.projection_gate = Some(g),
            Err(err) => layout.push_issue("projection gate", &err),
        }
    }
    if config.safe_action.display.is_displayed() {
        if let Err(err) = layout.filmback_safe_area(config, SafeArea::Action) {
            layout.push_issue("filmback safe action", &err);
        }
    }
    if config.safe_title.display.is_displayed() {
        if let Err(err) = layout.filmback_safe_area(config, SafeArea::Title) {
            layout.push_issue("filmback safe title", &err);
        }
    }
    if config.pan_scan.base.display.is_displayed() {
        if let Err(err) = layout.pan_scan_layout(config) {
            layout.push_issue("pan/scan", &err);
        }
    }

    for (idx, entry) in config.aspect_ratios.iter().enumerate() {
        if !entry.display.is_displayed() {
            continue;
        }
        let resolved = layout.require_filmback().and_then(|fl| {
            resolve_aspect(entry, fl.require_image()?, fl.center, fl.lens_squeeze)
        });
        match resolved {
            Ok(ar) => layout.aspect_ratios[idx] = Some(ar),
            Err(err) => layout.push_issue(format!("aspect ratio {idx}"), &err),
        }
    }
    layout
}

impl ReticleLayout {
    fn push_issue(&mut self, element: impl Into<String>, err: &ReticleError) {
        let issue = LayoutIssue::new(element, err);
        tracing::warn!(element = %issue.element, "{}", issue.message);
        self.issues.push(issue);
    }

    fn require_filmback(&self) -> ReticleResult<&FilmbackLayout> {
        self.filmback
            .as_ref()
            .ok_or_else(|| ReticleError::invalid_config("filmback could not be resolved"))
    }

    /// Viewport centre shifted by the camera pan; aspect and pan/scan boxes centre on it.
    pub fn center(&self) -> Point {
        self.filmback
            .as_ref()
            .map_or_else(|| self.port.center(), |fl| fl.center)
    }

    fn projection_gate_geom(&self, config: &ReticleConfig) -> ReticleResult<Geom> {
        let fl = self.require_filmback()?;
        let gate = &config.projection_gate;
        Ok(derive_inset(
            fl.require_image()?,
            gate.horizontal,
            gate.vertical,
            fl.image_aperture.x,
            fl.image_aperture.y,
            fl.lens_squeeze,
        )?
        .with_colors(gate.line_color, gate.mask_color))
    }

    /// Filmback-level safe area, sized in inches of image aperture. Memoized.
    pub fn filmback_safe_area(
        &mut self,
        config: &ReticleConfig,
        area: SafeArea,
    ) -> ReticleResult<Geom> {
        let cached = match area {
            SafeArea::Action => self.filmback_safe_action,
            SafeArea::Title => self.filmback_safe_title,
        };
        if let Some(g) = cached {
            return Ok(g);
        }
        let fl = self.require_filmback()?;
        let sa = match area {
            SafeArea::Action => &config.safe_action,
            SafeArea::Title => &config.safe_title,
        };
        let g = derive_inset(
            fl.require_image()?,
            sa.horizontal,
            sa.vertical,
            fl.image_aperture.x,
            fl.image_aperture.y,
            fl.lens_squeeze,
        )?
        .with_colors(fl.filmback.line_color, fl.filmback.mask_color);
        match area {
            SafeArea::Action => self.filmback_safe_action = Some(g),
            SafeArea::Title => self.filmback_safe_title = Some(g),
        }
        Ok(g)
    }

    /// Pan/scan window, resolved on first use when it is not displayed.
    pub fn pan_scan_layout(
        &mut self,
        config: &ReticleConfig,
    ) -> ReticleResult<&mut AspectLayout> {
        if self.pan_scan.is_none() {
            let center = self.center();
            let fl = self.require_filmback()?;
            let ps = resolve_pan_scan(
                &config.pan_scan,
                fl.require_image()?,
                fl.image_aperture,
                center,
                fl.lens_squeeze,
            )?;
            self.pan_scan = Some(ps);
        }
        self.pan_scan
            .as_mut()
            .ok_or_else(|| ReticleError::invalid_config("pan/scan could not be resolved"))
    }

    /// Aspect-ratio box at `index`, checked against the configured entry count.
    pub fn aspect_layout(&mut self, index: i64) -> ReticleResult<&mut AspectLayout> {
        let len = self.aspect_ratios.len();
        let idx = usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or_else(|| ReticleError::index_out_of_range("aspect ratio", index, len))?;
        self.aspect_ratios[idx].as_mut().ok_or_else(|| {
            ReticleError::undisplayed(format!("aspect ratio {idx} is not displayed"))
        })
    }

    /// Pad when padding is active, else the filmback, else the viewport.
    pub fn pad_or_filmback(&self) -> Geom {
        match &self.filmback {
            Some(fl) => fl.pad.unwrap_or(fl.filmback),
            None => self.port,
        }
    }

    /// Container the first aspect mask is drawn against: the viewport, narrowed to the
    /// filmback when the film gate is masked, then to the pad when padding is active.
    pub fn aspect_container(&self, config: &ReticleConfig) -> Geom {
        let mut container = self.port;
        if let Some(fl) = &self.filmback {
            if config.filmback.display.is_mask() {
                container = fl.filmback;
            }
            if let Some(pad) = fl.pad {
                container = pad;
            }
        }
        container
    }

    /// Outer rectangle of the mask band for aspect entry `idx`: the nearest preceding
    /// resolved entry, or `container` for the innermost one.
    pub fn aspect_predecessor(&self, idx: usize, container: Geom) -> Geom {
        self.aspect_ratios[..idx.min(self.aspect_ratios.len())]
            .iter()
            .rev()
            .find_map(|ar| ar.as_ref().map(|a| a.geom))
            .unwrap_or(container)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
