use crate::{
    config::model::{FilmFit, ReticleConfig},
    foundation::core::{EPSILON, Point, Vec2, Viewport, nearly_equal},
    foundation::error::{ReticleError, ReticleResult},
    geom::rect::Geom,
    layout::pad::resolve_pad,
};

/// Film fit after `Fill`/`Overscan` have been resolved against the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitAxis {
    Horizontal,
    Vertical,
}

/// Aperture values the host should push onto the camera ("drive camera aperture").
///
/// Only axes that differ from the camera by more than [`EPSILON`] are set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraApertureOverride {
    pub camera: String,
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilmbackLayout {
    pub fit: FitAxis,
    /// Viewport centre shifted by the camera pan.
    pub center: Point,
    /// Pixels per inch, vertical.
    pub pixel_scale: f64,
    /// Pixels per inch, horizontal (includes lens squeeze).
    pub pixel_scale_x: f64,
    pub lens_squeeze: f64,
    /// Effective filmback aperture in inches.
    pub film_aperture: Vec2,
    /// Film aperture net of pad and soundtrack, in inches.
    pub image_aperture: Vec2,
    pub filmback: Geom,
    /// Image area inside the filmback; `None` when the pad or soundtrack leaves nothing of it.
    pub image: Option<Geom>,
    /// `None` when padding is disabled, both amounts are ~0, or the pad was rejected.
    pub pad: Option<Geom>,
    pub camera_override: Option<CameraApertureOverride>,
    /// Why `image` could not be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

impl FilmbackLayout {
    pub fn require_image(&self) -> ReticleResult<&Geom> {
        self.image
            .as_ref()
            .ok_or_else(|| ReticleError::invalid_config("image area could not be resolved"))
    }

    /// Image area, or the whole filmback when the image could not be resolved.
    pub fn image_or_filmback(&self) -> Geom {
        self.image.unwrap_or(self.filmback)
    }
}

struct ImageArea {
    aperture: Vec2,
    geom: Geom,
    pad: Option<Geom>,
}

/// Filmback rectangle plus the image area inside it.
///
/// Errors reject the filmback itself. A pad or soundtrack that leaves no image only clears
/// `image` and `pad` and records the reason in `image_error`.
#[tracing::instrument(skip(config))]
pub fn resolve_filmback(
    config: &ReticleConfig,
    viewport: Viewport,
) -> ReticleResult<FilmbackLayout> {
    let cam = &config.camera;
    let fb = &config.filmback;

    if viewport.is_empty() {
        return Err(ReticleError::invalid_config(format!(
            "viewport {}x{} has no area",
            viewport.width, viewport.height
        )));
    }

    let (film_aperture, camera_override) = if fb.uses_camera_aperture() {
        (
            Vec2::new(cam.horizontal_film_aperture, cam.vertical_film_aperture),
            None,
        )
    } else {
        let film = Vec2::new(fb.horizontal_aperture, fb.vertical_aperture);
        let over = if config.options.drive_camera_aperture {
            aperture_override(
                &cam.name,
                cam.horizontal_film_aperture,
                cam.vertical_film_aperture,
                film,
            )
        } else {
            None
        };
        (film, over)
    };

    // Camera values as they will be once the host applies the override.
    let cam_h = camera_override
        .as_ref()
        .and_then(|o| o.horizontal)
        .unwrap_or(cam.horizontal_film_aperture);
    let cam_v = camera_override
        .as_ref()
        .and_then(|o| o.vertical)
        .unwrap_or(cam.vertical_film_aperture);

    require_positive("camera horizontal aperture", cam_h)?;
    require_positive("camera vertical aperture", cam_v)?;
    require_positive("filmback horizontal aperture", film_aperture.x)?;
    require_positive("filmback vertical aperture", film_aperture.y)?;
    require_positive("lens squeeze ratio", cam.lens_squeeze_ratio)?;

    let overscan = if config.options.ignore_camera_overscan {
        1.0
    } else {
        cam.overscan
    };
    require_positive("camera overscan", overscan)?;

    let (pan, zoom) = match cam.active_pan_zoom() {
        Some(pz) => (Vec2::new(pz.horizontal_pan, pz.vertical_pan), pz.zoom),
        None => (Vec2::ZERO, 1.0),
    };
    require_positive("camera zoom", zoom)?;

    let camera_ar = cam_h / cam_v;
    let size = viewport.size();
    let port_horizontal = size.x / size.y > camera_ar;
    let fit = match cam.film_fit {
        FilmFit::Horizontal => FitAxis::Horizontal,
        FilmFit::Vertical => FitAxis::Vertical,
        FilmFit::Fill if port_horizontal => FitAxis::Horizontal,
        FilmFit::Fill => FitAxis::Vertical,
        FilmFit::Overscan if port_horizontal => FitAxis::Vertical,
        FilmFit::Overscan => FitAxis::Horizontal,
    };

    let mut pixel_scale = match fit {
        FitAxis::Horizontal => size.x / overscan / cam_h / zoom,
        FitAxis::Vertical => size.y / overscan / cam_v / zoom,
    };
    let center = viewport.center() - pan * pixel_scale;

    if fb.relative {
        let film_ar = film_aperture.x / film_aperture.y;
        if film_ar > camera_ar {
            pixel_scale *= cam_h / film_aperture.x;
        } else {
            pixel_scale *= cam_v / film_aperture.y;
        }
    }
    let pixel_scale_x = pixel_scale * cam.lens_squeeze_ratio;

    let filmback = Geom::centered(
        center,
        Vec2::new(film_aperture.x * pixel_scale_x, film_aperture.y * pixel_scale),
    )
    .with_colors(fb.line_color, fb.mask_color);

    if let Some(o) = &camera_override {
        tracing::debug!(
            camera = %o.camera,
            h = ?o.horizontal,
            v = ?o.vertical,
            "camera aperture override"
        );
    }

    let mut layout = FilmbackLayout {
        fit,
        center,
        pixel_scale,
        pixel_scale_x,
        lens_squeeze: cam.lens_squeeze_ratio,
        film_aperture,
        image_aperture: film_aperture,
        filmback,
        image: None,
        pad: None,
        camera_override,
        image_error: None,
    };
    match resolve_image_area(config, &layout) {
        Ok(area) => {
            layout.image_aperture = area.aperture;
            layout.image = Some(area.geom);
            layout.pad = area.pad;
        }
        Err(err) => {
            tracing::debug!(%err, "image area rejected, keeping the filmback");
            layout.image_error = Some(err.to_string());
        }
    }
    Ok(layout)
}

fn resolve_image_area(config: &ReticleConfig, fl: &FilmbackLayout) -> ReticleResult<ImageArea> {
    let fb = &config.filmback;
    let pad = resolve_pad(&fl.filmback, &config.pad, fl.pixel_scale_x, fl.pixel_scale)?;

    let mut aperture = fl.film_aperture;
    if pad.is_some() {
        aperture -= config.pad.amount;
    }

    // The soundtrack sits on the left: the image keeps its right edge and narrows from the left.
    let mut offset_x = 0.0;
    if fb.sound_track_width > EPSILON {
        aperture.x -= fb.sound_track_width;
        offset_x = fb.sound_track_width * fl.pixel_scale_x / 2.0;
    }
    if aperture.x <= EPSILON || aperture.y <= EPSILON {
        return Err(ReticleError::invalid_config(format!(
            "image aperture {:.4}x{:.4} is empty after pad and soundtrack",
            aperture.x, aperture.y
        )));
    }

    let geom = Geom::centered(
        fl.center + Vec2::new(offset_x, 0.0),
        Vec2::new(aperture.x * fl.pixel_scale_x, aperture.y * fl.pixel_scale),
    )
    .with_colors(fb.line_color, fb.mask_color);
    Ok(ImageArea {
        aperture,
        geom,
        pad,
    })
}

fn aperture_override(
    camera: &str,
    cam_h: f64,
    cam_v: f64,
    film: Vec2,
) -> Option<CameraApertureOverride> {
    let horizontal = (!nearly_equal(cam_h, film.x)).then_some(film.x);
    let vertical = (!nearly_equal(cam_v, film.y)).then_some(film.y);
    if horizontal.is_none() && vertical.is_none() {
        return None;
    }
    Some(CameraApertureOverride {
        camera: camera.to_owned(),
        horizontal,
        vertical,
    })
}

fn require_positive(what: &str, v: f64) -> ReticleResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ReticleError::invalid_config(format!("{what} must be > 0, got {v}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/filmback.rs"]
mod tests;
