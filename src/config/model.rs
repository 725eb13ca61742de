use crate::{
    config::aspect_set::AspectRatioSet,
    foundation::core::{EPSILON, Rgba, Vec2},
    foundation::error::{ReticleError, ReticleResult},
};

pub const MIN_TEXT_SIZE: u32 = 4;
pub const MAX_TEXT_SIZE: u32 = 120;

/// How a framing rectangle is displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Off,
    Lines,
    DashedLines,
    /// Lines plus a translucent band between the rectangle and its container.
    Mask,
}

impl DisplayMode {
    pub fn is_displayed(self) -> bool {
        self != Self::Off
    }

    pub fn is_mask(self) -> bool {
        self == Self::Mask
    }

    pub fn is_dashed(self) -> bool {
        self == Self::DashedLines
    }
}

/// Camera film-fit policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilmFit {
    #[default]
    Fill,
    Horizontal,
    Vertical,
    Overscan,
}

/// 2D pan/zoom applied by the camera in the viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanZoom {
    pub horizontal_pan: f64,
    pub vertical_pan: f64,
    pub zoom: f64,
    /// Pan/zoom baked into renders; the viewport overlay ignores it.
    pub render: bool,
}

impl Default for PanZoom {
    fn default() -> Self {
        Self {
            horizontal_pan: 0.0,
            vertical_pan: 0.0,
            zoom: 1.0,
            render: false,
        }
    }
}

/// Camera parameters read from the host each dirty cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub name: String,
    pub horizontal_film_aperture: f64,
    pub vertical_film_aperture: f64,
    pub lens_squeeze_ratio: f64,
    pub film_fit: FilmFit,
    pub overscan: f64,
    pub near_clip: f64,
    pub far_clip: f64,
    /// Focal length in millimetres.
    pub focal_length: f64,
    pub pan_zoom: Option<PanZoom>,
    pub orthographic: bool,
    /// World-space translation of the camera.
    pub translation: [f64; 3],
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            name: "persp".to_owned(),
            horizontal_film_aperture: 1.417,
            vertical_film_aperture: 0.945,
            lens_squeeze_ratio: 1.0,
            film_fit: FilmFit::Fill,
            overscan: 1.0,
            near_clip: 0.1,
            far_clip: 10_000.0,
            focal_length: 35.0,
            pan_zoom: None,
            orthographic: false,
            translation: [0.0; 3],
        }
    }
}

impl CameraParams {
    /// Pan/zoom that affects the viewport overlay, if any.
    pub fn active_pan_zoom(&self) -> Option<&PanZoom> {
        self.pan_zoom.as_ref().filter(|pz| !pz.render)
    }
}

/// Filmback in inches. A negative horizontal aperture means "use the camera's aperture".
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilmbackConfig {
    pub horizontal_aperture: f64,
    pub vertical_aperture: f64,
    /// Scale the configured filmback to fit the camera's fit rectangle.
    pub relative: bool,
    pub sound_track_width: f64,
    pub display: DisplayMode,
    pub mask_color: Rgba,
    pub line_color: Rgba,
}

impl Default for FilmbackConfig {
    fn default() -> Self {
        Self {
            horizontal_aperture: 0.864,
            vertical_aperture: 0.630,
            relative: true,
            sound_track_width: 0.0,
            display: DisplayMode::Off,
            mask_color: Rgba::from_transparency(0.0, 0.0, 0.0, 0.25),
            line_color: Rgba::from_transparency(1.0, 1.0, 1.0, 0.25),
        }
    }
}

impl FilmbackConfig {
    pub fn uses_camera_aperture(&self) -> bool {
        self.horizontal_aperture < 0.0
    }
}

/// Projection gate, in inches of image aperture.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub horizontal: f64,
    pub vertical: f64,
    pub display: DisplayMode,
    pub mask_color: Rgba,
    pub line_color: Rgba,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            horizontal: 0.825,
            vertical: 0.446,
            display: DisplayMode::Off,
            mask_color: Rgba::from_transparency(1.0, 1.0, 1.0, 0.75),
            line_color: Rgba::from_transparency(1.0, 1.0, 1.0, 0.25),
        }
    }
}

/// Filmback-level safe area, in inches of image aperture. Drawn with the filmback line color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SafeAreaConfig {
    pub horizontal: f64,
    pub vertical: f64,
    #[serde(default)]
    pub display: DisplayMode,
}

impl SafeAreaConfig {
    pub fn action() -> Self {
        Self {
            horizontal: 0.713,
            vertical: 0.535,
            display: DisplayMode::Off,
        }
    }

    pub fn title() -> Self {
        Self {
            horizontal: 0.630,
            vertical: 0.475,
            display: DisplayMode::Off,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PadConfig {
    pub enabled: bool,
    /// Physical pad in inches, removed from the filmback (split evenly across both sides).
    pub amount: Vec2,
    pub display: DisplayMode,
    pub mask_color: Rgba,
    pub line_color: Rgba,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            amount: Vec2::ZERO,
            display: DisplayMode::Mask,
            mask_color: Rgba::from_transparency(0.0, 0.0, 0.0, 0.25),
            line_color: Rgba::from_transparency(1.0, 0.0, 0.0, 0.0),
        }
    }
}

impl PadConfig {
    pub fn is_padded(&self) -> bool {
        self.amount.x > EPSILON || self.amount.y > EPSILON
    }

    /// Enabled and non-zero.
    pub fn is_active(&self) -> bool {
        self.enabled && self.is_padded()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AspectRatioEntry {
    /// Width over height.
    pub ratio: f64,
    pub display: DisplayMode,
    pub mask_color: Rgba,
    pub line_color: Rgba,
    pub safe_action: DisplayMode,
    pub safe_title: DisplayMode,
}

impl Default for AspectRatioEntry {
    fn default() -> Self {
        Self {
            ratio: 1.85,
            display: DisplayMode::Off,
            mask_color: Rgba::from_transparency(0.0, 0.0, 0.0, 0.75),
            line_color: Rgba::from_transparency(0.8, 0.8, 0.8, 0.0),
            safe_action: DisplayMode::Off,
            safe_title: DisplayMode::Off,
        }
    }
}

impl AspectRatioEntry {
    pub fn new(ratio: f64, display: DisplayMode) -> Self {
        Self {
            ratio,
            display,
            ..Self::default()
        }
    }
}

/// Pan-and-scan window. `base.ratio` is the pan/scan aspect ratio (negative = filmback ratio).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanScanEntry {
    pub base: AspectRatioEntry,
    pub pan_scan_ratio: f64,
    /// Horizontal placement in `[-1, 1]`: -1 left edge, 0 centred, 1 right edge.
    pub pan_scan_offset: f64,
}

impl Default for PanScanEntry {
    fn default() -> Self {
        Self {
            base: AspectRatioEntry {
                ratio: -1.0,
                display: DisplayMode::Off,
                mask_color: Rgba::from_transparency(1.0, 1.0, 0.8, 0.85),
                line_color: Rgba::from_transparency(1.0, 1.0, 0.0, 0.5),
                safe_action: DisplayMode::Off,
                safe_title: DisplayMode::Off,
            },
            pan_scan_ratio: 1.33,
            pan_scan_offset: 0.0,
        }
    }
}

/// Dynamic text substitutions. `String` draws the element text as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    #[default]
    String,
    Lens,
    Camera,
    Frame,
    AspectRatio,
    MaxDistance,
    ProjectionGate,
    Show,
    Shot,
    ShowShot,
    FrameStart,
    FrameEnd,
    FrameRange,
    User,
    CurrentFile,
    FilePath,
    FileName,
    PanScanRatio,
    PanScanOffset,
    SafeAction,
    SafeTitle,
}

/// Which rectangle a text element is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorLevel {
    #[default]
    Window,
    /// Pad when padding is active, filmback otherwise.
    PadOrFilmback,
    Filmback,
    ProjectionGate,
    AspectRatio,
    PanScan,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativePosition {
    #[default]
    BottomLeft,
    BottomCenter,
    BottomRight,
    MiddleLeft,
    Center,
    MiddleRight,
    TopLeft,
    TopCenter,
    TopRight,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    #[default]
    Bottom,
    Middle,
    Top,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextElement {
    pub text_type: TextType,
    /// Literal text, or a printf-style format for dynamic types (empty = built-in format).
    pub text: String,
    pub align: HAlign,
    pub v_align: VAlign,
    /// Pixel offset from the anchor point.
    pub offset: Vec2,
    pub position: RelativePosition,
    pub level: AnchorLevel,
    /// Aspect-ratio index used by `AnchorLevel::AspectRatio` and `TextType::AspectRatio`.
    pub ar_level: i32,
    pub color: Rgba,
    pub enabled: bool,
    pub bold: bool,
    pub size: u32,
    /// Scale size and offset with the filmback width (1280 px reference).
    pub scale: bool,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            text_type: TextType::String,
            text: String::new(),
            align: HAlign::Left,
            v_align: VAlign::Bottom,
            offset: Vec2::ZERO,
            position: RelativePosition::BottomLeft,
            level: AnchorLevel::Window,
            ar_level: 0,
            color: Rgba::from_transparency(1.0, 1.0, 1.0, 0.5),
            enabled: true,
            bold: false,
            size: 12,
            scale: false,
        }
    }
}

impl TextElement {
    pub fn clamped_size(&self) -> u32 {
        self.size.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReticleOptions {
    pub drawing_enabled: bool,
    pub enable_text_drawing: bool,
    pub display_line_h: bool,
    pub display_line_v: bool,
    pub display_thirds_h: bool,
    pub display_thirds_v: bool,
    pub display_crosshair: bool,
    pub display_field_guide: bool,
    /// Color of guide text (field guide numbers).
    pub text_color: Rgba,
    /// Color of guide lines.
    pub line_color: Rgba,
    /// Push the configured filmback onto the camera when they disagree.
    pub drive_camera_aperture: bool,
    /// Tint aspect masks once the camera is this far from the origin; `<= 0` disables.
    pub maximum_distance: f64,
    pub ignore_camera_overscan: bool,
}

impl Default for ReticleOptions {
    fn default() -> Self {
        Self {
            drawing_enabled: true,
            enable_text_drawing: true,
            display_line_h: false,
            display_line_v: false,
            display_thirds_h: false,
            display_thirds_v: false,
            display_crosshair: false,
            display_field_guide: false,
            text_color: Rgba::from_transparency(1.0, 1.0, 1.0, 0.5),
            line_color: Rgba::from_transparency(1.0, 1.0, 0.0, 0.5),
            drive_camera_aperture: false,
            maximum_distance: 10_000.0,
            ignore_camera_overscan: false,
        }
    }
}

/// Everything the engine reads for one frame, except the viewport size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReticleConfig {
    pub camera: CameraParams,
    pub filmback: FilmbackConfig,
    pub projection_gate: GateConfig,
    pub safe_action: SafeAreaConfig,
    pub safe_title: SafeAreaConfig,
    pub pad: PadConfig,
    pub aspect_ratios: AspectRatioSet,
    pub pan_scan: PanScanEntry,
    pub text: Vec<TextElement>,
    pub options: ReticleOptions,
}

impl Default for ReticleConfig {
    fn default() -> Self {
        Self {
            camera: CameraParams::default(),
            filmback: FilmbackConfig::default(),
            projection_gate: GateConfig::default(),
            safe_action: SafeAreaConfig::action(),
            safe_title: SafeAreaConfig::title(),
            pad: PadConfig::default(),
            aspect_ratios: AspectRatioSet::default(),
            pan_scan: PanScanEntry::default(),
            text: Vec::new(),
            options: ReticleOptions::default(),
        }
    }
}

impl ReticleConfig {
    pub fn from_json_str(s: &str) -> ReticleResult<Self> {
        serde_json::from_str(s).map_err(|e| ReticleError::serde(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> ReticleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReticleError::serde(e.to_string()))
    }

    /// Range checks for host-side input validation.
    pub fn validate(&self) -> ReticleResult<()> {
        let cam = &self.camera;
        positive("camera.horizontal_film_aperture", cam.horizontal_film_aperture)?;
        positive("camera.vertical_film_aperture", cam.vertical_film_aperture)?;
        positive("camera.lens_squeeze_ratio", cam.lens_squeeze_ratio)?;
        positive("camera.overscan", cam.overscan)?;
        if let Some(pz) = &cam.pan_zoom {
            positive("camera.pan_zoom.zoom", pz.zoom)?;
            finite("camera.pan_zoom.horizontal_pan", pz.horizontal_pan)?;
            finite("camera.pan_zoom.vertical_pan", pz.vertical_pan)?;
        }

        let fb = &self.filmback;
        if !fb.uses_camera_aperture() {
            positive("filmback.horizontal_aperture", fb.horizontal_aperture)?;
            positive("filmback.vertical_aperture", fb.vertical_aperture)?;
            if fb.sound_track_width >= fb.horizontal_aperture {
                return Err(ReticleError::validation(
                    "filmback.sound_track_width must be smaller than the horizontal aperture",
                ));
            }
        }
        non_negative("filmback.sound_track_width", fb.sound_track_width)?;

        positive("projection_gate.horizontal", self.projection_gate.horizontal)?;
        positive("projection_gate.vertical", self.projection_gate.vertical)?;
        positive("safe_action.horizontal", self.safe_action.horizontal)?;
        positive("safe_action.vertical", self.safe_action.vertical)?;
        positive("safe_title.horizontal", self.safe_title.horizontal)?;
        positive("safe_title.vertical", self.safe_title.vertical)?;

        non_negative("pad.amount.x", self.pad.amount.x)?;
        non_negative("pad.amount.y", self.pad.amount.y)?;

        for (idx, ar) in self.aspect_ratios.iter().enumerate() {
            positive(&format!("aspect_ratios[{idx}].ratio"), ar.ratio)?;
        }

        let ps = &self.pan_scan;
        finite("pan_scan.base.ratio", ps.base.ratio)?;
        if ps.base.ratio >= 0.0 {
            positive("pan_scan.base.ratio", ps.base.ratio)?;
        }
        positive("pan_scan.pan_scan_ratio", ps.pan_scan_ratio)?;
        if !(-1.0..=1.0).contains(&ps.pan_scan_offset) {
            return Err(ReticleError::validation(format!(
                "pan_scan.pan_scan_offset must be in [-1, 1], got {}",
                ps.pan_scan_offset
            )));
        }

        for (idx, t) in self.text.iter().enumerate() {
            if !(MIN_TEXT_SIZE..=MAX_TEXT_SIZE).contains(&t.size) {
                return Err(ReticleError::validation(format!(
                    "text[{idx}].size must be in [{MIN_TEXT_SIZE}, {MAX_TEXT_SIZE}], got {}",
                    t.size
                )));
            }
            finite(&format!("text[{idx}].offset.x"), t.offset.x)?;
            finite(&format!("text[{idx}].offset.y"), t.offset.y)?;
        }

        finite("options.maximum_distance", self.options.maximum_distance)?;
        Ok(())
    }
}

fn finite(field: &str, v: f64) -> ReticleResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ReticleError::validation(format!(
            "{field} must be finite, got {v}"
        )))
    }
}

fn positive(field: &str, v: f64) -> ReticleResult<()> {
    finite(field, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(ReticleError::validation(format!(
            "{field} must be > 0, got {v}"
        )))
    }
}

fn non_negative(field: &str, v: f64) -> ReticleResult<()> {
    finite(field, v)?;
    if v >= 0.0 {
        Ok(())
    } else {
        Err(ReticleError::validation(format!(
            "{field} must be >= 0, got {v}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
