//! Reticle computes camera-framing overlays: filmback, projection gate, safe action and safe
//! title guides, aspect-ratio masks, a pan-and-scan window and anchored annotation text.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: `ReticleConfig + Viewport -> ReticleLayout` (nested rectangles in viewport
//!    pixels, bottom-left origin)
//! 2. **Compile**: `ReticleLayout -> OverlayPlan` (ordered draw primitives, dynamic text
//!    resolved, anchors placed)
//! 3. **Render** (optional): `OverlayPlan -> FrameRGBA` through an [`OverlayBackend`]; the
//!    bundled [`CpuOverlayBackend`] rasterises on the CPU
//!
//! [`ReticleSession`] ties the steps together and caches the layout between frames: it is
//! recomputed when the viewport or the config contents change, or after
//! [`ReticleSession::mark_dirty`].
//!
//! Resolvers return [`ReticleResult`]; the layout and compile stages turn failures into
//! [`LayoutIssue`] records and skip the affected element, so a bad aspect-ratio entry never
//! hides the rest of the overlay.
#![forbid(unsafe_code)]

mod config;
mod foundation;
mod geom;
mod layout;
mod render;
mod session;
mod text;

pub use config::aspect_set::AspectRatioSet;
pub use config::fingerprint::ConfigFingerprint;
pub use config::model::{
    AnchorLevel, AspectRatioEntry, CameraParams, DisplayMode, FilmFit, FilmbackConfig,
    GateConfig, HAlign, MAX_TEXT_SIZE, MIN_TEXT_SIZE, PadConfig, PanScanEntry, PanZoom,
    RelativePosition, ReticleConfig, ReticleOptions, SafeAreaConfig, TextElement, TextType,
    VAlign,
};
pub use foundation::core::{EPSILON, Point, Rect, Rgba, Vec2, Viewport};
pub use foundation::error::{ReticleError, ReticleResult};
pub use geom::derive::{Inset, compute_inset_rect, compute_viewport_rect};
pub use geom::rect::Geom;
pub use layout::aspect::{AspectLayout, resolve_aspect};
pub use layout::cache::LayoutCache;
pub use layout::filmback::{CameraApertureOverride, FilmbackLayout, FitAxis, resolve_filmback};
pub use layout::pad::resolve_pad;
pub use layout::pan_scan::resolve_pan_scan;
pub use layout::safe_area::{SafeArea, derive_inset, derive_safe_area};
pub use layout::solver::{LayoutIssue, ReticleLayout, compute_layout};
pub use render::backend::{FrameRGBA, OverlayBackend, RenderSettings, execute_overlay};
pub use render::compile::{FIELD_GUIDE_LINES, compile_overlay};
pub use render::cpu::{CpuOverlayBackend, text_extent};
pub use render::plan::{
    DrawPrimitive, OverlayPlan, TextPrimitive, line_loop_segments, mask_quads,
};
pub use session::reticle_session::{FrameOutput, ReticleSession};
pub use text::anchor::{
    TEXT_REFERENCE_WIDTH, anchor_point, resolve_anchor, resolve_position, text_scale,
};
pub use text::dynamic::{TextContext, resolve_text};
pub use text::format::{FormatArg, format_printf};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
