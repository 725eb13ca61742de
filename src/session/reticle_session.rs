use crate::{
    config::model::ReticleConfig,
    foundation::core::Viewport,
    foundation::error::ReticleResult,
    layout::cache::LayoutCache,
    layout::filmback::CameraApertureOverride,
    layout::solver::{LayoutIssue, ReticleLayout, compute_layout},
    render::backend::{FrameRGBA, OverlayBackend, execute_overlay},
    render::compile::compile_overlay,
    render::plan::OverlayPlan,
    text::dynamic::TextContext,
};

/// Result of one overlay refresh.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameOutput {
    pub plan: OverlayPlan,
    /// Aperture the host should push onto the camera, when "drive camera aperture" is on and
    /// the camera disagrees with the filmback.
    pub camera_override: Option<CameraApertureOverride>,
    /// True when the layout was recomputed for this frame rather than taken from the cache.
    pub recomputed: bool,
}

impl FrameOutput {
    fn build(
        config: &ReticleConfig,
        layout: &mut ReticleLayout,
        ctx: &TextContext,
        recomputed: bool,
    ) -> Self {
        let camera_override = layout
            .filmback
            .as_ref()
            .and_then(|fl| fl.camera_override.clone());
        Self {
            plan: compile_overlay(config, layout, ctx),
            camera_override,
            recomputed,
        }
    }
}

/// Per-viewport overlay state: owns the layout cache and turns config snapshots into plans.
///
/// One session per host viewport; sessions share nothing, so separate viewports can be
/// driven from separate threads.
#[derive(Debug, Default)]
pub struct ReticleSession {
    cache: LayoutCache,
}

impl ReticleSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host "refresh" flag: the next draw recomputes the layout.
    pub fn mark_dirty(&mut self) {
        self.cache.mark_dirty();
    }

    /// Layout used by the most recent draw.
    pub fn layout(&self) -> Option<&ReticleLayout> {
        self.cache.layout()
    }

    /// Builds the overlay for one frame. Never fails: elements that cannot be resolved are
    /// listed in `plan.issues`.
    #[tracing::instrument(skip(self, config, ctx))]
    pub fn draw(
        &mut self,
        config: &ReticleConfig,
        viewport: Viewport,
        ctx: &TextContext,
    ) -> FrameOutput {
        match self.cache.get_or_compute(config, viewport) {
            Ok((layout, recomputed)) => FrameOutput::build(config, layout, ctx, recomputed),
            Err(err) => {
                tracing::warn!(%err, "layout cache unavailable, computing uncached");
                self.cache.clear();
                let mut layout = compute_layout(config, viewport);
                let mut out = FrameOutput::build(config, &mut layout, ctx, true);
                out.plan.issues.push(LayoutIssue::new("layout cache", &err));
                out
            }
        }
    }

    /// Draws and rasterises in one step.
    pub fn render<B: OverlayBackend + ?Sized>(
        &mut self,
        config: &ReticleConfig,
        viewport: Viewport,
        ctx: &TextContext,
        backend: &mut B,
    ) -> ReticleResult<(FrameOutput, FrameRGBA)> {
        let out = self.draw(config, viewport, ctx);
        let frame = execute_overlay(backend, &out.plan)?;
        Ok((out, frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/reticle_session.rs"]
mod tests;
