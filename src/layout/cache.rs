use crate::{
    config::fingerprint::ConfigFingerprint,
    config::model::ReticleConfig,
    foundation::core::Viewport,
    foundation::error::ReticleResult,
    layout::solver::{ReticleLayout, compute_layout},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    viewport: Viewport,
    fingerprint: ConfigFingerprint,
}

/// Last computed layout, reused while the viewport and config fingerprint are unchanged.
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<CacheKey>,
    layout: Option<ReticleLayout>,
    dirty: bool,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the next lookup to recompute (host "refresh" flag).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn layout(&self) -> Option<&ReticleLayout> {
        self.layout.as_ref()
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.layout = None;
        self.dirty = false;
    }

    /// Returns the cached layout, recomputing it on a key change or after `mark_dirty`.
    /// The flag is true when the layout was recomputed.
    pub fn get_or_compute(
        &mut self,
        config: &ReticleConfig,
        viewport: Viewport,
    ) -> ReticleResult<(&mut ReticleLayout, bool)> {
        let key = CacheKey {
            viewport,
            fingerprint: ConfigFingerprint::of(config)?,
        };
        let hit = !self.dirty && self.key == Some(key) && self.layout.is_some();
        if hit {
            tracing::debug!(?viewport, "layout cache hit");
        } else {
            tracing::debug!(?viewport, dirty = self.dirty, "layout cache miss");
            self.key = Some(key);
            self.dirty = false;
            self.layout = Some(compute_layout(config, viewport));
        }
        let layout = self
            .layout
            .get_or_insert_with(|| compute_layout(config, viewport));
        Ok((layout, !hit))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cache.rs"]
mod tests;
