//! Explicit render context owning the scene state.
//!
//! The reference implementation kept scene, camera, and renderer handles in
//! module-level globals; here every rendering surface is owned by one
//! `RenderContext` passed explicitly, and all of it is released when the
//! context drops. The idle animation (marker pulse, burning-cell flicker,
//! auto-rotation) is a cosmetic layer that can be disabled entirely without
//! affecting data rendering.

use crate::render::{CellMeshRenderer, GridRenderer, HotspotRenderer, TerrainRenderer};

/// Scene auto-rotation rate in radians per second (0.001 rad per frame at
/// the reference 60 Hz).
const AUTO_ROTATE_RATE: f32 = 0.06;

/// Owns the rendering surfaces and the idle-animation clock.
#[derive(Debug)]
pub struct RenderContext {
    pub grid: GridRenderer,
    pub cells: CellMeshRenderer,
    pub terrain: TerrainRenderer,
    pub hotspots: HotspotRenderer,
    idle_animation: bool,
    auto_rotate: bool,
    rotation_y: f32,
    clock: f32,
}

impl RenderContext {
    pub fn new(canvas_size: usize, grid_size: usize) -> Self {
        RenderContext {
            grid: GridRenderer::new(canvas_size),
            cells: CellMeshRenderer::new(grid_size),
            terrain: TerrainRenderer::new(
                TerrainRenderer::DEFAULT_PLANE_SIZE,
                TerrainRenderer::DEFAULT_SEGMENTS,
            ),
            hotspots: HotspotRenderer::new(),
            idle_animation: true,
            auto_rotate: true,
            rotation_y: 0.0,
            clock: 0.0,
        }
    }

    /// Enable or disable the cosmetic idle layer.
    pub fn set_idle_animation(&mut self, enabled: bool) {
        self.idle_animation = enabled;
    }

    /// Enable or disable scene auto-rotation independently of the pulse.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Current scene yaw in radians.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Idle clock in seconds.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Advance the per-frame idle animation by `dt` seconds.
    ///
    /// This is the unconditional per-frame callback: it runs regardless of
    /// playback state, but does nothing when the idle layer is disabled.
    pub fn advance_idle(&mut self, dt: f32) {
        if !self.idle_animation {
            return;
        }
        self.clock += dt;
        if self.auto_rotate {
            self.rotation_y += AUTO_ROTATE_RATE * dt;
        }
        self.hotspots.pulse(self.clock);
        self.cells.animate(self.clock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{HotspotPoint, ALMORA_BOUNDS};
    use approx::assert_relative_eq;

    #[test]
    fn test_idle_advances_clock_and_rotation() {
        let mut ctx = RenderContext::new(64, 8);
        ctx.advance_idle(1.0);
        assert_relative_eq!(ctx.clock(), 1.0);
        assert_relative_eq!(ctx.rotation_y(), 0.06);
    }

    #[test]
    fn test_disabled_idle_layer_freezes_everything() {
        let mut ctx = RenderContext::new(64, 8);
        ctx.hotspots
            .place_on_plane(&[HotspotPoint::new(29.6, 79.66, 0.9)], &ALMORA_BOUNDS, 50.0);
        ctx.set_idle_animation(false);
        ctx.advance_idle(2.0);
        assert_relative_eq!(ctx.clock(), 0.0);
        assert_relative_eq!(ctx.rotation_y(), 0.0);
        assert_relative_eq!(ctx.hotspots.markers()[0].pulse_scale, 1.0);
    }

    #[test]
    fn test_auto_rotate_toggle() {
        let mut ctx = RenderContext::new(64, 8);
        ctx.set_auto_rotate(false);
        ctx.advance_idle(1.0);
        assert_relative_eq!(ctx.rotation_y(), 0.0);
        assert_relative_eq!(ctx.clock(), 1.0);
    }
}
