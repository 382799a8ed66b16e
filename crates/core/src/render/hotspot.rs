//! 3D hotspot markers: vertical bars on the analysis plane, glowing points
//! on the globe, each with a flat ring at its base.
//!
//! Marker sets are replaced wholesale when new data arrives. The pulse is a
//! purely decorative scale oscillation driven by the idle clock; disabling it
//! leaves placement and sizing untouched.

use crate::color::{hsl_to_rgb, Rgb};
use crate::core_types::{GeoBounds, HotspotPoint, Vec3};
use crate::geo::{project_to_plane, project_to_sphere};
use rand::Rng;

/// Glow ring tint shared by both surfaces (#ff6b35).
const RING_COLOR: Rgb = Rgb::new(255, 107, 53);

/// Marker geometry, by target surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape {
    /// Tapered vertical bar standing on the plane.
    Bar {
        height: f32,
        radius_top: f32,
        radius_bottom: f32,
    },
    /// Small sphere sitting on the globe surface.
    Point { radius: f32 },
}

/// One placed marker instance.
#[derive(Debug, Clone)]
pub struct HotspotMarker {
    pub shape: MarkerShape,
    /// Marker center (bar centers sit at half height).
    pub position: Vec3,
    /// Base ring center.
    pub ring_position: Vec3,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_color: Rgb,
    pub color: Rgb,
    pub intensity: f32,
    /// Per-marker phase offset so pulses don't synchronize.
    phase: f32,
    /// Current pulse scale, updated by [`HotspotRenderer::pulse`].
    pub pulse_scale: f32,
}

/// Places markers from hotspot points and animates their idle pulse.
#[derive(Debug, Default)]
pub struct HotspotRenderer {
    markers: Vec<HotspotMarker>,
}

impl HotspotRenderer {
    /// Plane bar sizing: `height = 2 + intensity * 15`.
    const BAR_BASE_HEIGHT: f32 = 2.0;
    const BAR_HEIGHT_SCALE: f32 = 15.0;

    pub fn new() -> Self {
        HotspotRenderer::default()
    }

    pub fn markers(&self) -> &[HotspotMarker] {
        &self.markers
    }

    /// Replace all markers with bars on the bounded plane.
    ///
    /// An empty point list is a no-op; the previous marker set stays.
    pub fn place_on_plane(
        &mut self,
        points: &[HotspotPoint],
        bounds: &GeoBounds,
        plane_size: f32,
    ) {
        if points.is_empty() {
            return;
        }
        let mut rng = rand::rng();
        self.markers = points
            .iter()
            .map(|p| {
                let (x, z) = project_to_plane(p.lat, p.lon, bounds, plane_size);
                let height = Self::BAR_BASE_HEIGHT + p.intensity * Self::BAR_HEIGHT_SCALE;
                HotspotMarker {
                    shape: MarkerShape::Bar {
                        height,
                        radius_top: 0.3,
                        radius_bottom: 0.5,
                    },
                    position: Vec3::new(x, height / 2.0, z),
                    ring_position: Vec3::new(x, 0.1, z),
                    ring_inner: 0.5,
                    ring_outer: 1.5,
                    ring_color: RING_COLOR,
                    // Hotter bars shift from orange toward red.
                    color: hsl_to_rgb(0.05 + (1.0 - p.intensity) * 0.1, 1.0, 0.5),
                    intensity: p.intensity,
                    phase: rng.random::<f32>() * std::f32::consts::TAU,
                    pulse_scale: 1.0,
                }
            })
            .collect();
    }

    /// Replace all markers with glowing points on a sphere of `radius`.
    ///
    /// Points sit just above the surface; rings face the sphere center. An
    /// empty point list is a no-op.
    pub fn place_on_sphere(&mut self, points: &[HotspotPoint], radius: f32) {
        if points.is_empty() {
            return;
        }
        let mut rng = rand::rng();
        self.markers = points
            .iter()
            .map(|p| {
                let position = project_to_sphere(p.lat, p.lon, radius);
                HotspotMarker {
                    shape: MarkerShape::Point {
                        radius: 0.8 + p.intensity * 0.5,
                    },
                    position,
                    ring_position: position,
                    ring_inner: 1.5,
                    ring_outer: 2.5,
                    ring_color: RING_COLOR,
                    color: hsl_to_rgb(
                        0.05 + rng.random::<f32>() * 0.05,
                        1.0,
                        0.5 + p.intensity * 0.2,
                    ),
                    intensity: p.intensity,
                    phase: rng.random::<f32>() * std::f32::consts::TAU,
                    pulse_scale: 1.0,
                }
            })
            .collect();
    }

    /// Advance the decorative pulse to wall-clock `time` (seconds).
    pub fn pulse(&mut self, time: f32) {
        for marker in &mut self.markers {
            let amplitude = match marker.shape {
                MarkerShape::Bar { .. } => 0.1,
                MarkerShape::Point { .. } => 0.3,
            };
            marker.pulse_scale = 1.0 + (time * 3.0 + marker.phase).sin() * amplitude;
        }
    }

    /// Drop all markers (used when the data set is cleared explicitly).
    pub fn clear(&mut self) {
        self.markers.clear();
    }
}
