//! Historical fire detections and the hotspot points derived from them.

use serde::{Deserialize, Serialize};

/// One historical satellite fire detection, as delivered in bulk by the
/// historical endpoint. Immutable; a refresh replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRecord {
    /// Detection date, `YYYY-MM-DD`.
    pub date: String,
    pub latitude: f64,
    pub longitude: f64,
    /// 1 if a fire was confirmed at this point, 0 otherwise.
    pub fire_occurred: u8,
    /// Thermal brightness of the detection (Kelvin).
    pub brightness: f32,
    /// Detection confidence in percent.
    pub confidence: f32,
}

impl FireRecord {
    /// Only confirmed detections participate in marker rendering.
    pub fn is_fire(&self) -> bool {
        self.fire_occurred == 1
    }
}

/// A discrete geographic point with an associated intensity, rendered as a
/// vertical marker. Regenerated as a set whenever new data arrives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HotspotPoint {
    pub lat: f64,
    pub lon: f64,
    /// Relative intensity in [0, 1]; clamped at construction.
    pub intensity: f32,
}

impl HotspotPoint {
    pub fn new(lat: f64, lon: f64, intensity: f32) -> Self {
        HotspotPoint {
            lat,
            lon,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }
}
