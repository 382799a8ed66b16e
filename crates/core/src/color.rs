//! Shared risk color ramp.
//!
//! Every rendering surface maps scalar risk through this one ramp; the
//! control-point table is fixed bit-for-bit to preserve visual parity with
//! historical screenshots.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Ramp control points: position along [0, 1] and the color there.
const CONTROL_POINTS: [(f32, Rgb); 4] = [
    (0.0, Rgb::new(34, 197, 94)),   // green
    (0.33, Rgb::new(234, 179, 8)),  // yellow
    (0.66, Rgb::new(249, 115, 22)), // orange
    (1.0, Rgb::new(239, 68, 68)),   // red
];

/// Map a scalar risk value to the continuous green-yellow-orange-red ramp.
///
/// The value is clamped to [0, 1] first; out-of-range input is recoverable,
/// not fatal. Each channel interpolates linearly and independently within the
/// segment containing the value, rounding to the nearest integer as the
/// reference implementation does.
pub fn color_at(value: f32) -> Rgb {
    let value = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut lower = CONTROL_POINTS[0];
    let mut upper = CONTROL_POINTS[CONTROL_POINTS.len() - 1];
    for pair in CONTROL_POINTS.windows(2) {
        if value >= pair[0].0 && value <= pair[1].0 {
            lower = pair[0];
            upper = pair[1];
            break;
        }
    }

    let range = upper.0 - lower.0;
    // Zero-width segment: return the lower color rather than divide by zero.
    let t = if range == 0.0 {
        0.0
    } else {
        (value - lower.0) / range
    };

    let lerp_channel = |lo: u8, hi: u8| -> u8 {
        (f32::from(lo) + (f32::from(hi) - f32::from(lo)) * t).round() as u8
    };

    Rgb {
        r: lerp_channel(lower.1.r, upper.1.r),
        g: lerp_channel(lower.1.g, upper.1.g),
        b: lerp_channel(lower.1.b, upper.1.b),
    }
}

/// Coarse four-bucket palette used by the plain heatmap canvas, where the
/// continuous ramp would be wasted on 4px cells.
pub fn bucket_color(value: f32) -> Rgb {
    if value < 0.25 {
        Rgb::new(34, 197, 94)
    } else if value < 0.5 {
        Rgb::new(234, 179, 8)
    } else if value < 0.75 {
        Rgb::new(249, 115, 22)
    } else {
        Rgb::new(239, 68, 68)
    }
}

/// Convert HSL (all components in [0, 1]) to 8-bit RGB.
///
/// Marker materials derive their tint from hue offsets around 0.05 (orange),
/// the same scheme the reference scene uses.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h * 6.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgb {
        r: ((r1 + m) * 255.0).round() as u8,
        g: ((g1 + m) * 255.0).round() as u8,
        b: ((b1 + m) * 255.0).round() as u8,
    }
}
