//! Risk grid, geographic bounds, and derived risk statistics.
//!
//! A `RiskGrid` is the square per-cell fire-risk probability map produced by
//! the prediction service. It is validated once at construction and immutable
//! afterwards; a new prediction replaces the grid wholesale.

use crate::error::VizError;
use serde::{Deserialize, Serialize};

/// Geographic bounding box in degrees.
///
/// Invariants `north > south` and `east > west` are checked at construction.
/// The bounds are passed explicitly with every grid so no transform is ever
/// hard-coded against a single region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Create bounds, rejecting degenerate or inverted boxes.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, VizError> {
        if !(north > south && east > west)
            || !north.is_finite()
            || !south.is_finite()
            || !east.is_finite()
            || !west.is_finite()
        {
            return Err(VizError::InvalidBounds {
                north,
                south,
                east,
                west,
            });
        }
        Ok(GeoBounds {
            north,
            south,
            east,
            west,
        })
    }

    /// True if the point lies inside (or on the edge of) the box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }
}

/// Center of the monitored Almora region (degrees).
pub const ALMORA_CENTER: (f64, f64) = (29.5971, 79.6591);

/// Default bounds of the monitored Almora region.
pub const ALMORA_BOUNDS: GeoBounds = GeoBounds {
    north: 29.85,
    south: 29.35,
    east: 80.0,
    west: 79.35,
};

/// Square per-cell fire-risk map with values in [0, 1], row-major.
///
/// Row 0 is the northern edge, matching the raster overlay orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskGrid {
    size: usize,
    values: Vec<f32>,
}

impl RiskGrid {
    /// Build a grid from row-major nested rows as they arrive on the wire.
    ///
    /// Empty input, ragged rows, a non-square shape, or non-finite values are
    /// rejected with [`VizError::InvalidGridShape`]. Finite values outside
    /// [0, 1] are clamped rather than rejected; out-of-range risk is a
    /// recoverable input error.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, VizError> {
        let size = rows.len();
        if size == 0 {
            return Err(VizError::InvalidGridShape {
                rows: 0,
                cols: 0,
            });
        }
        let mut values = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(VizError::InvalidGridShape {
                    rows: size,
                    cols: row.len(),
                });
            }
            for &v in row {
                if !v.is_finite() {
                    return Err(VizError::InvalidGridShape {
                        rows: size,
                        cols: size,
                    });
                }
                values.push(v.clamp(0.0, 1.0));
            }
        }
        Ok(RiskGrid { size, values })
    }

    /// Grid edge length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Risk value at (col, row). Panics on out-of-range indices, like any
    /// slice access; use [`RiskGrid::get`] for checked lookup.
    pub fn at(&self, col: usize, row: usize) -> f32 {
        self.values[row * self.size + col]
    }

    /// Bounds-checked risk lookup.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col < self.size && row < self.size {
            Some(self.values[row * self.size + col])
        } else {
            None
        }
    }

    /// Row-major view of all values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Derive the dashboard statistics for this grid.
    pub fn statistics(&self) -> RiskStatistics {
        RiskStatistics::from_grid(self)
    }
}

/// Categorical risk level shown on the dashboard gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    /// Classify an average risk value using the reference thresholds.
    pub fn classify(average_risk: f32) -> Self {
        if average_risk > 0.6 {
            RiskLevel::Extreme
        } else if average_risk > 0.45 {
            RiskLevel::High
        } else if average_risk > 0.3 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Gauge color for this level, from the shared dashboard palette.
    pub fn color(&self) -> crate::color::Rgb {
        use crate::color::Rgb;
        match self {
            RiskLevel::Low => Rgb::new(34, 197, 94),
            RiskLevel::Moderate => Rgb::new(234, 179, 8),
            RiskLevel::High => Rgb::new(249, 115, 22),
            RiskLevel::Extreme => Rgb::new(239, 68, 68),
        }
    }
}

/// Summary statistics derived from a [`RiskGrid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskStatistics {
    pub average_risk: f32,
    pub max_risk: f32,
    /// Number of cells with risk above 0.7.
    pub high_risk_cells: usize,
    pub risk_level: RiskLevel,
    /// Average risk expressed as a percentage, as the gauge expects.
    pub risk_percentage: f32,
}

impl RiskStatistics {
    /// High-risk cell threshold.
    const HIGH_RISK: f32 = 0.7;

    pub fn from_grid(grid: &RiskGrid) -> Self {
        let values = grid.values();
        let total = values.len() as f32;
        let sum: f32 = values.iter().sum();
        let average_risk = sum / total;
        let max_risk = values.iter().fold(0.0_f32, |a, &v| a.max(v));
        let high_risk_cells = values.iter().filter(|&&v| v > Self::HIGH_RISK).count();

        RiskStatistics {
            average_risk,
            max_risk,
            high_risk_cells,
            risk_level: RiskLevel::classify(average_risk),
            risk_percentage: average_risk * 100.0,
        }
    }
}
