//! Simulation frames, per-frame statistics, and the validated run.
//!
//! A `SimulationRun` couples the frame history with a parallel statistics
//! history. The two sequences are indexed together everywhere downstream, so
//! their 1:1 alignment is enforced once, at construction, and never rechecked.

use crate::error::VizError;
use serde::{Deserialize, Serialize};

/// Categorical per-cell fire state of the cellular automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    Unburned = 0,
    Burning = 1,
    Burned = 2,
    Water = 3,
}

impl CellState {
    /// Decode a wire integer; unknown values are a load error.
    pub fn from_u8(value: u8) -> Result<Self, VizError> {
        match value {
            0 => Ok(CellState::Unburned),
            1 => Ok(CellState::Burning),
            2 => Ok(CellState::Burned),
            3 => Ok(CellState::Water),
            _ => Err(VizError::InvalidCellState { value }),
        }
    }
}

/// One time-step snapshot of per-cell fire state, square and row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationFrame {
    size: usize,
    cells: Vec<CellState>,
}

impl SimulationFrame {
    /// Decode a frame from wire integers, validating shape and state values.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, VizError> {
        let size = rows.len();
        if size == 0 {
            return Err(VizError::InvalidGridShape { rows: 0, cols: 0 });
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(VizError::InvalidGridShape {
                    rows: size,
                    cols: row.len(),
                });
            }
            for &v in row {
                cells.push(CellState::from_u8(v)?);
            }
        }
        Ok(SimulationFrame { size, cells })
    }

    /// Frame edge length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell state at (col, row).
    pub fn at(&self, col: usize, row: usize) -> CellState {
        self.cells[row * self.size + col]
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }
}

/// Per-frame aggregate statistics, parallel to the frame history.
///
/// Field names match the simulation service wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub unburned: u32,
    pub burning: u32,
    pub burned: u32,
    pub unburned_pct: f32,
    pub burning_pct: f32,
    pub burned_pct: f32,
    pub total_affected: u32,
    pub affected_pct: f32,
}

/// An ordered, finite, non-empty sequence of frames plus aligned statistics.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    frames: Vec<SimulationFrame>,
    stats: Vec<FrameStats>,
}

impl SimulationRun {
    /// Couple a frame history with its statistics history.
    ///
    /// An empty history or a history/stats length mismatch is rejected with
    /// no partial state ([`VizError::MisalignedSequences`]); the playback
    /// controller can therefore index both sequences together unchecked.
    pub fn new(frames: Vec<SimulationFrame>, stats: Vec<FrameStats>) -> Result<Self, VizError> {
        if frames.is_empty() || frames.len() != stats.len() {
            return Err(VizError::MisalignedSequences {
                history: frames.len(),
                stats: stats.len(),
            });
        }
        Ok(SimulationRun { frames, stats })
    }

    /// Number of frames (equal to the number of stats entries).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// A run is never empty; this exists for the conventional pairing.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Frame and stats at `index`. Panics past the end; the controller clamps
    /// every externally supplied index first.
    pub fn at(&self, index: usize) -> (&SimulationFrame, &FrameStats) {
        (&self.frames[index], &self.stats[index])
    }

    pub fn frames(&self) -> &[SimulationFrame] {
        &self.frames
    }

    pub fn stats(&self) -> &[FrameStats] {
        &self.stats
    }
}
