//! Error taxonomy for data loading and the transform layer.
//!
//! Transform-layer problems (out-of-range scalars) are recovered locally by
//! clamping and never reach this enum. Structural problems are rejected at
//! the load boundary with no partial state change, so a failed load always
//! leaves the previously displayed data intact.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VizError {
    /// A grid or frame arrived empty, ragged, non-square, or non-finite.
    #[error("invalid grid shape: {rows} rows, offending row length {cols}")]
    InvalidGridShape { rows: usize, cols: usize },

    /// Frame history and stats history lengths differ (or both are empty).
    #[error("misaligned simulation sequences: {history} frames, {stats} stats entries")]
    MisalignedSequences { history: usize, stats: usize },

    /// Geographic bounds violate `north > south` / `east > west`.
    #[error("invalid geographic bounds: north {north}, south {south}, east {east}, west {west}")]
    InvalidBounds {
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    },

    /// A cell carried an integer outside the known state set {0, 1, 2, 3}.
    #[error("unknown cell state value {value}")]
    InvalidCellState { value: u8 },
}
