//! serde models of the JSON contracts consumed from the backend services,
//! plus their fallible conversions into validated core types.
//!
//! The wire structs mirror the backend's field names exactly and stay dumb:
//! every invariant (grid shape, bounds ordering, history/stats alignment,
//! cell-state range) is enforced by the conversion into the core type, never
//! by the deserializer. Unknown extra fields on the wire are ignored.

use crate::core_types::{
    FireRecord, FrameStats, GeoBounds, RiskGrid, RiskStatistics, SimulationFrame, SimulationRun,
};
use crate::error::VizError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A `{lat, lon}` pair as the backend sends region centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Response of the prediction endpoint: one risk map for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    /// Prediction date, `YYYY-MM-DD`.
    pub date: String,
    pub risk_map: Vec<Vec<f32>>,
    pub statistics: RiskStatistics,
    /// Bounds as raw degrees; validated during conversion.
    pub bounds: WireBounds,
    pub center: Coordinates,
}

/// Unvalidated bounds as they appear on the wire.
///
/// [`GeoBounds`] guarantees its ordering invariants, so the wire carries this
/// raw form and the conversion revalidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl PredictionResponse {
    /// Validate the payload into a grid plus its bounds.
    pub fn into_grid(self) -> Result<(RiskGrid, GeoBounds), VizError> {
        let grid = RiskGrid::from_rows(&self.risk_map)?;
        let bounds = GeoBounds::new(
            self.bounds.north,
            self.bounds.south,
            self.bounds.east,
            self.bounds.west,
        )?;
        Ok((grid, bounds))
    }
}

/// Response of the historical endpoint: bulk fire detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<FireRecord>,
}

impl HistoricalResponse {
    /// Only confirmed detections; the rest are background samples.
    pub fn fires(&self) -> impl Iterator<Item = &FireRecord> {
        self.data.iter().filter(|r| r.is_fire())
    }
}

/// Simulation parameters as echoed back by the simulation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub grid_size: usize,
    pub wind_speed: f32,
    pub wind_direction: f32,
    pub temperature: f32,
    pub humidity: f32,
    pub time_steps: usize,
}

/// Complete simulation payload: frame history, aligned statistics, and the
/// static vegetation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationData {
    pub params: SimulationParams,
    /// Per-step cell-state grids as wire integers.
    pub history: Vec<Vec<Vec<u8>>>,
    pub stats_history: Vec<FrameStats>,
    pub vegetation: Vec<Vec<f32>>,
    pub final_stats: Option<FrameStats>,
}

impl SimulationData {
    /// Decode the history into a validated run.
    ///
    /// Frame decoding catches unknown state integers and ragged grids;
    /// [`SimulationRun::new`] catches history/stats misalignment. Either
    /// failure rejects the whole payload with no partial state.
    pub fn into_run(self) -> Result<SimulationRun, VizError> {
        let frames = self
            .history
            .iter()
            .map(|rows| SimulationFrame::from_rows(rows))
            .collect::<Result<Vec<_>, _>>()?;
        SimulationRun::new(frames, self.stats_history)
    }
}

/// Envelope of the simulation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub success: bool,
    pub simulation: SimulationData,
}

/// Start/end of the loaded historical range, `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Response of the analytics endpoint: dashboard aggregates plus the raw
/// hotspot triples `[lat, lon, brightness]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub total_records: usize,
    pub total_fires: u32,
    /// Share of records with a confirmed fire, in percent.
    pub fire_rate: f32,
    /// Confirmed fires per calendar month, January first.
    pub monthly_distribution: Vec<u32>,
    /// Confirmed fires per year, keyed by year as the wire sends it.
    pub yearly_trend: FxHashMap<String, u32>,
    /// Fire probability per season name, in percent.
    pub seasonal_risk: FxHashMap<String, f32>,
    pub hotspots: Vec<[f64; 3]>,
    pub date_range: DateRange,
}
