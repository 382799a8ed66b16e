//! Core data types shared by every rendering surface.

pub mod frame;
pub mod grid;
pub mod record;
pub mod vec3;

pub use frame::{CellState, FrameStats, SimulationFrame, SimulationRun};
pub use grid::{GeoBounds, RiskGrid, RiskLevel, RiskStatistics, ALMORA_BOUNDS, ALMORA_CENTER};
pub use record::{FireRecord, HotspotPoint};
pub use vec3::Vec3;
