//! Fire Risk Visualization Core Library
//!
//! Client-side visualization engine for a fire-risk monitoring dashboard.
//! Consumes opaque numeric arrays from the prediction and simulation services
//! (risk grids, historical fire detections, cellular-automaton frame
//! histories) and turns them into pixels, mesh geometry, marker instances,
//! and a deterministic playback of multi-frame simulations.
//!
//! ## Structure
//!
//! - Validated data model (`core_types`): risk grids, geo bounds, simulation
//!   frames and runs, all invariants enforced at construction
//! - Color ramp and geographic projections (`color`, `geo`)
//! - RGBA raster overlays (`raster`)
//! - Rendering surfaces for the 2D canvas, 3D cell mesh, terrain, and
//!   hotspot markers (`render`)
//! - Frame-synchronized playback with injected time (`playback`)
//! - Wire contracts and historical-record aggregation (`api`, `analytics`)

// Validated data model
pub mod core_types;
pub mod error;

// Pure transforms
pub mod color;
pub mod geo;
pub mod raster;

// Rendering surfaces and playback
pub mod playback;
pub mod render;

// Wire contracts and dashboard aggregation
pub mod analytics;
pub mod api;

// Re-export the data model
pub use core_types::{CellState, FireRecord, FrameStats, GeoBounds, HotspotPoint, Vec3};
pub use core_types::{RiskGrid, RiskLevel, RiskStatistics, SimulationFrame, SimulationRun};
pub use core_types::{ALMORA_BOUNDS, ALMORA_CENTER};
pub use error::VizError;

// Re-export the main surfaces
pub use color::Rgb;
pub use playback::{FrameSink, PlaybackController, PlaybackState};
pub use raster::{GeoOverlay, PixelBuffer};
pub use render::RenderContext;
