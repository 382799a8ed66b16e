//! Rendering surfaces: 2D cell canvas, 3D cell mesh, terrain heightfield,
//! and hotspot markers, plus the context object that owns them.
//!
//! All renderers share one failure rule: missing or malformed input is a
//! no-op render that leaves the previous output visible, never a panic.

pub mod cells3d;
pub mod context;
pub mod grid2d;
pub mod hotspot;
pub mod terrain;

pub use cells3d::{CellInstance, CellMeshRenderer};
pub use context::RenderContext;
pub use grid2d::GridRenderer;
pub use hotspot::{HotspotMarker, HotspotRenderer, MarkerShape};
pub use terrain::TerrainRenderer;
