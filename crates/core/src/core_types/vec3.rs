//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for mesh vertices, normals, and marker placement.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the rendering pipeline for world positions and sphere coordinates.
pub type Vec3 = Vector3<f32>;
