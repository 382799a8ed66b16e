//! Coordinate transforms between geographic space and the render spaces.
//!
//! Two target spaces: a flat bounded plane (terrain mesh, hotspot bars) and a
//! sphere (the globe). All functions are pure and total over valid numeric
//! input; callers guarantee well-formed bounds.

use crate::core_types::{GeoBounds, Vec3};

/// Project a geographic point onto the local render plane.
///
/// Longitude maps to x (east positive); latitude maps to z with increasing
/// latitude toward negative z, so north points into the screen. That sign
/// matches the terrain mesh orientation, where grid row 0 is the northern
/// edge at the far side of the plane. Output lies in
/// `[-plane_size/2, +plane_size/2]` on both axes for in-bounds input.
pub fn project_to_plane(lat: f64, lon: f64, bounds: &GeoBounds, plane_size: f32) -> (f32, f32) {
    let nx = ((lon - bounds.west) / bounds.lon_span()) as f32;
    let nz = ((lat - bounds.south) / bounds.lat_span()) as f32;
    let x = (nx - 0.5) * plane_size;
    let z = -(nz - 0.5) * plane_size;
    (x, z)
}

/// Map a plane-local position back to grid indices, the inverse used when
/// coloring terrain vertices from a risk grid.
///
/// Returns `(col, row)` with row 0 at the northern edge, or `None` when the
/// position falls outside the plane.
pub fn plane_to_grid(x: f32, z: f32, plane_size: f32, grid_size: usize) -> Option<(usize, usize)> {
    let half = plane_size / 2.0;
    let n = grid_size as f32;
    let col = ((x + half) / plane_size * n).floor();
    let row = ((z + half) / plane_size * n).floor();
    if (0.0..n).contains(&col) && (0.0..n).contains(&row) {
        Some((col as usize, row as usize))
    } else {
        None
    }
}

/// Project a geographic point onto a sphere of the given radius.
///
/// Uses the exact reference convention (`phi = (90 - lat)°`,
/// `theta = (lon + 180)°`, negated x) so the rendered globe's front face
/// stays aligned with the monitored region.
pub fn project_to_sphere(lat: f64, lon: f64, radius: f32) -> Vec3 {
    let phi = ((90.0 - lat) * std::f64::consts::PI / 180.0) as f32;
    let theta = ((lon + 180.0) * std::f64::consts::PI / 180.0) as f32;
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::ALMORA_BOUNDS;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_projection_stays_in_range() {
        let bounds = ALMORA_BOUNDS;
        let size = 64.0;
        for i in 0..=10 {
            for j in 0..=10 {
                let lat = bounds.south + bounds.lat_span() * f64::from(i) / 10.0;
                let lon = bounds.west + bounds.lon_span() * f64::from(j) / 10.0;
                let (x, z) = project_to_plane(lat, lon, &bounds, size);
                assert!((-32.0..=32.0).contains(&x), "x out of range: {x}");
                assert!((-32.0..=32.0).contains(&z), "z out of range: {z}");
            }
        }
    }

    #[test]
    fn test_plane_projection_orientation() {
        let bounds = ALMORA_BOUNDS;
        // Center maps to the origin.
        let (x, z) = project_to_plane(29.6, 79.675, &bounds, 64.0);
        assert_relative_eq!(x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(z, 0.0, epsilon = 1e-4);
        // North edge is at negative z, east edge at positive x.
        let (_, z_north) = project_to_plane(bounds.north, 79.675, &bounds, 64.0);
        assert_relative_eq!(z_north, -32.0, epsilon = 1e-4);
        let (x_east, _) = project_to_plane(29.6, bounds.east, &bounds, 64.0);
        assert_relative_eq!(x_east, 32.0, epsilon = 1e-4);
    }

    #[test]
    fn test_plane_to_grid_inverse() {
        // North-west corner of the plane is grid (0, 0).
        assert_eq!(plane_to_grid(-32.0, -32.0, 64.0, 64), Some((0, 0)));
        assert_eq!(plane_to_grid(0.0, 0.0, 64.0, 64), Some((32, 32)));
        assert_eq!(plane_to_grid(33.0, 0.0, 64.0, 64), None);
        assert_eq!(plane_to_grid(0.0, -33.0, 64.0, 64), None);
    }

    #[test]
    fn test_plane_and_grid_agree_on_north() {
        let bounds = ALMORA_BOUNDS;
        // A point near the northern edge lands in a low-numbered row.
        let (x, z) = project_to_plane(29.84, 79.675, &bounds, 64.0);
        let (_, row) = plane_to_grid(x, z, 64.0, 64).unwrap();
        assert!(row < 4, "north should map to a low row, got {row}");
    }

    #[test]
    fn test_sphere_projection_radius() {
        for &(lat, lon) in &[(0.0, 0.0), (29.6, 79.66), (-45.0, 170.0), (90.0, 0.0)] {
            let p = project_to_sphere(lat, lon, 41.0);
            assert_relative_eq!(p.norm(), 41.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_sphere_projection_convention() {
        // North pole sits on +y regardless of longitude.
        let p = project_to_sphere(90.0, 123.0, 40.0);
        assert_relative_eq!(p.y, 40.0, epsilon = 1e-3);
        // Equator at lon -180 maps theta to 0: x = -r, z = 0.
        let q = project_to_sphere(0.0, -180.0, 40.0);
        assert_relative_eq!(q.x, -40.0, epsilon = 1e-3);
        assert_relative_eq!(q.z, 0.0, epsilon = 1e-3);
    }
}
