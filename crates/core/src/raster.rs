//! Raster overlay generation: risk grid to geo-referenced RGBA pixels.
//!
//! One pixel per grid cell; the map layer stretches the buffer over its
//! geographic bounds, while the plain heatmap view blits it to a fixed-size
//! canvas. Buffers are reused in place across updates, never reallocated per
//! frame unless the grid size changes.

use crate::color::{color_at, Rgb};
use crate::core_types::{GeoBounds, RiskGrid};
use rayon::prelude::*;
use std::io::Write;

/// Alpha ramp: `floor(value * 180 + 50)`. The additive floor keeps zero-risk
/// cells visibly distinct from "no data".
const ALPHA_SCALE: f32 = 180.0;
const ALPHA_FLOOR: f32 = 50.0;

/// An owned RGBA pixel buffer, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        PixelBuffer {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA at (x, y). Panics out of range.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Write one pixel.
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Rgb, alpha: u8) {
        let i = (y * self.width + x) * 4;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = alpha;
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb, alpha: u8) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for py in y..y1 {
            for px in x..x1 {
                self.put_pixel(px, py, color, alpha);
            }
        }
    }

    /// Nearest-neighbor upscale of `src` into this buffer, covering it fully.
    pub fn blit_scaled(&mut self, src: &PixelBuffer) {
        if src.width == 0 || src.height == 0 {
            return;
        }
        for y in 0..self.height {
            let sy = y * src.height / self.height;
            for x in 0..self.width {
                let sx = x * src.width / self.width;
                let p = src.pixel(sx, sy);
                self.put_pixel(x, y, Rgb::new(p[0], p[1], p[2]), p[3]);
            }
        }
    }

    /// Encode as binary PPM (P6), compositing over an opaque dark background
    /// since PPM carries no alpha. Used by the headless demo for snapshots.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        const BG: f32 = 26.0; // #1a1a1a, the dashboard canvas background
        writeln!(out, "P6\n{} {}\n255", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width * 3);
        for y in 0..self.height {
            row.clear();
            for x in 0..self.width {
                let [r, g, b, a] = self.pixel(x, y);
                let alpha = f32::from(a) / 255.0;
                for c in [r, g, b] {
                    row.push((f32::from(c) * alpha + BG * (1.0 - alpha)).round() as u8);
                }
            }
            out.write_all(&row)?;
        }
        Ok(())
    }
}

/// Rasterize a risk grid into a `size x size` RGBA buffer.
///
/// Cell color comes from the shared ramp; alpha is `floor(v * 180 + 50)`, so
/// an all-zero grid still renders at uniform alpha 50. The grid's validating
/// constructor guarantees shape, so this transform cannot fail. Rows are
/// rasterized in parallel.
pub fn rasterize(grid: &RiskGrid) -> PixelBuffer {
    let size = grid.size();
    let mut buffer = PixelBuffer::new(size, size);
    buffer
        .data
        .par_chunks_mut(size * 4)
        .enumerate()
        .for_each(|(row, chunk)| {
            for col in 0..size {
                let v = grid.at(col, row);
                let color = color_at(v);
                let i = col * 4;
                chunk[i] = color.r;
                chunk[i + 1] = color.g;
                chunk[i + 2] = color.b;
                chunk[i + 3] = (v * ALPHA_SCALE + ALPHA_FLOOR).floor() as u8;
            }
        });
    buffer
}

/// A rasterized risk grid tied to the geographic box it covers, ready to be
/// draped over the tiled map.
#[derive(Debug, Clone)]
pub struct GeoOverlay {
    pub pixels: PixelBuffer,
    pub bounds: GeoBounds,
}

impl GeoOverlay {
    pub fn from_grid(grid: &RiskGrid, bounds: GeoBounds) -> Self {
        GeoOverlay {
            pixels: rasterize(grid),
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_grid_has_floor_alpha() {
        let grid = RiskGrid::from_rows(&vec![vec![0.0; 4]; 4]).unwrap();
        let buf = rasterize(&grid);
        for y in 0..4 {
            for x in 0..4 {
                let p = buf.pixel(x, y);
                assert_eq!(p[3], 50, "floor alpha must survive at zero risk");
                assert_eq!([p[0], p[1], p[2]], [34, 197, 94]);
            }
        }
    }

    #[test]
    fn test_reference_alpha_scenario() {
        let grid = RiskGrid::from_rows(&[vec![0.0, 1.0], vec![0.5, 0.33]]).unwrap();
        let buf = rasterize(&grid);
        assert_eq!(buf.pixel(0, 0)[3], 50);
        assert_eq!(buf.pixel(1, 0)[3], 230);
        assert_eq!(buf.pixel(0, 1)[3], 140);
        assert_eq!(buf.pixel(1, 1)[3], 109);
    }

    #[test]
    fn test_rasterize_uses_shared_ramp() {
        let grid = RiskGrid::from_rows(&[vec![0.0, 1.0], vec![0.5, 0.33]]).unwrap();
        let buf = rasterize(&grid);
        let p = buf.pixel(1, 0);
        assert_eq!([p[0], p[1], p[2]], [239, 68, 68]);
    }

    #[test]
    fn test_blit_scaled() {
        let grid = RiskGrid::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let small = rasterize(&grid);
        let mut canvas = PixelBuffer::new(8, 8);
        canvas.blit_scaled(&small);
        // Each source pixel covers a 4x4 block.
        assert_eq!(canvas.pixel(0, 0), small.pixel(0, 0));
        assert_eq!(canvas.pixel(7, 0), small.pixel(1, 0));
        assert_eq!(canvas.pixel(0, 7), small.pixel(0, 1));
        assert_eq!(canvas.pixel(3, 3), small.pixel(0, 0));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(2, 2, 10, 10, Rgb::new(255, 0, 0), 255);
        assert_eq!(buf.pixel(3, 3)[0], 255);
        assert_eq!(buf.pixel(1, 1)[3], 0);
    }

    #[test]
    fn test_ppm_header() {
        let buf = PixelBuffer::new(2, 2);
        let mut out = Vec::new();
        buf.write_ppm(&mut out).unwrap();
        assert!(out.starts_with(b"P6\n2 2\n255\n"));
        // Header plus 2x2 RGB payload.
        assert_eq!(out.len(), b"P6\n2 2\n255\n".len() + 12);
    }
}
