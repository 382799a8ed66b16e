//! 2D canvas renderer for simulation cell grids.
//!
//! Simulation state is categorical, so cells use a fixed four-color palette
//! rather than the continuous risk ramp. Burning cells get a radial gradient
//! highlight to make active combustion stand out.

use crate::color::Rgb;
use crate::core_types::{CellState, SimulationFrame};
use crate::playback::FrameSink;
use crate::raster::PixelBuffer;

/// Fixed palette for the four cell states.
const UNBURNED_COLOR: Rgb = Rgb::new(22, 101, 52); // forest green
const BURNING_COLOR: Rgb = Rgb::new(239, 68, 68); // red
const BURNED_COLOR: Rgb = Rgb::new(31, 41, 55); // dark gray
const WATER_COLOR: Rgb = Rgb::new(59, 130, 246); // blue

/// Radial gradient stops for burning cells: bright amber center fading
/// through red to deep red at the cell edge.
const BURN_CENTER: Rgb = Rgb::new(251, 191, 36);
const BURN_MID: Rgb = Rgb::new(239, 68, 68);
const BURN_EDGE: Rgb = Rgb::new(220, 38, 38);

/// Gutter between cells, in canvas pixels.
const CELL_GUTTER: f32 = 0.5;

fn state_color(state: CellState) -> Rgb {
    match state {
        CellState::Unburned => UNBURNED_COLOR,
        CellState::Burning => BURNING_COLOR,
        CellState::Burned => BURNED_COLOR,
        CellState::Water => WATER_COLOR,
    }
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let ch = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Rgb::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
}

/// Draws one filled square per grid cell into an owned pixel canvas.
///
/// The canvas is mutated in place and kept across frames: a missing frame is
/// a no-op render, leaving the previous frame visible.
#[derive(Debug)]
pub struct GridRenderer {
    canvas: PixelBuffer,
}

impl GridRenderer {
    /// Reference canvas edge used by the dashboard.
    pub const DEFAULT_CANVAS_SIZE: usize = 400;

    pub fn new(canvas_size: usize) -> Self {
        GridRenderer {
            canvas: PixelBuffer::new(canvas_size, canvas_size),
        }
    }

    /// The rendered canvas.
    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    /// Render a frame, or keep the previous canvas when `frame` is absent.
    pub fn render(&mut self, frame: Option<&SimulationFrame>) {
        let Some(frame) = frame else {
            return;
        };
        let grid_size = frame.size();
        if grid_size == 0 {
            return;
        }

        let canvas_size = self.canvas.width();
        let cell = canvas_size as f32 / grid_size as f32;

        for row in 0..grid_size {
            for col in 0..grid_size {
                let state = frame.at(col, row);
                let x0 = (col as f32 * cell).round() as usize;
                let y0 = (row as f32 * cell).round() as usize;
                let x1 = (((col + 1) as f32 * cell - CELL_GUTTER).round() as usize)
                    .min(canvas_size);
                let y1 = (((row + 1) as f32 * cell - CELL_GUTTER).round() as usize)
                    .min(canvas_size);

                if state == CellState::Burning {
                    self.fill_burning_cell(x0, y0, x1, y1, cell);
                } else {
                    let color = state_color(state);
                    for py in y0..y1 {
                        for px in x0..x1 {
                            self.canvas.put_pixel(px, py, color, 255);
                        }
                    }
                }
            }
        }
    }

    /// Radial gradient fill: amber at the cell center, red at half the cell
    /// extent, deep red beyond.
    fn fill_burning_cell(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, cell: f32) {
        let cx = (x0 as f32 + x1 as f32) / 2.0;
        let cy = (y0 as f32 + y1 as f32) / 2.0;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let t = (dx * dx + dy * dy).sqrt() / cell;
                let color = if t < 0.5 {
                    lerp_rgb(BURN_CENTER, BURN_MID, t * 2.0)
                } else {
                    lerp_rgb(BURN_MID, BURN_EDGE, ((t - 0.5) * 2.0).min(1.0))
                };
                self.canvas.put_pixel(px, py, color, 255);
            }
        }
    }
}

impl FrameSink for GridRenderer {
    fn present(&mut self, frame: &SimulationFrame, _stats: &crate::core_types::FrameStats) {
        self.render(Some(frame));
    }
}
