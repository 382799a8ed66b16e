//! 3D cell mesh for simulation playback: one box instance per grid cell,
//! recolored and rescaled by fire state each frame.

use crate::color::Rgb;
use crate::core_types::{CellState, FrameStats, SimulationFrame, Vec3};
use crate::playback::FrameSink;

/// One box instance in the cell mesh.
#[derive(Debug, Clone)]
pub struct CellInstance {
    pub position: Vec3,
    pub scale_y: f32,
    pub color: Rgb,
    /// Emissive tint for burning cells, absent otherwise.
    pub emissive: Option<Rgb>,
    pub state: CellState,
}

/// Instanced cell grid laid out on the plane, centered on the origin.
///
/// Cell footprints are 0.9 units on a 1-unit spacing so the gaps read as a
/// grid. The mesh is rebuilt only when the incoming frame size changes;
/// otherwise instances are updated in place.
#[derive(Debug)]
pub struct CellMeshRenderer {
    grid_size: usize,
    cells: Vec<CellInstance>,
}

impl CellMeshRenderer {
    const UNBURNED_COLOR: Rgb = Rgb::new(34, 139, 34); // 0x228B22
    const BURNING_COLOR: Rgb = Rgb::new(255, 69, 0); // 0xFF4500
    const BURNING_EMISSIVE: Rgb = Rgb::new(255, 34, 0); // 0xFF2200
    const BURNED_COLOR: Rgb = Rgb::new(26, 26, 26); // 0x1a1a1a
    const WATER_COLOR: Rgb = Rgb::new(59, 130, 246);

    pub fn new(grid_size: usize) -> Self {
        CellMeshRenderer {
            grid_size,
            cells: Self::build_cells(grid_size),
        }
    }

    fn build_cells(grid_size: usize) -> Vec<CellInstance> {
        let offset = grid_size as f32 / 2.0;
        let mut cells = Vec::with_capacity(grid_size * grid_size);
        for row in 0..grid_size {
            for col in 0..grid_size {
                cells.push(CellInstance {
                    position: Vec3::new(
                        col as f32 - offset + 0.5,
                        0.25,
                        row as f32 - offset + 0.5,
                    ),
                    scale_y: 1.0,
                    color: Self::UNBURNED_COLOR,
                    emissive: None,
                    state: CellState::Unburned,
                });
            }
        }
        cells
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cells(&self) -> &[CellInstance] {
        &self.cells
    }

    /// Reset every instance to the unburned look.
    pub fn reset(&mut self) {
        self.cells = Self::build_cells(self.grid_size);
    }

    /// Apply a frame's states. A missing frame is a no-op.
    pub fn update(&mut self, frame: Option<&SimulationFrame>) {
        let Some(frame) = frame else {
            return;
        };
        if frame.size() == 0 {
            return;
        }
        if frame.size() != self.grid_size {
            self.grid_size = frame.size();
            self.cells = Self::build_cells(self.grid_size);
        }
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            let row = idx / self.grid_size;
            let col = idx % self.grid_size;
            let state = frame.at(col, row);
            cell.state = state;
            match state {
                CellState::Burning => {
                    cell.color = Self::BURNING_COLOR;
                    cell.emissive = Some(Self::BURNING_EMISSIVE);
                    cell.position.y = 0.5;
                    cell.scale_y = 1.5;
                }
                CellState::Burned => {
                    cell.color = Self::BURNED_COLOR;
                    cell.emissive = None;
                    cell.position.y = 0.15;
                    cell.scale_y = 0.6;
                }
                CellState::Unburned => {
                    cell.color = Self::UNBURNED_COLOR;
                    cell.emissive = None;
                    cell.position.y = 0.25;
                    cell.scale_y = 1.0;
                }
                CellState::Water => {
                    cell.color = Self::WATER_COLOR;
                    cell.emissive = None;
                    cell.position.y = 0.25;
                    cell.scale_y = 1.0;
                }
            }
        }
    }

    /// Idle flicker for burning cells: bob and stretch on a per-cell phase.
    pub fn animate(&mut self, time: f32) {
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if cell.state == CellState::Burning {
                let phase = time * 10.0 + idx as f32 * 0.1;
                cell.position.y = 0.5 + phase.sin() * 0.2;
                cell.scale_y = 1.5 + phase.sin() * 0.3;
            }
        }
    }
}

impl FrameSink for CellMeshRenderer {
    fn present(&mut self, frame: &SimulationFrame, _stats: &FrameStats) {
        self.update(Some(frame));
    }
}
