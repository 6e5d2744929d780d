//! Subdivided wireframe plane with a travelling sine wave. Vertices live in
//! the plane's local frame (x, y in-plane, z out-of-plane); the renderer
//! tilts the whole mesh near-horizontal and applies the spin.

use crate::config::{GRID_SEGMENTS, GRID_SIZE, GRID_SPIN_RATE, GRID_WAVE_AMPLITUDE, GRID_WAVE_FREQUENCY};

pub struct WaveGrid {
    positions: Vec<f32>,
    spin: f32,
}

impl WaveGrid {
    pub fn new() -> Self {
        let verts_per_side = GRID_SEGMENTS + 1;
        let step = GRID_SIZE / GRID_SEGMENTS as f32;
        let half = GRID_SIZE / 2.0;

        let mut positions = Vec::with_capacity(verts_per_side * verts_per_side * 3);
        for row in 0..verts_per_side {
            for col in 0..verts_per_side {
                positions.push(col as f32 * step - half);
                positions.push(half - row as f32 * step);
                positions.push(0.0);
            }
        }
        Self {
            positions,
            spin: 0.0,
        }
    }

    /// Displace the out-of-plane coordinate as a travelling wave of the
    /// in-plane x and the wall clock, and advance the spin.
    pub fn tick(&mut self, frames: f32, wall_clock: f32) {
        for i in (0..self.positions.len()).step_by(3) {
            let x = self.positions[i];
            self.positions[i + 2] =
                (x * GRID_WAVE_FREQUENCY + wall_clock).sin() * GRID_WAVE_AMPLITUDE;
        }
        self.spin += GRID_SPIN_RATE * frames;
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Wireframe edges as index pairs: every horizontal and vertical
    /// neighbour link in the vertex lattice.
    pub fn line_indices() -> Vec<u16> {
        let verts_per_side = (GRID_SEGMENTS + 1) as u16;
        let mut indices = Vec::new();
        for row in 0..verts_per_side {
            for col in 0..verts_per_side {
                let here = row * verts_per_side + col;
                if col + 1 < verts_per_side {
                    indices.push(here);
                    indices.push(here + 1);
                }
                if row + 1 < verts_per_side {
                    indices.push(here);
                    indices.push(here + verts_per_side);
                }
            }
        }
        indices
    }
}

impl Default for WaveGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_has_expected_vertex_count() {
        let grid = WaveGrid::new();
        let side = GRID_SEGMENTS + 1;
        assert_eq!(grid.positions().len(), side * side * 3);
    }

    #[test]
    fn wave_follows_the_sine_of_x_and_time() {
        let mut grid = WaveGrid::new();
        let t = 1.75;
        grid.tick(1.0, t);
        for i in (0..grid.positions().len()).step_by(3) {
            let x = grid.positions()[i];
            let expected = (x * GRID_WAVE_FREQUENCY + t).sin() * GRID_WAVE_AMPLITUDE;
            assert!((grid.positions()[i + 2] - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn displacement_is_idempotent_per_clock_value() {
        // The wave is a function of the clock, not an accumulation.
        let mut grid = WaveGrid::new();
        grid.tick(1.0, 0.5);
        let first: Vec<f32> = grid.positions().to_vec();
        grid.tick(1.0, 0.5);
        assert_eq!(first, grid.positions());
    }

    #[test]
    fn edge_count_matches_lattice() {
        let side = GRID_SEGMENTS + 1;
        let expected_edges = 2 * GRID_SEGMENTS * side;
        assert_eq!(WaveGrid::line_indices().len(), expected_edges * 2);
    }
}
