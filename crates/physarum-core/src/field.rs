//! Trail field — the shared scalar grid every particle senses and marks.
//!
//! The grid is toroidal for writes: deposits and diffusion wrap around the
//! edges. Sensing reads are clamped to the nearest edge cell instead. The
//! two policies differ on purpose and shape the emergent patterns, so they
//! are kept separate here.

use crate::config::FieldConfig;
use crate::error::Result;
use crate::types::{clamp_index, wrap_index, Position};
use serde::Serialize;

/// A pending addition to one cell, produced while particles sense and move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Deposit {
    pub x: usize,
    pub y: usize,
    pub amount: f64,
}

/// Dense `height x width` grid of non-negative trail intensities.
#[derive(Debug, Clone)]
pub struct TrailField {
    width: usize,
    height: usize,
    decay: f64,
    diffusion_rate: f64,
    /// Row-major cells, `grid[y * width + x]`.
    grid: Vec<f64>,
    /// Reused by `decay_and_diffuse` so each step reads one consistent grid.
    scratch: Vec<f64>,
}

impl TrailField {
    /// Build a field from validated configuration, filled with the baseline.
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        config.validate()?;
        let cells = config.width * config.height;
        Ok(Self {
            width: config.width,
            height: config.height,
            decay: config.decay,
            diffusion_rate: config.diffusion_rate,
            grid: vec![config.baseline; cells],
            scratch: vec![0.0; cells],
        })
    }

    /// Build a field with default decay, diffusion and baseline.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_config(&FieldConfig::new(width, height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn diffusion_rate(&self) -> f64 {
        self.diffusion_rate
    }

    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Row-major view of every cell.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Iterate the grid one row (fixed `y`) at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.grid.chunks(self.width)
    }

    /// Intensity of an integer cell, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.grid[y * self.width + x])
        } else {
            None
        }
    }

    /// Sum of all cell intensities.
    pub fn total(&self) -> f64 {
        self.grid.iter().sum()
    }

    /// Largest cell intensity.
    pub fn max(&self) -> f64 {
        self.grid.iter().cloned().fold(0.0f64, f64::max)
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: f64) {
        self.grid.iter_mut().for_each(|cell| *cell = value);
    }

    /// The cell a continuous position lands on, wrapping toroidally.
    pub fn wrapped_cell(&self, x: f64, y: f64) -> (usize, usize) {
        (wrap_index(x, self.width), wrap_index(y, self.height))
    }

    /// Add `amount` to the cell under `(x, y)`, wrapping out-of-range coordinates.
    pub fn deposit_at(&mut self, x: f64, y: f64, amount: f64) {
        let (xi, yi) = self.wrapped_cell(x, y);
        self.grid[yi * self.width + xi] += amount;
    }

    /// Build the deferred form of `deposit_at`.
    pub fn deposit_for(&self, position: &Position, amount: f64) -> Deposit {
        let (x, y) = self.wrapped_cell(position.x, position.y);
        Deposit { x, y, amount }
    }

    /// Apply one deferred deposit. Indices are wrapped again so foreign
    /// deposits cannot index out of bounds.
    pub fn apply_deposit(&mut self, deposit: &Deposit) {
        let x = deposit.x % self.width;
        let y = deposit.y % self.height;
        self.grid[y * self.width + x] += deposit.amount;
    }

    /// Reduce a batch of deposits into the grid. Order does not matter.
    pub fn apply_deposits(&mut self, deposits: &[Deposit]) {
        for deposit in deposits {
            self.apply_deposit(deposit);
        }
    }

    /// Read the cell under `(x, y)` for sensing, clamping to the nearest edge.
    pub fn sample_at(&self, x: f64, y: f64) -> f64 {
        let xi = clamp_index(x, self.width);
        let yi = clamp_index(y, self.height);
        self.grid[yi * self.width + xi]
    }

    /// Apply one evaporation + diffusion pass.
    ///
    /// Every cell is decayed first; the discrete Laplacian is then computed
    /// from the fully decayed grid with wrapped orthogonal neighbours.
    pub fn decay_and_diffuse(&mut self) {
        let decay = self.decay;
        self.grid.iter_mut().for_each(|cell| *cell *= decay);

        if self.diffusion_rate == 0.0 {
            return;
        }

        let (w, h) = (self.width, self.height);
        let rate = self.diffusion_rate;
        let grid = &self.grid;
        for y in 0..h {
            let up = (y + h - 1) % h;
            let down = (y + 1) % h;
            for x in 0..w {
                let left = (x + w - 1) % w;
                let right = (x + 1) % w;
                let centre = grid[y * w + x];
                // Summed as differences so equal neighbours contribute exactly zero.
                let laplacian = (grid[up * w + x] - centre)
                    + (grid[down * w + x] - centre)
                    + (grid[y * w + left] - centre)
                    + (grid[y * w + right] - centre);
                // Rounding near the 0.25 limit can dip a hair below zero.
                // NaN and infinities pass through untouched.
                let value = centre + rate * laplacian;
                self.scratch[y * w + x] = if value < 0.0 { 0.0 } else { value };
            }
        }
        std::mem::swap(&mut self.grid, &mut self.scratch);
    }

    /// Copy the grid out for a rendering collaborator.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            width: self.width,
            height: self.height,
            cells: self.grid.clone(),
        }
    }
}

/// An owned copy of the grid at a step boundary.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<f64>,
}

impl FieldSnapshot {
    /// `ln(1 + v)` of every cell, which keeps faint trails visible next to
    /// dense ones when rendered.
    pub fn log_scaled(&self) -> Vec<f64> {
        self.cells.iter().map(|v| v.ln_1p()).collect()
    }

    /// Rows of the snapshot as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells.chunks(self.width).map(|row| row.to_vec()).collect()
    }
}
