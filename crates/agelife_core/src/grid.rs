//! Dense toroidal grid of cell ages.

use agelife_data::PopulationStats;
use serde::{Deserialize, Serialize};

use crate::config::{validate_dimensions, ELDERLY_MORTALITY_CUTOFF};
use crate::error::{ConfigError, Result};
use crate::random::RandomSource;
use crate::snapshot::Snapshot;

/// A fixed-size, row-major grid where each cell holds an age.
///
/// An age of `0` is an empty cell; anything else is a living cell that has
/// survived that many generations. Dimensions are fixed at construction and
/// every coordinate wraps around both axes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// An entirely empty grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = validate_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![0; len],
        })
    }

    /// Wraps an existing row-major age buffer.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u32>) -> Result<Self> {
        let expected = validate_dimensions(rows, cols)?;
        if cells.len() != expected {
            return Err(ConfigError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Builds the starting population.
    ///
    /// Each age is drawn from `[0, ELDERLY_MORTALITY_CUTOFF)` in row-major
    /// order, then zeroed when `age % 3 <= 1`, which leaves roughly a third of
    /// the cells alive.
    pub fn initialize<S>(rows: usize, cols: usize, rng: &mut S) -> Result<Self>
    where
        S: RandomSource + ?Sized,
    {
        let len = validate_dimensions(rows, cols)?;
        let cells = (0..len)
            .map(|_| {
                let age = rng.below(ELDERLY_MORTALITY_CUTOFF);
                if age % 3 <= 1 {
                    0
                } else {
                    age
                }
            })
            .collect();

        let grid = Self { rows, cols, cells };
        tracing::info!(
            rows,
            cols,
            population = grid.population(),
            "Grid initialized"
        );
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        (row % self.rows) * self.cols + (col % self.cols)
    }

    /// Age at `(row, col)`; out-of-range coordinates wrap.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[self.index(row, col)]
    }

    /// Sets the age at `(row, col)`; out-of-range coordinates wrap.
    pub fn set(&mut self, row: usize, col: usize, age: u32) {
        let idx = self.index(row, col);
        self.cells[idx] = age;
    }

    /// Row-major view of every age.
    pub fn ages(&self) -> &[u32] {
        &self.cells
    }

    pub(crate) fn ages_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }

    pub fn row(&self, row: usize) -> &[u32] {
        let start = (row % self.rows) * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&age| age != 0).count()
    }

    /// Freezes the current ages for use as a tick's only input.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.rows, self.cols, self.cells.clone().into_boxed_slice())
    }

    pub fn stats(&self, generation: u64) -> PopulationStats {
        PopulationStats::from_ages(generation, self.cells.iter().copied())
    }
}
