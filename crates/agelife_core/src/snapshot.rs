use agelife_data::SparseSnapshot;
use serde::{Deserialize, Serialize};

use crate::neighbors::{live_neighbors, Neighbors};

/// Read-only copy of every age at the start of a tick.
///
/// All rule evaluation in a generation reads from the same snapshot, so cells
/// updated earlier in the tick never influence later ones.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    ages: Box<[u32]>,
}

impl Snapshot {
    pub(crate) fn new(rows: usize, cols: usize, ages: Box<[u32]>) -> Self {
        debug_assert_eq!(ages.len(), rows * cols);
        Self { rows, cols, ages }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Age at `(row, col)`; out-of-range coordinates wrap.
    #[inline]
    pub fn age(&self, row: usize, col: usize) -> u32 {
        self.ages[(row % self.rows) * self.cols + (col % self.cols)]
    }

    /// Ages of the living cells around `(row, col)`.
    pub fn neighbors(&self, row: usize, col: usize) -> Neighbors {
        live_neighbors(self, row, col)
    }

    /// `(row, col, age)` for every living cell, row-major.
    pub fn living(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let cols = self.cols;
        self.ages
            .iter()
            .enumerate()
            .filter(|&(_, &age)| age != 0)
            .map(move |(idx, &age)| (idx / cols, idx % cols, age))
    }

    pub fn population(&self) -> usize {
        self.living().count()
    }

    /// Row -> column -> age mapping of the living cells, for renderers.
    pub fn to_sparse(&self) -> SparseSnapshot {
        let mut sparse = SparseSnapshot::new();
        for (row, col, age) in self.living() {
            sparse.entry(row).or_default().insert(col, age);
        }
        sparse
    }
}
