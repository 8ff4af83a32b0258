//! Live-neighbour lookup on the torus.

use std::ops::Deref;

use crate::snapshot::Snapshot;

/// Moore neighbourhood offsets as `(d_row, d_col)`: the row above left to
/// right, the two sides of the cell, then the row below left to right.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Ages of a cell's living neighbours, in [`NEIGHBOR_OFFSETS`] order.
///
/// Never contains a zero. Stored inline since there are at most eight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    ages: [u32; 8],
    len: usize,
}

impl Neighbors {
    fn push(&mut self, age: u32) {
        self.ages[self.len] = age;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ages[..self.len]
    }
}

impl Deref for Neighbors {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        self.as_slice()
    }
}

#[inline(always)]
fn wrap(index: usize, delta: isize, size: usize) -> usize {
    // Dimensions are validated to fit in isize at grid construction.
    (index as isize + delta).rem_euclid(size as isize) as usize
}

/// Collects the living neighbours of `(row, col)` from `snapshot`.
///
/// Each of the eight offsets is resolved independently, so on grids narrower
/// than three cells the same position can be reported more than once.
pub fn live_neighbors(snapshot: &Snapshot, row: usize, col: usize) -> Neighbors {
    let rows = snapshot.rows();
    let cols = snapshot.cols();
    let row = row % rows;
    let col = col % cols;

    let mut found = Neighbors::default();
    for (d_row, d_col) in NEIGHBOR_OFFSETS {
        let age = snapshot.age(wrap(row, d_row, rows), wrap(col, d_col, cols));
        if age != 0 {
            found.push(age);
        }
    }
    found
}
