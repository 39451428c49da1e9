use crate::matrix_sampler::Snapshot;

/// Which half of the keyboard this is; fixed in the flashed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Closed/open state of every switch of both halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGrid<const ROWS: usize, const COLS: usize>(pub [[bool; COLS]; ROWS]);

impl<const ROWS: usize, const COLS: usize> Default for KeyGrid<ROWS, COLS> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<const ROWS: usize, const COLS: usize> KeyGrid<ROWS, COLS> {
    pub const EMPTY: Self = Self([[false; COLS]; ROWS]);

    pub fn is_closed(&self, row: usize, col: usize) -> bool {
        self.0
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, row: usize, col: usize, closed: bool) {
        self.0[row][col] = closed;
    }

    /// (row, col) of every closed switch in row-major order.
    pub fn closed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, c)| **c)
                .map(move |(col, _)| (row, col))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|r| r.iter().all(|c| !c))
    }
}

/// Combines the two halves' snapshots into one grid.
///
/// Cells are filled from column `COLS - 1` down to 0 and, within a column, from row `ROWS - 1`
/// down to 0; each cell takes the lowest remaining bit of its source. Columns below
/// `split_col` come from the left half, the rest from the right half.
pub struct Fuser<const ROWS: usize, const COLS: usize> {
    split_col: usize,
    side: Side,
    grid: KeyGrid<ROWS, COLS>,
}

impl<const ROWS: usize, const COLS: usize> Fuser<ROWS, COLS> {
    pub fn new(split_col: usize, side: Side) -> Self {
        Self {
            split_col,
            side,
            grid: KeyGrid::EMPTY,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn fuse(&mut self, local: Snapshot, peer: Snapshot) -> &KeyGrid<ROWS, COLS> {
        fuse_into(&mut self.grid, local, peer, self.split_col, self.side);
        &self.grid
    }
}

pub fn fuse<const ROWS: usize, const COLS: usize>(
    local: Snapshot,
    peer: Snapshot,
    split_col: usize,
    side: Side,
) -> KeyGrid<ROWS, COLS> {
    let mut grid = KeyGrid::EMPTY;
    fuse_into(&mut grid, local, peer, split_col, side);
    grid
}

fn fuse_into<const ROWS: usize, const COLS: usize>(
    grid: &mut KeyGrid<ROWS, COLS>,
    local: Snapshot,
    peer: Snapshot,
    split_col: usize,
    side: Side,
) {
    let (mut left, mut right) = match side {
        Side::Left => (local.0, peer.0),
        Side::Right => (peer.0, local.0),
    };

    for col in (0..COLS).rev() {
        let src = if col < split_col {
            &mut left
        } else {
            &mut right
        };
        for row in (0..ROWS).rev() {
            grid.0[row][col] = *src & 1 == 1;
            *src >>= 1;
        }
    }
}

#[cfg(test)]
#[path = "fuser_test.rs"]
mod test;
