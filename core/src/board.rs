use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// What a cell of the puzzle holds, independent of whether the player has seen it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    #[default]
    Empty,
    /// Count of adjacent mines, `1..=8`.
    Number(u8),
    Mine,
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Adjacent mine count shown for this cell, zero for empty cells and mines.
    pub const fn number(self) -> u8 {
        match self {
            Self::Number(count) => count,
            _ => 0,
        }
    }
}

/// The puzzle's content store.
pub type Board = Grid<CellContent>;

/// Board-level queries and the one-time number assignment.
pub trait BoardExt {
    fn contains_mine(&self, coords: Coord2) -> bool;
    fn mine_count(&self) -> CellCount;
    fn adjacent_mine_count(&self, coords: Coord2) -> u8;
    fn assign_numbers(&mut self);
}

impl BoardExt for Board {
    fn contains_mine(&self, coords: Coord2) -> bool {
        self.get(coords).is_mine()
    }

    fn mine_count(&self) -> CellCount {
        self.cells()
            .iter()
            .filter(|cell| cell.is_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        self.neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    /// Marks every non-mine cell with its adjacent mine count, leaving zero-count cells empty.
    fn assign_numbers(&mut self) {
        for pos in self.coords() {
            if self.contains_mine(pos) {
                continue;
            }
            let count = self.adjacent_mine_count(pos);
            if count > 0 {
                self.set(pos, CellContent::Number(count));
            }
        }
    }
}

/// The first revealed cell plus its in-bounds neighbors, kept free of mines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafeZone {
    cells: SmallVec<[Coord2; 9]>,
}

impl SafeZone {
    pub fn around<T>(grid: &Grid<T>, center: Coord2) -> Self {
        let mut cells = SmallVec::new();
        cells.push(center);
        cells.extend(grid.neighbors(center));
        Self { cells }
    }

    pub fn center(&self) -> Coord2 {
        self.cells[0]
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains(&coords)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().copied()
    }
}

/// Largest safe zone a first reveal can produce on a `width` by `height` board.
pub fn max_safe_zone_size(width: Coord, height: Coord) -> CellCount {
    mult(width.min(3), height.min(3))
}
