use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for filling an all-empty board with mines on the first reveal.
pub trait MineGenerator {
    /// Marks up to `mines` cells outside `safe_zone` as [`CellContent::Mine`], returning how many
    /// were placed.
    fn place_mines(&mut self, board: &mut Board, safe_zone: &SafeZone, mines: CellCount)
    -> CellCount;
}

impl<G: MineGenerator + ?Sized> MineGenerator for Box<G> {
    fn place_mines(
        &mut self,
        board: &mut Board,
        safe_zone: &SafeZone,
        mines: CellCount,
    ) -> CellCount {
        (**self).place_mines(board, safe_zone, mines)
    }
}
