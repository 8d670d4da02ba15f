use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Places mines by drawing random cells and rejecting those in the safe zone or already mined.
///
/// The loop has no iteration cap: asking for more mines than there are cells outside the safe
/// zone never returns. [`LevelParams::new`] rejects such requests up front.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator<R = SmallRng> {
    rng: R,
}

impl RandomMineGenerator<SmallRng> {
    /// Reproducible placement for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Fresh placement seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MineGenerator for RandomMineGenerator<R> {
    fn place_mines(
        &mut self,
        board: &mut Board,
        safe_zone: &SafeZone,
        mines: CellCount,
    ) -> CellCount {
        let mut placed = 0;
        let mut rejected = 0u64;

        while placed < mines {
            let coords = board.geometry().random_cell(&mut self.rng);
            if safe_zone.contains(coords) || board.contains_mine(coords) {
                rejected += 1;
                continue;
            }
            board.set(coords, CellContent::Mine);
            placed += 1;
        }

        log::debug!(
            "placed {} mines around safe zone at {:?}, {} draws rejected",
            placed,
            safe_zone.center(),
            rejected
        );
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(seed: u64, size: Coord2, start: Coord2, mines: CellCount) -> Board {
        let mut board = Board::new(GridConfig::new(size.0, size.1));
        let safe_zone = SafeZone::around(&board, start);
        let placed = RandomMineGenerator::from_seed(seed).place_mines(&mut board, &safe_zone, mines);
        assert_eq!(placed, mines);
        board
    }

    #[test]
    fn places_exact_count_outside_safe_zone() {
        for seed in 0..20 {
            let board = place(seed, (9, 9), (4, 4), 30);
            let safe_zone = SafeZone::around(&board, (4, 4));

            assert_eq!(board.mine_count(), 30);
            assert!(safe_zone.iter().all(|pos| !board.contains_mine(pos)));
        }
    }

    #[test]
    fn fills_every_cell_outside_safe_zone_when_asked() {
        let board = place(3, (4, 4), (0, 0), 12);
        let safe_zone = SafeZone::around(&board, (0, 0));

        for pos in board.coords() {
            assert_eq!(board.contains_mine(pos), !safe_zone.contains(pos), "{pos:?}");
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let first = place(42, (16, 16), (3, 8), 40);
        let second = place(42, (16, 16), (3, 8), 40);

        assert_eq!(first.cells(), second.cells());
    }
}
