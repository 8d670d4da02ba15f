use super::*;

/// Places mines at caller-chosen coordinates, for replays and deterministic tests.
///
/// Coordinates that are out of bounds, repeated, or inside the safe zone are skipped with a
/// warning, and at most the requested number of mines is placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place_mines(
        &mut self,
        board: &mut Board,
        safe_zone: &SafeZone,
        mines: CellCount,
    ) -> CellCount {
        let mut placed = 0;

        for &coords in &self.mines {
            if placed >= mines {
                log::warn!("Fixed layout has more mines than requested {}", mines);
                break;
            }
            if !board.is_valid(coords) {
                log::warn!("Skipping fixed mine at {:?}, out of bounds", coords);
                continue;
            }
            if safe_zone.contains(coords) {
                log::warn!("Skipping fixed mine at {:?}, inside the safe zone", coords);
                continue;
            }
            if board.contains_mine(coords) {
                log::warn!("Skipping fixed mine at {:?}, already placed", coords);
                continue;
            }
            board.set(coords, CellContent::Mine);
            placed += 1;
        }

        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_given_coordinates() {
        let mut board = Board::new(GridConfig::new(3, 3));
        let safe_zone = SafeZone::around(&board, (0, 0));

        let placed = FixedMineGenerator::new([(2, 2), (2, 0)]).place_mines(&mut board, &safe_zone, 2);

        assert_eq!(placed, 2);
        assert!(board.contains_mine((2, 2)));
        assert!(board.contains_mine((2, 0)));
    }

    #[test]
    fn skips_safe_zone_duplicates_and_out_of_bounds() {
        let mut board = Board::new(GridConfig::new(3, 3));
        let safe_zone = SafeZone::around(&board, (0, 0));

        let mut generator = FixedMineGenerator::new(vec![(1, 1), (5, 5), (2, 2), (2, 2), (0, 2)]);
        let placed = generator.place_mines(&mut board, &safe_zone, 3);

        assert_eq!(placed, 2);
        assert_eq!(board.mine_count(), 2);
        assert!(!board.contains_mine((1, 1)));
    }

    #[test]
    fn stops_at_requested_count() {
        let mut board = Board::new(GridConfig::new(4, 4));
        let safe_zone = SafeZone::around(&board, (0, 0));

        let placed =
            FixedMineGenerator::new([(3, 3), (3, 2), (2, 3)]).place_mines(&mut board, &safe_zone, 2);

        assert_eq!(placed, 2);
        assert!(!board.contains_mine((2, 3)));
    }
}
