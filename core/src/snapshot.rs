use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player can see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(CellContent),
}

impl CellView {
    fn symbol(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flagged => 'F',
            Self::Revealed(CellContent::Empty) => '.',
            Self::Revealed(CellContent::Mine) => '*',
            Self::Revealed(CellContent::Number(count)) => char::from(b'0' + count),
        }
    }
}

/// Serializable player view of a game at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub state: GameState,
    pub mine_count: CellCount,
    pub flags_left: isize,
    /// Row-major, `cells[row][col]`.
    pub cells: Vec<Vec<CellView>>,
}

impl Snapshot {
    pub fn from_game<P: Presentation, E: GameEvents>(game: &Game<P, E>) -> Self {
        let (width, height) = game.size();
        let cells = (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| {
                        let coords = (col, row);
                        let state = game.cell_state(coords).unwrap_or_default();
                        if state.revealed {
                            CellView::Revealed(game.content(coords))
                        } else if state.flagged {
                            CellView::Flagged
                        } else {
                            CellView::Hidden
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            size: game.size(),
            state: game.state(),
            mine_count: game.mine_count(),
            flags_left: game.flags_left(),
            cells,
        }
    }

    pub fn view(&self, (col, row): Coord2) -> Option<CellView> {
        let row = self.cells.get(usize::try_from(row).ok()?)?;
        row.get(usize::try_from(col).ok()?).copied()
    }
}

/// One line per row, highest row first so the text matches the world layout.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter().rev() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
