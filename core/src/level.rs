use core::ops::RangeInclusive;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lowest mine density, in percent of cells, offered when the player picks an exact mine count.
pub const MIN_MINE_PERCENT: CellCount = 10;
/// Highest mine density, in percent of cells, offered when the player picks an exact mine count.
pub const MAX_MINE_PERCENT: CellCount = 30;

/// Dimensions and mine count of a level, validated so that mine placement always terminates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelParams {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self::new_unchecked(10, 10, 10)
    }
}

impl LevelParams {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(width, height, mines).validated()
    }

    /// Picks a mine count for `difficulty`, clamped to what the board can hold.
    pub fn from_difficulty<R: Rng + ?Sized>(
        width: Coord,
        height: Coord,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        let total = mult(width, height);
        let (low, high) = difficulty.mine_range(total);
        let mines = if low < high {
            rng.random_range(low..high)
        } else {
            low
        };
        let mines = mines.min(max_mines(width, height));
        log::debug!(
            "{:?} level {}x{} picked {} mines from {}..{}",
            difficulty,
            width,
            height,
            mines,
            low,
            high
        );
        Self::new(width, height, mines)
    }

    /// Range of mine counts a player may pick directly for a board of this size.
    pub fn mine_bounds(width: Coord, height: Coord) -> RangeInclusive<CellCount> {
        let total = mult(width, height);
        let max = max_mines(width, height);
        let low = percent_of(total, MIN_MINE_PERCENT).min(max);
        let high = percent_of(total, MAX_MINE_PERCENT).min(max);
        low..=high
    }

    pub fn validated(self) -> Result<Self> {
        check_dimensions(self.width, self.height)?;
        let max = self.max_mines();
        if self.mines > max {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                max,
            });
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Most mines that still leave room for the largest possible safe zone.
    pub fn max_mines(&self) -> CellCount {
        max_mines(self.width, self.height)
    }

    pub const fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.width, self.height)
    }
}

/// Mine density presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Mine density bounds in percent of cells.
    const fn percents(self) -> (CellCount, CellCount) {
        match self {
            Self::Easy => (10, 13),
            Self::Medium => (14, 17),
            Self::Hard => (18, 22),
        }
    }

    /// Half-open range of mine counts for a board of `total` cells.
    pub fn mine_range(self, total: CellCount) -> (CellCount, CellCount) {
        let (low, high) = self.percents();
        (percent_of(total, low), percent_of(total, high))
    }
}

fn check_dimensions(width: Coord, height: Coord) -> Result<()> {
    if width <= 0 || height <= 0 {
        Err(GameError::InvalidDimensions { width, height })
    } else {
        Ok(())
    }
}

fn max_mines(width: Coord, height: Coord) -> CellCount {
    mult(width, height).saturating_sub(max_safe_zone_size(width, height))
}

/// `percent`% of `total`, rounded up.
fn percent_of(total: CellCount, percent: CellCount) -> CellCount {
    total.saturating_mul(percent).div_ceil(100)
}
