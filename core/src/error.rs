use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Too many mines, requested {requested} but at most {max} fit")]
    TooManyMines { requested: CellCount, max: CellCount },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
