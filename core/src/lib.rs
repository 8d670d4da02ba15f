use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use geometry::*;
pub use grid::*;
pub use level::*;
pub use snapshot::*;
pub use store::*;
pub use types::*;

mod board;
mod error;
mod game;
mod generator;
mod geometry;
mod grid;
mod level;
mod snapshot;
mod store;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    /// A chord on a number whose flagged mines did not match it.
    BadChord,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            BadChord => true,
            Won => true,
        }
    }

    pub const fn is_loss(self) -> bool {
        matches!(self, Self::HitMine | Self::BadChord)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (BadChord, _) => BadChord,
            (_, BadChord) => BadChord,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
