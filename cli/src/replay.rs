use anyhow::{Context, Result, anyhow, bail};
use gridsweep_core::{Coord, Coord2, Game, GameEvents, Presentation};
use std::str::FromStr;

/// One scripted player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    /// Reveal a hidden cell, or chord a revealed number.
    Reveal(Coord2),
    Flag(Coord2),
    Reset,
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let mut parts = value.split_whitespace();
        let command = parts.next().ok_or_else(|| anyhow!("empty move"))?;
        let mv = match command {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut parts)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut parts)?),
            "reset" => Self::Reset,
            other => bail!("unknown command `{other}`"),
        };
        if let Some(extra) = parts.next() {
            bail!("unexpected `{extra}` after move");
        }
        Ok(mv)
    }
}

fn parse_coords<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |name: &str| -> Result<Coord> {
        let value = parts.next().ok_or_else(|| anyhow!("missing {name}"))?;
        value
            .parse::<Coord>()
            .with_context(|| format!("invalid {name} `{value}`"))
    };
    let col = next("column")?;
    let row = next("row")?;
    Ok((col, row))
}

/// Parses a `;`-separated move script, e.g. `r 4 4; f 0 1; r 2 3`.
pub fn parse_script(script: &str) -> Result<Vec<Move>> {
    script
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, part)| {
            part.parse::<Move>()
                .with_context(|| format!("move {} `{}`", index + 1, part))
        })
        .collect()
}

/// Reports the end of the game through the log.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogEvents;

impl GameEvents for LogEvents {
    fn game_won(&mut self) {
        log::info!("won");
    }

    fn game_lost(&mut self) {
        log::info!("lost");
    }
}

/// Plays `moves` in order. Moves the game rejects are logged and skipped.
pub fn play<P: Presentation, E: GameEvents>(game: &mut Game<P, E>, moves: &[Move]) {
    for &mv in moves {
        let result = match mv {
            Move::Reveal(coords) => game.reveal(coords).map(|outcome| {
                log::debug!("reveal {:?}: {:?}", coords, outcome);
            }),
            Move::Flag(coords) => game.toggle_flag(coords).map(|outcome| {
                log::debug!("flag {:?}: {:?}", coords, outcome);
            }),
            Move::Reset => {
                game.reset();
                Ok(())
            }
        };
        if let Err(err) = result {
            log::warn!("skipping {:?}: {}", mv, err);
        }
    }
}
