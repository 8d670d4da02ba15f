use anyhow::{Context, Result, bail};
use gridsweep_core::{CellCount, Coord, Difficulty, LevelParams};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Deserialize;
use std::path::Path;

/// Board used when neither the settings file nor the command line names a size.
const DEFAULT_SIZE: (Coord, Coord) = (10, 10);

/// Contents of the TOML settings file.
///
/// ```toml
/// seed = 42
///
/// [level]
/// width = 16
/// height = 16
/// difficulty = "medium"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub level: LevelSettings,
    pub seed: Option<u64>,
}

/// Partial level description, completed by [`Settings::resolve_level`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelSettings {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub mines: Option<CellCount>,
    pub difficulty: Option<Difficulty>,
}

impl LevelSettings {
    /// Fields set in `overrides` replace ours.
    fn merge(self, overrides: LevelSettings) -> Self {
        Self {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            mines: overrides.mines.or(self.mines),
            difficulty: overrides.difficulty.or(self.difficulty),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies command-line values on top of the file.
    pub fn with_overrides(self, level: LevelSettings, seed: Option<u64>) -> Self {
        Self {
            level: self.level.merge(level),
            seed: seed.or(self.seed),
        }
    }

    /// Final level: an explicit mine count wins over a difficulty, which defaults to easy.
    ///
    /// Explicit counts must lie within [`LevelParams::mine_bounds`].
    pub fn resolve_level(&self) -> Result<LevelParams> {
        let width = self.level.width.unwrap_or(DEFAULT_SIZE.0);
        let height = self.level.height.unwrap_or(DEFAULT_SIZE.1);

        let level = match self.level.mines {
            Some(mines) => {
                let level = LevelParams::new(width, height, mines)?;
                let bounds = LevelParams::mine_bounds(width, height);
                if !bounds.contains(&mines) {
                    bail!(
                        "{} mines on a {}x{} board, expected {}..={}",
                        mines,
                        width,
                        height,
                        bounds.start(),
                        bounds.end()
                    );
                }
                level
            }
            None => {
                let difficulty = self.level.difficulty.unwrap_or_default();
                let mut rng = self.level_rng();
                LevelParams::from_difficulty(width, height, difficulty, &mut rng)?
            }
        };
        log::debug!("resolved level {:?}", level);
        Ok(level)
    }

    fn level_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Parses a difficulty name as accepted on the command line.
pub fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    match value.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => Err(format!("unknown difficulty `{other}`, expected easy, medium or hard")),
    }
}
