use crate::grid::Grid;
use std::{fmt, str::FromStr};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Share of the board covered by mines.
    pub const fn ratio(self) -> f64 {
        match self {
            Self::Easy => 0.1,
            Self::Medium => 0.2,
            Self::Hard => 0.5,
        }
    }

    /// Number of mines a board of this difficulty carries.
    pub fn mine_count(self, grid: Grid) -> usize {
        mine_count(grid, self.ratio())
    }
}

/// `floor(area * ratio)`, never more than the number of blocks on the grid.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn mine_count(grid: Grid, ratio: f64) -> usize {
    let area = grid.area();
    let count = (area as f64 * ratio.max(0.0)).floor() as usize;
    count.min(area)
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown difficulty {0:?}, expected one of: easy, medium, hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_owned())),
        }
    }
}
