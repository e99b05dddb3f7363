#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use timer::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod timer;
mod types;

/// Board shape and mine total for one game.
///
/// Always satisfies `rows > 0`, `cols > 0` and `mines < rows * cols`, so at
/// least one cell is safe and the first click can never be a mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDifficulty")]
pub struct Difficulty {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawDifficulty {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawDifficulty> for Difficulty {
    type Error = GameError;

    fn try_from(raw: RawDifficulty) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

impl Difficulty {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(16, 30, 99);

    const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines >= mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.rows && coords.1 < self.cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BEGINNER
    }
}

/// Named difficulty levels offered by the classic game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn difficulty(self) -> Difficulty {
        match self {
            Self::Beginner => Difficulty::BEGINNER,
            Self::Intermediate => Difficulty::INTERMEDIATE,
            Self::Expert => Difficulty::EXPERT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Beginner
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownPreset)
    }
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        preset.difficulty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Unchanged,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Outcome of a single `reveal` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Cell was already open or flagged, or the game is over
    Unchanged,
    /// Safe cell opened, carrying its adjacency count (0 means a flood-fill ran)
    Revealed(u8),
    Lost,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}
