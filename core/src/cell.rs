use serde::{Deserialize, Serialize};

/// State of a single grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Mines among the neighbours. Always 0 for mined cells and before placement.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Hidden, unflagged, still open to a reveal.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
