use serde::{Deserialize, Serialize};

use crate::*;

/// Player annotation on a hidden cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    None,
    Flagged,
    Questioned,
}

#[derive(Copy, Clone, Debug, PartialEq)]
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

/// A single grid cell. Whether it holds a mine is fixed at construction and
/// visibility only ever goes from hidden to visible.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    visible: bool,
    mark: Mark,
}

impl Cell {
    pub const fn new(is_mine: bool) -> Self {
        Self {
            is_mine,
            visible: false,
            mark: Mark::None,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The stored mark, kept after reveal but no longer actionable.
    pub const fn mark(&self) -> Mark {
        self.mark
    }

    pub const fn is_flagged(&self) -> bool {
        !self.visible && matches!(self.mark, Mark::Flagged)
    }

    /// Revealed or a mine; a board is solved when every cell is settled.
    pub const fn is_settled(&self) -> bool {
        self.visible || self.is_mine
    }

    /// Makes the cell visible, returns `false` if it already was.
    pub fn reveal(&mut self) -> bool {
        if self.visible {
            false
        } else {
            self.visible = true;
            true
        }
    }

    pub fn set_mark(&mut self, mark: Mark) -> Result<MarkOutcome> {
        if self.visible {
            return Err(GameError::CellAlreadyRevealed);
        }

        if self.mark == mark {
            Ok(MarkOutcome::NoChange)
        } else {
            self.mark = mark;
            Ok(MarkOutcome::Changed)
        }
    }
}
