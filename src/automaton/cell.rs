//! The three cell states.

use crate::error::{Error, Result};

/// State of a single cell.
///
/// Stored as its ordinal (0, 1, 2). Neighborhood sums use the signed value
/// (-1, 0, +1), so a sum index is the ordinal sum of the 24 neighbors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CellState {
    Negative = 0,
    #[default]
    Neutral = 1,
    Positive = 2,
}

impl CellState {
    pub const ALL: [CellState; 3] = [CellState::Negative, CellState::Neutral, CellState::Positive];

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// -1, 0 or +1.
    #[inline]
    pub fn signed(self) -> i32 {
        self as i32 - 1
    }

    /// Cycle forward: negative -> neutral -> positive -> negative.
    pub fn next(self) -> Self {
        match self {
            CellState::Negative => CellState::Neutral,
            CellState::Neutral => CellState::Positive,
            CellState::Positive => CellState::Negative,
        }
    }

    /// Cycle backward: negative -> positive -> neutral -> negative.
    pub fn prev(self) -> Self {
        match self {
            CellState::Negative => CellState::Positive,
            CellState::Neutral => CellState::Negative,
            CellState::Positive => CellState::Neutral,
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CellState::Negative),
            1 => Ok(CellState::Neutral),
            2 => Ok(CellState::Positive),
            other => Err(Error::InvalidState(other)),
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> u8 {
        state.ordinal()
    }
}
