//! The (state, neighborhood sum) -> next state lookup table.

use rand::Rng;

use super::cell::CellState;
use crate::config::{STATE_COUNT, SUM_INDEX_COUNT};
use crate::error::{Error, Result};

/// 3 x 49 transition table.
///
/// Rows are the current state ordinal, columns the sum index (ordinal sum of
/// the 24 neighbors, equivalently signed sum + 24). Entries are always valid
/// states, so a lookup can never yield an out-of-domain value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    entries: [[CellState; SUM_INDEX_COUNT]; STATE_COUNT],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::uniform(CellState::Neutral)
    }
}

impl RuleTable {
    /// Table with every entry neutral.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every entry set to `value`.
    pub fn uniform(value: CellState) -> Self {
        RuleTable {
            entries: [[value; SUM_INDEX_COUNT]; STATE_COUNT],
        }
    }

    #[inline]
    fn check(state: u8, sum_index: usize) -> Result<(usize, usize)> {
        if (state as usize) < STATE_COUNT && sum_index < SUM_INDEX_COUNT {
            Ok((state as usize, sum_index))
        } else {
            Err(Error::InvalidRuleIndex { state, sum_index })
        }
    }

    /// Next state for a cell in `state` whose neighbors sum to `sum_index`.
    #[inline]
    pub fn get(&self, state: u8, sum_index: usize) -> Result<CellState> {
        let (row, col) = Self::check(state, sum_index)?;
        Ok(self.entries[row][col])
    }

    /// Replace one entry. Returns the previous value.
    pub fn set(&mut self, state: u8, sum_index: usize, value: CellState) -> Result<CellState> {
        let (row, col) = Self::check(state, sum_index)?;
        Ok(std::mem::replace(&mut self.entries[row][col], value))
    }

    /// Advance one entry 0 -> 1 -> 2 -> 0. Returns the new value.
    pub fn cycle_forward(&mut self, state: u8, sum_index: usize) -> Result<CellState> {
        let (row, col) = Self::check(state, sum_index)?;
        let entry = &mut self.entries[row][col];
        *entry = entry.next();
        Ok(*entry)
    }

    /// Step one entry back 0 -> 2 -> 1 -> 0. Returns the new value.
    pub fn cycle_backward(&mut self, state: u8, sum_index: usize) -> Result<CellState> {
        let (row, col) = Self::check(state, sum_index)?;
        let entry = &mut self.entries[row][col];
        *entry = entry.prev();
        Ok(*entry)
    }

    /// All 49 entries for one current state, indexed by sum index.
    pub fn row(&self, state: CellState) -> &[CellState; SUM_INDEX_COUNT] {
        &self.entries[state.ordinal() as usize]
    }

    pub fn fill(&mut self, value: CellState) {
        for row in self.entries.iter_mut() {
            row.fill(value);
        }
    }

    /// Draw every entry uniformly from the three states.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in self.entries.iter_mut() {
            for entry in row.iter_mut() {
                *entry = CellState::ALL[rng.gen_range(0..STATE_COUNT)];
            }
        }
    }

    /// Iterate `(state, sum_index, next)` over the whole table.
    pub fn iter(&self) -> impl Iterator<Item = (CellState, usize, CellState)> + '_ {
        CellState::ALL.into_iter().flat_map(move |state| {
            self.row(state)
                .iter()
                .enumerate()
                .map(move |(sum_index, &next)| (state, sum_index, next))
        })
    }
}
