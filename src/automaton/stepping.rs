//! Per-cell transition and the exhaustive reference step.

use super::cell::CellState;
use super::grid::GridStore;
use super::rules::RuleTable;
use crate::error::Result;

/// Next state of the cell at `index`, read from the current buffer.
///
/// Reads only the frozen current generation and the rule table, so
/// evaluations of different cells are independent.
#[inline]
pub fn evaluate_cell(grid: &GridStore, rules: &RuleTable, index: usize) -> Result<CellState> {
    let (x, y) = grid.coords_of(index);
    let state = grid.get_index(index);
    rules.get(state.ordinal(), grid.ordinal_sum(x, y))
}

/// Step every cell of `grid` forward by one generation, with no worklist.
///
/// This is the plain recompute-everything algorithm. Returns how many cells
/// changed. On error nothing is swapped and the current generation is intact.
pub fn step_exhaustive(grid: &mut GridStore, rules: &RuleTable) -> Result<usize> {
    let next = {
        let frozen: &GridStore = grid;
        (0..frozen.area())
            .map(|index| evaluate_cell(frozen, rules, index))
            .collect::<Result<Vec<_>>>()?
    };

    let mut changed = 0;
    for (index, state) in next.into_iter().enumerate() {
        if grid.stage_index(index, state) {
            changed += 1;
        }
    }

    grid.swap();
    Ok(changed)
}
