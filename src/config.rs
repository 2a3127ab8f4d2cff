//! Simulation constants and construction options.

use std::fmt;

use crate::automaton::cell::CellState;
use crate::automaton::rules::RuleTable;

/// Default grid dimensions (850x650 = 552,500 cells).
pub const DEFAULT_WIDTH: usize = 850;
pub const DEFAULT_HEIGHT: usize = 650;

/// Neighborhood radius: a 5x5 block around each cell.
pub const RADIUS: i32 = 2;

/// Cells in the 5x5 block excluding the center.
pub const NEIGHBORHOOD_CELLS: usize = 24;

/// Rule table dimensions: 3 states x 49 possible ordinal sums (0..=48).
pub const STATE_COUNT: usize = 3;
pub const SUM_INDEX_COUNT: usize = 2 * NEIGHBORHOOD_CELLS + 1;

/// Fewest pending cells for which evaluation is handed to the worker pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// How the grid is populated at construction.
pub enum SeedPolicy {
    /// Every cell starts in the same state.
    Uniform(CellState),

    /// Independent uniform draw per cell from a generator seeded with `seed`.
    Random { seed: u64 },

    /// Caller-supplied initializer, called once per `(x, y)` in row-major order.
    PerCell(Box<dyn Fn(i32, i32) -> CellState + Send + Sync>),
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::Uniform(CellState::Neutral)
    }
}

impl fmt::Debug for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::Uniform(state) => f.debug_tuple("Uniform").field(state).finish(),
            SeedPolicy::Random { seed } => f.debug_struct("Random").field("seed", seed).finish(),
            SeedPolicy::PerCell(_) => f.write_str("PerCell(..)"),
        }
    }
}

/// Options for [`Simulation::new`](crate::automaton::Simulation::new).
#[derive(Debug)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub seed: SeedPolicy,
    pub rules: RuleTable,
    /// Worker threads for cell evaluation. 0 and 1 both mean serial.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Config {
    pub fn new(width: usize, height: usize) -> Self {
        Config {
            width,
            height,
            seed: SeedPolicy::default(),
            rules: RuleTable::default(),
            threads: 1,
        }
    }

    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}
