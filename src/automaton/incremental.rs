//! Incremental stepping over the dirty worklist.
//!
//! Each generation only the pending cells are evaluated. Evaluation reads the
//! frozen current buffer and the rule table; results are then staged into the
//! next buffer in ascending index order, and every cell that changed queues its
//! 5x5 block for the following generation. Finally grid and worklist swap
//! roles together.
//!
//! Core invariant: a cell absent from the pending list holds the same value in
//! both grid buffers and would map to that value again, so skipping it yields
//! exactly what full recomputation would.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::cell::CellState;
use super::grid::GridStore;
use super::rules::RuleTable;
use super::stepping::evaluate_cell;
#[cfg(test)]
use super::worklist::Footprint;
use super::worklist::Worklist;
use crate::config::{Config, SeedPolicy, PARALLEL_THRESHOLD, STATE_COUNT};
use crate::error::Result;

/// Summary of one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number the step produced.
    pub generation: u64,
    /// Cells evaluated (the pending list length).
    pub evaluated: usize,
    /// Cells whose value changed.
    pub changed: usize,
}

/// A cell that took a new value during a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub x: i32,
    pub y: i32,
    pub state: CellState,
}

/// Cell counts per state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

impl Census {
    pub fn count(&self, state: CellState) -> usize {
        match state {
            CellState::Negative => self.negative,
            CellState::Neutral => self.neutral,
            CellState::Positive => self.positive,
        }
    }

    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }
}

/// Grid, rule table and worklist stepped together one generation at a time.
///
/// Rule edits and cell injections take `&mut self`, so they can only happen
/// between generations, never while a step is evaluating.
#[derive(Debug)]
pub struct Simulation {
    grid: GridStore,
    rules: RuleTable,
    worklist: Worklist,
    generation: u64,

    /// Rayon pool for evaluation, or None for serial.
    thread_pool: Option<rayon::ThreadPool>,
}

fn random_state<R: Rng + ?Sized>(rng: &mut R) -> CellState {
    CellState::ALL[rng.gen_range(0..STATE_COUNT)]
}

fn build_pool(threads: usize) -> Option<rayon::ThreadPool> {
    if threads <= 1 {
        return None;
    }

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(pool),
        Err(err) => {
            log::warn!("could not build {threads}-thread pool ({err}); evaluating serially");
            None
        }
    }
}

impl Simulation {
    /// Build a simulation from `config`. Every cell is pending for the first step.
    pub fn new(config: Config) -> Result<Self> {
        let Config {
            width,
            height,
            seed,
            rules,
            threads,
        } = config;

        let grid = match seed {
            SeedPolicy::Uniform(state) => GridStore::new(width, height, state)?,
            SeedPolicy::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                GridStore::from_fn(width, height, |_, _| random_state(&mut rng))?
            }
            SeedPolicy::PerCell(init) => GridStore::from_fn(width, height, |x, y| init(x, y))?,
        };
        let worklist = Worklist::new(width, height)?;
        let thread_pool = build_pool(threads);

        log::debug!(
            "created {}x{} simulation ({})",
            width,
            height,
            match &thread_pool {
                Some(pool) => format!("{} threads", pool.current_num_threads()),
                None => "serial".to_string(),
            }
        );

        Ok(Simulation {
            grid,
            rules,
            worklist,
            generation: 0,
            thread_pool,
        })
    }

    /// Same as [`new`](Self::new) with a non-default dirty footprint.
    #[cfg(test)]
    pub(crate) fn with_footprint(config: Config, footprint: Footprint) -> Result<Self> {
        let mut sim = Self::new(config)?;
        sim.worklist = Worklist::with_footprint(sim.width(), sim.height(), footprint)?;
        Ok(sim)
    }

    /// Uniform neutral grid with all-neutral rules.
    pub fn with_size(width: usize, height: usize) -> Result<Self> {
        Self::new(Config::new(width, height))
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn worklist(&self) -> &Worklist {
        &self.worklist
    }

    /// Cells the next step will evaluate.
    pub fn pending_len(&self) -> usize {
        self.worklist.pending_len()
    }

    pub fn is_parallel(&self) -> bool {
        self.thread_pool.is_some()
    }

    pub fn get_cell(&self, x: i32, y: i32) -> CellState {
        self.grid.get(x, y)
    }

    /// Overwrite a cell of the current generation and schedule its 5x5 block
    /// for the next step. Returns whether the value changed.
    pub fn set_cell(&mut self, x: i32, y: i32, state: CellState) -> bool {
        let index = self.grid.index_of(x, y);
        let changed = self.grid.inject(index, state);
        if changed {
            self.worklist.schedule_region(x, y);
        }
        changed
    }

    /// [`set_cell`](Self::set_cell) for an unvalidated ordinal.
    pub fn set_cell_raw(&mut self, x: i32, y: i32, value: u8) -> Result<bool> {
        let state = CellState::try_from(value)?;
        Ok(self.set_cell(x, y, state))
    }

    /// Fill every cell with an independent uniform draw from `rng`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for index in 0..self.grid.area() {
            self.grid.inject(index, random_state(rng));
        }
        self.worklist.schedule_all();
    }

    pub fn get_rule(&self, state: u8, sum_index: usize) -> Result<CellState> {
        self.rules.get(state, sum_index)
    }

    /// Replace one rule entry. Returns the previous value.
    ///
    /// A changed entry can alter cells that are not pending, so every cell is
    /// scheduled for re-evaluation.
    pub fn set_rule(&mut self, state: u8, sum_index: usize, value: CellState) -> Result<CellState> {
        let previous = self.rules.set(state, sum_index, value)?;
        if previous != value {
            self.worklist.schedule_all();
        }
        Ok(previous)
    }

    /// Cycle one rule entry forward (0 -> 1 -> 2 -> 0) or backward. Returns the new value.
    pub fn cycle_rule(&mut self, state: u8, sum_index: usize, forward: bool) -> Result<CellState> {
        let value = if forward {
            self.rules.cycle_forward(state, sum_index)?
        } else {
            self.rules.cycle_backward(state, sum_index)?
        };
        self.worklist.schedule_all();
        Ok(value)
    }

    /// Swap in a whole new rule table. Returns the old one.
    pub fn replace_rules(&mut self, rules: RuleTable) -> RuleTable {
        let old = std::mem::replace(&mut self.rules, rules);
        if old != self.rules {
            self.worklist.schedule_all();
        }
        old
    }

    pub fn randomize_rules<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rules.randomize(rng);
        self.worklist.schedule_all();
    }

    /// Advance one generation, evaluating only pending cells.
    ///
    /// On error the step is abandoned before anything is staged: the current
    /// generation, the pending list and the generation counter are unchanged.
    pub fn step(&mut self) -> Result<StepReport> {
        self.advance(None)
    }

    /// [`step`](Self::step), also returning every cell that changed as
    /// `(x, y, new state)` in ascending index order.
    pub fn step_with_change_log(&mut self) -> Result<Vec<CellChange>> {
        let mut changes = Vec::new();
        self.advance(Some(&mut changes))?;
        Ok(changes)
    }

    /// Advance one generation by re-evaluating every cell.
    pub fn step_full(&mut self) -> Result<StepReport> {
        self.worklist.schedule_all();
        self.advance(None)
    }

    /// Run `generations` steps. Returns the total number of cell changes.
    pub fn run(&mut self, generations: u64) -> Result<usize> {
        let mut changed = 0;
        for _ in 0..generations {
            changed += self.step()?.changed;
        }
        Ok(changed)
    }

    /// Every cell of the current generation as `(x, y, state)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, CellState)> + '_ {
        self.grid.iter()
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for &state in self.grid.current() {
            match state {
                CellState::Negative => census.negative += 1,
                CellState::Neutral => census.neutral += 1,
                CellState::Positive => census.positive += 1,
            }
        }
        census
    }

    /// Evaluate every pending cell against the frozen current generation.
    fn evaluate_pending(&self) -> Result<Vec<(usize, CellState)>> {
        let grid = &self.grid;
        let rules = &self.rules;
        let pending = self.worklist.pending();
        let evaluate = |&index: &usize| evaluate_cell(grid, rules, index).map(|next| (index, next));

        match &self.thread_pool {
            Some(pool) if pending.len() >= PARALLEL_THRESHOLD => {
                pool.install(|| pending.par_iter().map(evaluate).collect())
            }
            _ => pending.iter().map(evaluate).collect(),
        }
    }

    fn advance(&mut self, mut changes: Option<&mut Vec<CellChange>>) -> Result<StepReport> {
        self.worklist.sort_pending();
        let evaluated = self.evaluate_pending()?;
        self.worklist.clear_pending();

        // Serial merge: staging and dirty marking in ascending index order
        let mut changed = 0;
        for &(index, next) in &evaluated {
            if self.grid.stage_index(index, next) {
                changed += 1;
                let (x, y) = self.grid.coords_of(index);
                self.worklist.mark_region_dirty(x, y);
                if let Some(changes) = changes.as_deref_mut() {
                    changes.push(CellChange { x, y, state: next });
                }
            }
        }

        self.grid.swap();
        self.worklist.swap();
        self.generation += 1;

        log::trace!(
            "generation {}: evaluated {}, changed {}, queued {}",
            self.generation,
            evaluated.len(),
            changed,
            self.worklist.pending_len()
        );

        Ok(StepReport {
            generation: self.generation,
            evaluated: evaluated.len(),
            changed,
        })
    }
}
