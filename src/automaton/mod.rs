//! Core automaton logic.
//!
//! This module holds the cell type, the rule table, the double-buffered grid,
//! the dirty worklist and the steppers built on them. The FFI layer in `ffi/`
//! calls into these types.

pub mod cell;
pub mod grid;
pub mod incremental;
pub mod region;
pub mod rules;
pub mod stepping;
pub mod worklist;

pub use cell::CellState;
pub use grid::GridStore;
pub use incremental::{CellChange, Census, Simulation, StepReport};
pub use region::{extract_region, import_region};
pub use rules::RuleTable;
pub use stepping::{evaluate_cell, step_exhaustive};
pub use worklist::Worklist;
