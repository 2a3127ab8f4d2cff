//! Metacell - 3-state toroidal cellular automaton
//!
//! Every cell holds one of three states and looks at the 24 cells of the 5x5
//! block around it. A rule table indexed by (own state, neighborhood sum)
//! gives the next state. Stepping is incremental: only cells whose window
//! changed last generation are re-evaluated.
//!
//! The library can be used directly from Rust through [`Simulation`], or
//! through the C ABI in [`ffi`].

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;

pub use automaton::{
    extract_region, import_region, CellChange, CellState, Census, GridStore, RuleTable,
    Simulation, StepReport,
};
pub use config::{Config, SeedPolicy};
pub use error::{Error, Result};
