//! C FFI layer for host applications (renderers, rule editors).
//!
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//! The simulation is passed around as an opaque `*mut Simulation`.
//!
//! The actual logic is in the `automaton` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and conversion of errors to status codes
//! (0 = success, 1 = null handle, otherwise [`Error::code`](crate::error::Error::code)).

pub mod grid;
pub mod lifecycle;
pub mod region;
pub mod rules;

pub use grid::{
    mc_get_cell, mc_set_cell, mc_step, mc_step_full, mc_step_with_changes, McCellChange,
};
pub use lifecycle::{
    mc_create, mc_destroy, mc_get_generation, mc_get_height, mc_get_width, mc_pending_count,
};
pub use region::{mc_extract_region, mc_import_region};
pub use rules::{mc_cycle_rule, mc_get_rule, mc_set_rule};
