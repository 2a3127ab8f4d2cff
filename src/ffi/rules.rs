//! Rule table access for an external editor.
//!
//! `state` is the ordinal of the cell's own state (0, 1, 2) and `sum_index`
//! the ordinal sum of its 24 neighbors (0..=48).

use crate::automaton::{CellState, Simulation};

/// Returned by rule getters for a null handle or an out-of-range index.
pub const MC_INVALID_RULE: u8 = 0xFF;

/// Gets the next state for `(state, sum_index)`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The rule's ordinal, or `MC_INVALID_RULE` on a null handle or bad index.
#[no_mangle]
pub unsafe extern "C" fn mc_get_rule(ptr: *const Simulation, state: u8, sum_index: u8) -> u8 {
    if ptr.is_null() {
        return MC_INVALID_RULE;
    }

    (*ptr)
        .get_rule(state, sum_index as usize)
        .map(CellState::ordinal)
        .unwrap_or(MC_INVALID_RULE)
}

/// Sets the next state for `(state, sum_index)`.
///
/// A change schedules every cell for re-evaluation on the next step.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 if ptr is null, or an error code.
#[no_mangle]
pub unsafe extern "C" fn mc_set_rule(
    ptr: *mut Simulation,
    state: u8,
    sum_index: u8,
    value: u8,
) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let result = CellState::try_from(value)
        .and_then(|value| (*ptr).set_rule(state, sum_index as usize, value));
    match result {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}

/// Cycles a rule entry forward (0 -> 1 -> 2 -> 0) when `forward` is non-zero,
/// backward otherwise.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The new ordinal, or `MC_INVALID_RULE` on a null handle or bad index.
#[no_mangle]
pub unsafe extern "C" fn mc_cycle_rule(
    ptr: *mut Simulation,
    state: u8,
    sum_index: u8,
    forward: u8,
) -> u8 {
    if ptr.is_null() {
        return MC_INVALID_RULE;
    }

    (*ptr)
        .cycle_rule(state, sum_index as usize, forward != 0)
        .map(CellState::ordinal)
        .unwrap_or(MC_INVALID_RULE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle;
    use std::ptr;

    #[test]
    fn test_set_and_get_rule() {
        unsafe {
            let sim = lifecycle::mc_create(6, 6, 1, 1);
            assert_eq!(mc_get_rule(sim, 2, 48), 1);

            assert_eq!(mc_set_rule(sim, 2, 48, 0), 0);
            assert_eq!(mc_get_rule(sim, 2, 48), 0);

            lifecycle::mc_destroy(sim);
        }
    }

    #[test]
    fn test_rule_errors() {
        unsafe {
            let sim = lifecycle::mc_create(6, 6, 1, 1);

            assert_eq!(mc_get_rule(sim, 3, 0), MC_INVALID_RULE);
            assert_eq!(mc_get_rule(sim, 0, 49), MC_INVALID_RULE);
            assert_eq!(mc_set_rule(sim, 0, 49, 1), 4);
            assert_eq!(mc_set_rule(sim, 0, 0, 3), 3);
            assert_eq!(mc_cycle_rule(sim, 5, 0, 1), MC_INVALID_RULE);

            lifecycle::mc_destroy(sim);
        }
    }

    #[test]
    fn test_cycle_rule() {
        unsafe {
            let sim = lifecycle::mc_create(6, 6, 1, 1);
            assert_eq!(mc_cycle_rule(sim, 1, 24, 1), 2);
            assert_eq!(mc_cycle_rule(sim, 1, 24, 1), 0);
            assert_eq!(mc_cycle_rule(sim, 1, 24, 0), 2);
            assert_eq!(mc_get_rule(sim, 1, 24), 2);
            lifecycle::mc_destroy(sim);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            assert_eq!(mc_get_rule(ptr::null(), 0, 0), MC_INVALID_RULE);
            assert_eq!(mc_set_rule(ptr::null_mut(), 0, 0, 1), 1);
            assert_eq!(mc_cycle_rule(ptr::null_mut(), 0, 0, 1), MC_INVALID_RULE);
        }
    }
}
