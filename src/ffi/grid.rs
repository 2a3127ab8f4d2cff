//! Cell access and stepping.

use crate::automaton::Simulation;

/// Returned by `mc_get_cell` for a null handle.
pub const MC_INVALID_CELL: u8 = 0xFF;

/// A changed cell as reported by `mc_step_with_changes`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct McCellChange {
    pub x: i32,
    pub y: i32,
    pub state: u8,
}

/// Gets the state of a cell (0 = negative, 1 = neutral, 2 = positive).
/// Coordinates wrap around the torus.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The cell ordinal, or `MC_INVALID_CELL` if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mc_get_cell(ptr: *const Simulation, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return MC_INVALID_CELL;
    }
    (*ptr).get_cell(x, y).ordinal()
}

/// Sets a cell of the current generation and schedules its neighborhood.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 if ptr is null, or the `InvalidState` code.
#[no_mangle]
pub unsafe extern "C" fn mc_set_cell(ptr: *mut Simulation, x: i32, y: i32, value: u8) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    match (*ptr).set_cell_raw(x, y, value) {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}

/// Advances one generation, evaluating only pending cells.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 if ptr is null, or an error code.
#[no_mangle]
pub unsafe extern "C" fn mc_step(ptr: *mut Simulation) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    match (*ptr).step() {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}

/// Advances one generation, re-evaluating every cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 if ptr is null, or an error code.
#[no_mangle]
pub unsafe extern "C" fn mc_step_full(ptr: *mut Simulation) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    match (*ptr).step_full() {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}

/// Advances one generation and reports the cells that changed.
///
/// At most `capacity` changes are written to `out`, in ascending index
/// order. `out_len` receives the total number of changes, which can exceed
/// `capacity`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out` must point to at least `capacity` `McCellChange` values, or be
///   null when `capacity` is 0
/// - `out_len` must be a valid pointer, or null
///
/// # Returns
/// 0 on success, 1 if ptr is null, or an error code.
#[no_mangle]
pub unsafe extern "C" fn mc_step_with_changes(
    ptr: *mut Simulation,
    out: *mut McCellChange,
    capacity: usize,
    out_len: *mut usize,
) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let changes = match (*ptr).step_with_change_log() {
        Ok(changes) => changes,
        Err(err) => return err.code(),
    };

    if !out.is_null() && capacity > 0 {
        let out_slice = std::slice::from_raw_parts_mut(out, capacity);
        for (slot, change) in out_slice.iter_mut().zip(&changes) {
            *slot = McCellChange {
                x: change.x,
                y: change.y,
                state: change.state.ordinal(),
            };
        }
    }

    if !out_len.is_null() {
        *out_len = changes.len();
    }
    0
}
