//! Simulation creation, destruction, and size/generation queries.

use crate::automaton::{CellState, Simulation};
use crate::config::{Config, SeedPolicy};

/// Creates a simulation with every cell set to `fill` and all-neutral rules.
///
/// `threads` greater than 1 evaluates large generations on a worker pool.
///
/// # Returns
/// A pointer to a new Simulation, or null if the dimensions are not positive
/// or `fill` is not 0, 1 or 2.
///
/// # Safety
/// The returned pointer must eventually be freed with `mc_destroy()`.
#[no_mangle]
pub extern "C" fn mc_create(width: i32, height: i32, fill: u8, threads: u8) -> *mut Simulation {
    if width <= 0 || height <= 0 {
        return std::ptr::null_mut();
    }

    let fill = match CellState::try_from(fill) {
        Ok(state) => state,
        Err(_) => return std::ptr::null_mut(),
    };

    let config = Config::new(width as usize, height as usize)
        .with_seed(SeedPolicy::Uniform(fill))
        .with_threads(threads as usize);

    match Simulation::new(config) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            log::debug!("mc_create failed: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a simulation and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `mc_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn mc_destroy(ptr: *mut Simulation) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the generation counter.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mc_get_generation(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// Grid width, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mc_get_width(ptr: *const Simulation) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).width() as u32
}

/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// Grid height, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mc_get_height(ptr: *const Simulation) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).height() as u32
}

/// Number of cells the next step will evaluate.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn mc_pending_count(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).pending_len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        unsafe {
            let sim = mc_create(16, 9, 1, 1);
            assert!(!sim.is_null());
            assert_eq!(mc_get_width(sim), 16);
            assert_eq!(mc_get_height(sim), 9);

            // Cold start: everything pending
            assert_eq!(mc_pending_count(sim), 144);

            // Should not crash
            mc_destroy(sim);
        }
    }

    #[test]
    fn test_initial_generation() {
        unsafe {
            let sim = mc_create(4, 4, 2, 1);
            assert_eq!(mc_get_generation(sim), 0);
            mc_destroy(sim);
        }
    }

    #[test]
    fn test_create_rejects_bad_arguments() {
        assert!(mc_create(0, 4, 1, 1).is_null());
        assert!(mc_create(4, -3, 1, 1).is_null());
        assert!(mc_create(4, 4, 3, 1).is_null());
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            // Should not crash
            mc_destroy(ptr::null_mut());
            assert_eq!(mc_get_generation(ptr::null()), 0);
            assert_eq!(mc_get_width(ptr::null()), 0);
            assert_eq!(mc_get_height(ptr::null()), 0);
            assert_eq!(mc_pending_count(ptr::null()), 0);
        }
    }
}
