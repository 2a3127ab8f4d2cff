//! Region extraction and import FFI functions.

use crate::automaton;
use crate::automaton::region::region_size;
use crate::automaton::Simulation;

/// Extracts a rectangular region of cells into a flat output buffer.
///
/// # Layout
/// The buffer is filled in y,x order (y changes slowest, x changes fastest),
/// one ordinal per byte. Corners wrap around the torus.
/// This matches the layout expected by `mc_import_region`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y)` bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn mc_extract_region(
    ptr: *const Simulation,
    out_buf: *mut u8,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let total_size = match region_size(min_x, min_y, max_x, max_y) {
        Some(size) => size,
        None => return 0,
    };

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, total_size);
    automaton::extract_region(&*ptr, buf_slice, min_x, min_y, max_x, max_y) as u64
}

/// Imports a rectangular region of cells from a flat buffer.
///
/// # Layout
/// The buffer is expected in y,x order (matching `mc_extract_region`).
/// Every byte must be 0, 1 or 2; otherwise nothing is written.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `in_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y)` bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn mc_import_region(
    ptr: *mut Simulation,
    in_buf: *const u8,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let total_size = match region_size(min_x, min_y, max_x, max_y) {
        Some(size) => size,
        None => return 0,
    };

    let buf_slice = std::slice::from_raw_parts(in_buf, total_size);
    match automaton::import_region(&mut *ptr, buf_slice, min_x, min_y, max_x, max_y) {
        Ok(read) => read as u64,
        Err(err) => {
            log::debug!("mc_import_region rejected input: {err}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{grid, lifecycle};
    use std::ptr;

    #[test]
    fn test_extract_region() {
        unsafe {
            let sim = lifecycle::mc_create(8, 8, 1, 1);

            grid::mc_set_cell(sim, 2, 2, 2);
            grid::mc_set_cell(sim, 3, 2, 0);

            let mut buffer = vec![9u8; 16];
            let bytes = mc_extract_region(sim, buffer.as_mut_ptr(), 2, 2, 6, 6);

            assert_eq!(bytes, 16);
            assert_eq!(buffer[0], 2);
            assert_eq!(buffer[1], 0);
            assert!(buffer[2..].iter().all(|&b| b == 1));

            lifecycle::mc_destroy(sim);
        }
    }

    #[test]
    fn test_import_region() {
        unsafe {
            let sim = lifecycle::mc_create(8, 8, 1, 1);

            let mut buffer = vec![1u8; 16];
            buffer[0] = 2;
            buffer[5] = 0;

            let bytes = mc_import_region(sim, buffer.as_ptr(), 6, 6, 10, 10);

            assert_eq!(bytes, 16);
            assert_eq!(grid::mc_get_cell(sim, 6, 6), 2);
            // Offset 5 is (x 7, y 7)
            assert_eq!(grid::mc_get_cell(sim, 7, 7), 0);

            lifecycle::mc_destroy(sim);
        }
    }

    #[test]
    fn test_import_rejects_invalid_bytes() {
        unsafe {
            let sim = lifecycle::mc_create(4, 4, 1, 1);
            let buffer = [2u8, 2, 2, 7];
            assert_eq!(mc_import_region(sim, buffer.as_ptr(), 0, 0, 2, 2), 0);
            assert_eq!(grid::mc_get_cell(sim, 0, 0), 1);
            lifecycle::mc_destroy(sim);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            let mut buffer = vec![0u8; 16];

            assert_eq!(
                mc_extract_region(ptr::null(), buffer.as_mut_ptr(), 0, 0, 4, 4),
                0
            );
            assert_eq!(
                mc_import_region(ptr::null_mut(), buffer.as_ptr(), 0, 0, 4, 4),
                0
            );

            let sim = lifecycle::mc_create(4, 4, 1, 1);
            assert_eq!(mc_extract_region(sim, ptr::null_mut(), 0, 0, 4, 4), 0);
            assert_eq!(mc_import_region(sim, ptr::null(), 0, 0, 4, 4), 0);
            // Empty rectangle never touches the buffer
            assert_eq!(mc_extract_region(sim, buffer.as_mut_ptr(), 4, 0, 0, 4), 0);
            lifecycle::mc_destroy(sim);
        }
    }
}
