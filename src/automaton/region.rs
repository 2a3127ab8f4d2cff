//! Rectangular region extraction and import.
//!
//! Regions are half-open rectangles `[min, max)` in grid coordinates. The grid
//! is a torus, so corners may lie outside `[0, width) x [0, height)` and are
//! wrapped; they are never clamped.

use super::cell::CellState;
use super::incremental::Simulation;
use crate::error::Result;

/// Cell count of `[min_x, max_x) x [min_y, max_y)`, or None if empty.
pub(crate) fn region_size(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<usize> {
    let width = max_x as i64 - min_x as i64;
    let height = max_y as i64 - min_y as i64;
    if width <= 0 || height <= 0 {
        return None;
    }
    usize::try_from(width.checked_mul(height)?).ok()
}

/// Copy the current generation inside the region into `out_buf`.
///
/// # Layout
/// Row-major: y changes slowest, x fastest. One ordinal (0, 1, 2) per byte.
/// This order matches `import_region`.
///
/// # Returns
/// Number of bytes written, or 0 for an empty region or a short buffer.
pub fn extract_region(
    sim: &Simulation,
    out_buf: &mut [u8],
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> usize {
    let total_size = match region_size(min_x, min_y, max_x, max_y) {
        Some(size) => size,
        None => return 0,
    };

    // Ensure buffer is large enough
    if out_buf.len() < total_size {
        return 0;
    }

    let mut offset = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            out_buf[offset] = sim.get_cell(x, y).ordinal();
            offset += 1;
        }
    }

    offset
}

/// Write a region of ordinals into the current generation.
///
/// Every byte is validated before anything is written, so an `InvalidState`
/// error leaves the grid untouched. Each changed cell is scheduled together
/// with its 5x5 block, as with [`Simulation::set_cell`].
///
/// # Returns
/// Number of bytes read, or 0 for an empty region or a short buffer.
pub fn import_region(
    sim: &mut Simulation,
    in_buf: &[u8],
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> Result<usize> {
    let total_size = match region_size(min_x, min_y, max_x, max_y) {
        Some(size) => size,
        None => return Ok(0),
    };

    if in_buf.len() < total_size {
        return Ok(0);
    }

    let states = in_buf[..total_size]
        .iter()
        .map(|&value| CellState::try_from(value))
        .collect::<Result<Vec<_>>>()?;

    let mut offset = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            sim.set_cell(x, y, states[offset]);
            offset += 1;
        }
    }

    Ok(offset)
}
