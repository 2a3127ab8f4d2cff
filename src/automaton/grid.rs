//! Double-buffered toroidal grid storage.
//!
//! Two generation buffers live in a fixed two-slot arena. A parity bit selects
//! which slot is "current" (read by evaluation) and which is "next" (written by
//! staging). Swapping flips the bit; no cell data is copied.

use super::cell::CellState;
use crate::config::{NEIGHBORHOOD_CELLS, RADIUS};
use crate::error::{Error, Result};

/// Grid of cell states over a wrapped `width` x `height` coordinate space.
#[derive(Clone, Debug)]
pub struct GridStore {
    width: usize,
    height: usize,
    buffers: [Vec<CellState>; 2],
    current: usize,
}

impl GridStore {
    /// Allocate both buffers filled with `fill`.
    ///
    /// Fails with `InvalidDimensions` before allocating if either side is zero
    /// or a coordinate would not fit in `i32`.
    pub fn new(width: usize, height: usize, fill: CellState) -> Result<Self> {
        check_dimensions(width, height)?;
        let area = width * height;
        Ok(GridStore {
            width,
            height,
            buffers: [vec![fill; area], vec![fill; area]],
            current: 0,
        })
    }

    /// Allocate both buffers with `init(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut init: F) -> Result<Self>
    where
        F: FnMut(i32, i32) -> CellState,
    {
        check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(init(x, y));
            }
        }
        Ok(GridStore {
            width,
            height,
            buffers: [cells.clone(), cells],
            current: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, `width * height`.
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Which arena slot currently holds the "current" generation (0 or 1).
    #[inline]
    pub fn parity(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn wrap_x(&self, x: i32) -> i32 {
        wrap_offset(x, 0, self.width) as i32
    }

    #[inline]
    pub fn wrap_y(&self, y: i32) -> i32 {
        wrap_offset(y, 0, self.height) as i32
    }

    /// Linear index of `(x, y)` after wrapping, row-major.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> usize {
        wrapped_index(self.width, self.height, x, y, 0, 0)
    }

    /// Inverse of [`index_of`](Self::index_of) for `index < area`.
    #[inline]
    pub fn coords_of(&self, index: usize) -> (i32, i32) {
        ((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Current value at `(x, y)`, wrapped.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> CellState {
        self.buffers[self.current][self.index_of(x, y)]
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> CellState {
        self.buffers[self.current][index]
    }

    /// The current generation, row-major.
    pub fn current(&self) -> &[CellState] {
        &self.buffers[self.current]
    }

    /// The buffer being filled for the next generation.
    pub fn next(&self) -> &[CellState] {
        &self.buffers[self.current ^ 1]
    }

    /// Write `value` into the next buffer at `(x, y)`.
    /// Returns whether it differs from the current value there.
    #[inline]
    pub fn stage(&mut self, x: i32, y: i32, value: CellState) -> bool {
        let index = self.index_of(x, y);
        self.stage_index(index, value)
    }

    /// [`stage`](Self::stage) for an unvalidated ordinal. Nothing is written on error.
    pub fn stage_raw(&mut self, x: i32, y: i32, value: u8) -> Result<bool> {
        let state = CellState::try_from(value)?;
        Ok(self.stage(x, y, state))
    }

    #[inline]
    pub(crate) fn stage_index(&mut self, index: usize, value: CellState) -> bool {
        let cur = self.current;
        self.buffers[cur ^ 1][index] = value;
        self.buffers[cur][index] != value
    }

    /// Overwrite the current buffer at `index` outside of a step.
    /// Returns whether the value changed.
    pub(crate) fn inject(&mut self, index: usize, value: CellState) -> bool {
        let cell = &mut self.buffers[self.current][index];
        let changed = *cell != value;
        *cell = value;
        changed
    }

    /// Exchange current/next roles.
    #[inline]
    pub fn swap(&mut self) {
        self.current ^= 1;
    }

    /// Signed sum over the 24 wrapped neighbors of `(x, y)`, in [-24, 24].
    pub fn neighborhood_sum(&self, x: i32, y: i32) -> i32 {
        self.ordinal_sum(x, y) as i32 - NEIGHBORHOOD_CELLS as i32
    }

    /// Ordinal sum over the 24 wrapped neighbors of `(x, y)`, in [0, 48].
    /// This is the rule table's sum index.
    pub fn ordinal_sum(&self, x: i32, y: i32) -> usize {
        let cells = &self.buffers[self.current];
        let mut sum = 0usize;

        for dy in -RADIUS..=RADIUS {
            for dx in -RADIUS..=RADIUS {
                // Skip the center cell
                if dx == 0 && dy == 0 {
                    continue;
                }
                let index = wrapped_index(self.width, self.height, x, y, dx, dy);
                sum += cells[index].ordinal() as usize;
            }
        }

        sum
    }

    /// Every cell of the current generation as `(x, y, state)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, CellState)> + '_ {
        let width = self.width;
        self.current()
            .iter()
            .enumerate()
            .map(move |(i, &state)| ((i % width) as i32, (i / width) as i32, state))
    }
}

/// `origin + offset` wrapped onto `[0, side)`.
///
/// Computed in `i64`: any `i32` origin is valid, including `i32::MIN` and
/// `i32::MAX`, and `side` never exceeds `i32::MAX`.
#[inline]
pub(crate) fn wrap_offset(origin: i32, offset: i32, side: usize) -> usize {
    (origin as i64 + offset as i64).rem_euclid(side as i64) as usize
}

/// Row-major index of `(x + dx, y + dy)` on a `width` x `height` torus.
#[inline]
pub(crate) fn wrapped_index(
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
) -> usize {
    wrap_offset(y, dy, height) * width + wrap_offset(x, dx, width)
}

pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    let fits = |side: usize| side > 0 && side <= i32::MAX as usize;
    if fits(width) && fits(height) && width.checked_mul(height).is_some() {
        Ok(())
    } else {
        Err(Error::InvalidDimensions { width, height })
    }
}
