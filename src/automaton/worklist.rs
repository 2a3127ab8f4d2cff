//! Per-generation dirty-cell scheduling.
//!
//! A cell's next value depends only on its own value and the 24 cells around
//! it, so it can only change if something in its 5x5 window changed. The
//! worklist keeps two duplicate-free index lists (pending for the generation
//! being evaluated, queued for the one after) with a membership flag array
//! each. Roles swap in lockstep with the grid buffers.
//!
//! A changed cell marks its full 5x5 block, center included. The center must
//! be re-evaluated next generation so its value is written into the other
//! grid buffer as well. If it is skipped, the stale copy in that buffer
//! resurfaces on the next swap and the cell flips between its old and new
//! value forever without ever being evaluated again.

use super::grid::{check_dimensions, wrapped_index};
use crate::config::RADIUS;
use crate::error::Result;

/// Cells marked around a changed cell.
#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Footprint {
    /// The full 5x5 block (25 cells).
    Block,
    /// The 24-cell ring without the center. Leaves stale cells behind.
    Ring,
}

/// Double-buffered dirty set over `width * height` cell indices.
#[derive(Clone, Debug)]
pub struct Worklist {
    width: usize,
    height: usize,
    lists: [Vec<usize>; 2],
    flags: [Vec<bool>; 2],
    current: usize,
    #[cfg(test)]
    footprint: Footprint,
}

impl Worklist {
    /// Cold start: every index is pending for generation 0, in ascending order.
    ///
    /// Fails with `InvalidDimensions` under the same rules as the grid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        let area = width * height;
        Ok(Worklist {
            width,
            height,
            lists: [(0..area).collect(), Vec::with_capacity(area)],
            flags: [vec![true; area], vec![false; area]],
            current: 0,
            #[cfg(test)]
            footprint: Footprint::Block,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_footprint(width: usize, height: usize, footprint: Footprint) -> Result<Self> {
        Ok(Worklist {
            footprint,
            ..Self::new(width, height)?
        })
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32, dx: i32, dy: i32) -> usize {
        wrapped_index(self.width, self.height, x, y, dx, dy)
    }

    #[cfg(test)]
    fn skips(&self, dx: i32, dy: i32) -> bool {
        self.footprint == Footprint::Ring && dx == 0 && dy == 0
    }

    #[cfg(not(test))]
    #[inline(always)]
    fn skips(&self, _dx: i32, _dy: i32) -> bool {
        false
    }

    /// Indices awaiting evaluation this generation.
    pub fn pending(&self) -> &[usize] {
        &self.lists[self.current]
    }

    /// Indices already scheduled for the next generation.
    pub fn queued(&self) -> &[usize] {
        &self.lists[self.current ^ 1]
    }

    pub fn pending_len(&self) -> usize {
        self.lists[self.current].len()
    }

    pub fn queued_len(&self) -> usize {
        self.lists[self.current ^ 1].len()
    }

    pub fn is_pending(&self, index: usize) -> bool {
        self.flags[self.current][index]
    }

    pub fn is_queued(&self, index: usize) -> bool {
        self.flags[self.current ^ 1][index]
    }

    #[inline]
    fn insert(list: &mut Vec<usize>, flags: &mut [bool], index: usize) -> bool {
        if flags[index] {
            return false;
        }
        flags[index] = true;
        list.push(index);
        true
    }

    /// Queue `index` for the next generation. Returns false if it was already queued.
    #[inline]
    pub fn mark_index(&mut self, index: usize) -> bool {
        let slot = self.current ^ 1;
        Self::insert(&mut self.lists[slot], &mut self.flags[slot], index)
    }

    /// Queue the wrapped cell `(x, y)` for the next generation.
    pub fn mark_dirty(&mut self, x: i32, y: i32) -> bool {
        let index = self.index_of(x, y, 0, 0);
        self.mark_index(index)
    }

    /// Queue the 5x5 block centered on `(x, y)`. Returns how many were newly added.
    pub fn mark_region_dirty(&mut self, x: i32, y: i32) -> usize {
        let mut added = 0;
        for dy in -RADIUS..=RADIUS {
            for dx in -RADIUS..=RADIUS {
                if self.skips(dx, dy) {
                    continue;
                }
                if self.mark_index(self.index_of(x, y, dx, dy)) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Add `(x, y)` to the pending list of the generation about to be evaluated.
    /// Used for edits made between generations.
    pub fn schedule(&mut self, x: i32, y: i32) -> bool {
        let index = self.index_of(x, y, 0, 0);
        self.schedule_index(index)
    }

    fn schedule_index(&mut self, index: usize) -> bool {
        let slot = self.current;
        Self::insert(&mut self.lists[slot], &mut self.flags[slot], index)
    }

    /// Add the 5x5 block centered on `(x, y)` to the pending list.
    pub fn schedule_region(&mut self, x: i32, y: i32) -> usize {
        let mut added = 0;
        for dy in -RADIUS..=RADIUS {
            for dx in -RADIUS..=RADIUS {
                if self.schedule_index(self.index_of(x, y, dx, dy)) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Make every cell pending, as at cold start.
    pub fn schedule_all(&mut self) {
        let slot = self.current;
        let list = &mut self.lists[slot];
        list.clear();
        list.extend(0..self.width * self.height);
        self.flags[slot].fill(true);
    }

    /// Sort the pending list ascending so evaluation order is reproducible.
    /// Edits between generations append out of order, so this runs once per step.
    pub fn sort_pending(&mut self) {
        self.lists[self.current].sort_unstable();
    }

    /// Take this generation's pending indices in ascending order and clear
    /// their membership flags. The backing storage is kept for reuse.
    pub fn drain(&mut self) -> std::vec::Drain<'_, usize> {
        let slot = self.current;
        let list = &mut self.lists[slot];
        let flags = &mut self.flags[slot];
        for &index in list.iter() {
            flags[index] = false;
        }
        list.sort_unstable();
        list.drain(..)
    }

    pub(crate) fn clear_pending(&mut self) {
        let slot = self.current;
        let flags = &mut self.flags[slot];
        for &index in self.lists[slot].iter() {
            flags[index] = false;
        }
        self.lists[slot].clear();
    }

    /// Exchange pending/queued roles, together with their flag arrays.
    /// Anything still pending is dropped first. The new pending list keeps
    /// marking order until [`sort_pending`](Self::sort_pending).
    pub fn swap(&mut self) {
        self.clear_pending();
        self.current ^= 1;
    }
}
