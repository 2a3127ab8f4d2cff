//! Error taxonomy for the simulation core.

use thiserror::Error;

/// Errors raised by grid, rule table and simulation operations.
///
/// All variants are precondition violations detected at the call that caused
/// them. None are retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Width or height was zero, or the grid would not be addressable.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A cell value outside {0, 1, 2}.
    #[error("invalid cell state {0} (expected 0, 1 or 2)")]
    InvalidState(u8),

    /// Rule lookup or mutation outside {0, 1, 2} x [0, 48].
    #[error("invalid rule index (state {state}, sum index {sum_index})")]
    InvalidRuleIndex { state: u8, sum_index: usize },
}

impl Error {
    /// Status code reported through the C ABI. 0 is success and 1 is a null handle.
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidDimensions { .. } => 2,
            Error::InvalidState(_) => 3,
            Error::InvalidRuleIndex { .. } => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_nonzero() {
        let codes = [
            Error::InvalidDimensions {
                width: 0,
                height: 1,
            }
            .code(),
            Error::InvalidState(7).code(),
            Error::InvalidRuleIndex {
                state: 3,
                sum_index: 0,
            }
            .code(),
        ];
        assert!(codes.iter().all(|&c| c > 1));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidState(9).to_string(),
            "invalid cell state 9 (expected 0, 1 or 2)"
        );
        assert_eq!(
            Error::InvalidDimensions {
                width: 0,
                height: 4
            }
            .to_string(),
            "invalid grid dimensions 0x4"
        );
    }
}
