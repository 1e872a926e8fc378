//! Errors reported by the checked lifecycle operations.
//!
//! The plain [`add`](crate::HilbertRTree::add) / [`finish`](crate::HilbertRTree::finish)
//! pair never fails; [`try_add`](crate::HilbertRTree::try_add) and
//! [`try_finish`](crate::HilbertRTree::try_finish) surface the same misuse as values.

use thiserror::Error;

/// Misuse detected by the checked operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IndexError {
    /// The tree was already finished; it accepts no more boxes and cannot be rebuilt.
    #[error("index is already finished")]
    AlreadyFinished,

    /// A coordinate was NaN or infinite.
    #[error("box {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index the box would have received.
        index: usize,
    },

    /// `min > max` on at least one axis.
    #[error("box {index} is inverted (min > max)")]
    InvertedBox {
        /// Index the box would have received.
        index: usize,
    },
}

/// Result alias for the checked operations.
pub type Result<T> = core::result::Result<T, IndexError>;
