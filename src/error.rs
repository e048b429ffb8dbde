use thiserror::Error;

/// Failures reported by [`Cursor`](crate::avl_set::Cursor) operations.
///
/// Every set operation is total; only cursor dereference and rank-addressed
/// cursor construction can fail.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The cursor sits one past the last element and has no key.
    #[error("cursor is past the end of a set of {len} elements")]
    PastTheEnd {
        /// Length of the set the cursor walks.
        len: usize,
    },

    /// A zero-based rank beyond the past-the-end position was requested.
    #[error("rank {rank} is out of bounds for a set of {len} elements")]
    RankOutOfBounds {
        /// The requested rank.
        rank: usize,
        /// Length of the set.
        len: usize,
    },
}

/// Result type alias for cursor operations.
pub type Result<T> = core::result::Result<T, Error>;
