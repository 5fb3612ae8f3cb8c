use thiserror::Error;

/// Checked failures reported by [`Sequence`](crate::Sequence) and
/// [`CharBuffer`](crate::CharBuffer).
///
/// Every fallible operation validates its arguments before the first write,
/// so a returned error means the container was left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A position argument exceeds the logical length.
    #[error("{op}: position {pos} is out of range for length {len}")]
    OutOfRange {
        /// Name of the operation that rejected the position.
        op: &'static str,
        /// The offending position.
        pos: usize,
        /// Logical length at the time of the call.
        len: usize,
    },
    /// The requested slot count exceeds the configured capacity ceiling.
    #[error("requested capacity {requested} exceeds the maximum of {max}")]
    Allocation {
        /// Slots that were asked for.
        requested: usize,
        /// The ceiling in effect.
        max: usize,
    },
    /// The requested length of a [`CharBuffer`](crate::CharBuffer) exceeds
    /// its ceiling.
    #[error("{op}: requested length {requested} exceeds the maximum of {max}")]
    Length {
        /// Name of the operation that would have overflowed.
        op: &'static str,
        /// Bytes that were asked for.
        requested: usize,
        /// The ceiling in effect.
        max: usize,
    },
    /// The global allocator could not satisfy the request.
    #[error("allocator failed to provide {bytes} bytes")]
    OutOfMemory {
        /// Size of the rejected allocation.
        bytes: usize,
    },
    /// A [`Cursor`](crate::Cursor) was used after a mutation invalidated it.
    #[error("cursor was invalidated by a mutation of its sequence")]
    StaleCursor,
}

impl BufferError {
    pub(crate) fn out_of_range(op: &'static str, pos: usize, len: usize) -> Self {
        Self::OutOfRange { op, pos, len }
    }

    /// Re-labels a buffer ceiling violation as a length error for `op`.
    pub(crate) fn into_length(self, op: &'static str) -> Self {
        match self {
            Self::Allocation { requested, max } => Self::Length { op, requested, max },
            other => other,
        }
    }
}
