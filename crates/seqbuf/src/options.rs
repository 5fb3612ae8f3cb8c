/// How the buffer grows when a bulk operation (insert, append, replace,
/// resize) needs more room than it has.
///
/// Single-element appends always double; this only governs the bulk path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BulkGrowth {
    /// Grow to exactly `len + extra` slots.
    ///
    /// Cheapest in memory, but interleaved bulk operations reallocate every
    /// time.
    #[default]
    Exact,
    /// Grow to `max(len + extra, 2 * capacity)`, keeping bulk appends
    /// amortized O(1) like single-element pushes.
    Double,
}

/// Growth and ceiling configuration shared by every container in the crate.
///
/// # Examples
///
/// ```rust
/// use seqbuf::{BufferOptions, BulkGrowth, Sequence};
///
/// let options = BufferOptions {
///     max_capacity: 1024,
///     bulk_growth: BulkGrowth::Double,
/// };
/// let mut seq: Sequence<u32> = Sequence::with_options(options);
/// assert!(seq.reserve(2048).is_err());
/// ```
///
/// # Default
///
/// No practical ceiling and [`BulkGrowth::Exact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferOptions {
    /// Largest slot count the buffer may ever allocate.
    ///
    /// Requests above this fail instead of allocating. The effective ceiling
    /// is additionally bounded by `isize::MAX` bytes for the element type.
    ///
    /// # Default
    ///
    /// `usize::MAX`
    pub max_capacity: usize,

    /// Policy applied when a bulk operation outgrows the current capacity.
    ///
    /// # Default
    ///
    /// [`BulkGrowth::Exact`]
    pub bulk_growth: BulkGrowth,
}

impl BufferOptions {
    /// Largest usable capacity of a [`CharBuffer`](crate::CharBuffer) under
    /// [`BufferOptions::char_buffer`].
    pub const CHAR_BUFFER_MAX: usize = 65_535;

    /// Options used by [`CharBuffer::new`](crate::CharBuffer::new): a usable
    /// ceiling of [`Self::CHAR_BUFFER_MAX`] bytes and exact bulk growth.
    #[must_use]
    pub const fn char_buffer() -> Self {
        Self {
            max_capacity: Self::CHAR_BUFFER_MAX,
            bulk_growth: BulkGrowth::Exact,
        }
    }
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            max_capacity: usize::MAX,
            bulk_growth: BulkGrowth::Exact,
        }
    }
}
