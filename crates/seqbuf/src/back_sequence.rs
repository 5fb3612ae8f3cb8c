use crate::BufferError;

/// The end-of-sequence operations a stack or queue adapter needs from its
/// underlying container.
///
/// Implemented by [`Sequence`](crate::Sequence) and
/// [`CharBuffer`](crate::CharBuffer), so an adapter can be written once
/// against either.
///
/// ```rust
/// use seqbuf::{BackSequence, BufferError, CharBuffer, Sequence};
///
/// fn push_all<S: BackSequence>(target: &mut S, items: impl IntoIterator<Item = S::Item>)
///     -> Result<(), BufferError>
/// {
///     for item in items {
///         target.push_back(item)?;
///     }
///     Ok(())
/// }
///
/// let mut seq = Sequence::new();
/// push_all(&mut seq, [1, 2, 3])?;
/// assert_eq!(BackSequence::back(&seq), Some(&3));
///
/// let mut text = CharBuffer::new();
/// push_all(&mut text, *b"abc")?;
/// assert_eq!(text, "abc");
/// # Ok::<(), BufferError>(())
/// ```
pub trait BackSequence {
    /// Element type.
    type Item;

    /// Appends an element at the back.
    ///
    /// # Errors
    ///
    /// When the container cannot grow.
    fn push_back(&mut self, value: Self::Item) -> Result<(), BufferError>;

    /// Removes the element at the back. Calling this on an empty container
    /// is a caller error.
    fn pop_back(&mut self) -> Option<Self::Item>;

    /// The element at the front.
    fn front(&self) -> Option<&Self::Item>;

    /// The element at the back.
    fn back(&self) -> Option<&Self::Item>;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
