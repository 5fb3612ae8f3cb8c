//! [`Sequence<T>`], the growable contiguous container.
//!
//! A `Sequence` owns a single buffer and layers value semantics on top of it:
//! every occupied slot is a live `T` that is constructed once (by a push,
//! insert, resize or clone) and dropped once (by a pop, erase, truncation,
//! clear, or when the sequence itself is dropped). Growth relocates values
//! bitwise and never clones them.
//!
//! # Access tiers
//!
//! [`Sequence::at`] is bounds-checked and reports [`BufferError::OutOfRange`].
//! [`Sequence::get_unchecked`] is the unchecked tier: it is `unsafe` and its
//! precondition is documented rather than checked. `seq[i]` goes through
//! slice indexing and panics when out of range.
//!
//! # Iterators
//!
//! Borrowing iterators ([`Sequence::iter`], `for x in &seq`) hold a borrow, so
//! the compiler rejects any mutation while they are alive. [`Cursor`]s are the
//! detached alternative: they can be kept across mutations and are validated
//! on use (see [`crate::cursor`]).
//!
//! # Threading
//!
//! A `Sequence` is a single-owner structure. Mutation requires `&mut self`;
//! sharing one between threads needs external synchronization, exactly as for
//! any owned collection.
use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    mem,
    ops::{Deref, DerefMut},
    ptr, slice,
};

use crate::{
    BackSequence, BufferError, BufferOptions, Cursor, buffer::Buffer, cursor::Ledger, infallible,
};

/// A growable, contiguously stored sequence of `T`.
///
/// # Examples
///
/// ```rust
/// use seqbuf::Sequence;
///
/// let mut seq = Sequence::new();
/// for value in [3, 5, 6, 7, 1] {
///     seq.push_back(value)?;
/// }
/// assert_eq!(seq, [3, 5, 6, 7, 1]);
///
/// seq.resize(4, 0)?;
/// assert_eq!(seq, [3, 5, 6, 7]);
/// assert!(seq.at(4).is_err());
/// # Ok::<(), seqbuf::BufferError>(())
/// ```
pub struct Sequence<T> {
    buf: Buffer<T>,
    ledger: Ledger,
}

impl<T> Sequence<T> {
    /// Creates an empty sequence with default [`BufferOptions`]. Does not
    /// allocate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    /// Creates an empty sequence governed by `options`. Does not allocate.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            buf: Buffer::new(options),
            ledger: Ledger::new(),
        }
    }

    /// Creates an empty sequence with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// [`BufferError::Allocation`] if `capacity` exceeds the ceiling, or
    /// [`BufferError::OutOfMemory`] if the allocator fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut seq = Self::new();
        seq.reserve(capacity)?;
        Ok(seq)
    }

    /// The options this sequence grows by.
    #[must_use]
    pub fn options(&self) -> BufferOptions {
        self.buf.options()
    }

    /// Number of live elements.
    #[doc(alias = "size")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the sequence holds no elements.
    #[doc(alias = "empty")]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// Number of elements the current allocation can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Largest capacity this sequence may ever reach.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.buf.max_capacity()
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] when `pos >= len()`.
    pub fn at(&self, pos: usize) -> Result<&T, BufferError> {
        let len = self.len();
        self.buf
            .as_slice()
            .get(pos)
            .ok_or(BufferError::out_of_range("at", pos, len))
    }

    /// Bounds-checked mutable access. Writing through the reference does not
    /// invalidate any cursor.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] when `pos >= len()`.
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T, BufferError> {
        let len = self.len();
        self.buf
            .as_mut_slice()
            .get_mut(pos)
            .ok_or(BufferError::out_of_range("at_mut", pos, len))
    }

    /// Unchecked access.
    ///
    /// # Safety
    ///
    /// `pos < len()`. Anything else is undefined behavior.
    #[must_use]
    pub unsafe fn get_unchecked(&self, pos: usize) -> &T {
        debug_assert!(pos < self.len());
        // SAFETY: the caller guarantees `pos` addresses a live slot.
        unsafe { &*self.buf.as_ptr().add(pos) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// `pos < len()`. Anything else is undefined behavior.
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, pos: usize) -> &mut T {
        debug_assert!(pos < self.len());
        // SAFETY: the caller guarantees `pos` addresses a live slot.
        unsafe { &mut *self.buf.as_mut_ptr().add(pos) }
    }

    /// The first element.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.buf.as_slice().first()
    }

    /// The first element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.buf.as_mut_slice().first_mut()
    }

    /// The last element.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.buf.as_slice().last()
    }

    /// The last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.buf.as_mut_slice().last_mut()
    }

    /// Raw pointer to the first slot, or null when nothing is allocated.
    ///
    /// The pointer is invalidated by any operation that reallocates or
    /// releases the storage, including [`Sequence::clear`].
    #[must_use]
    pub fn data(&self) -> *const T {
        self.buf.data()
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    /// Guarantees `capacity() >= new_capacity`. Never shrinks.
    ///
    /// # Errors
    ///
    /// [`BufferError::Allocation`] above the ceiling,
    /// [`BufferError::OutOfMemory`] if the allocator fails. The sequence is
    /// unchanged on error.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), BufferError> {
        if self.buf.ensure_capacity(new_capacity)? {
            self.ledger.renew();
        }
        Ok(())
    }

    /// Reallocates so that `capacity() == len()`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfMemory`] if the allocator fails.
    pub fn shrink_to_fit(&mut self) -> Result<(), BufferError> {
        if self.buf.capacity() == self.buf.len() {
            return Ok(());
        }
        if self.buf.len() == 0 {
            self.clear();
            return Ok(());
        }
        if self.buf.shrink_to(0)? {
            self.ledger.renew();
        }
        Ok(())
    }

    /// Drops every element and releases the storage.
    ///
    /// Afterwards `len() == 0`, `capacity() == 0`, [`Sequence::data`] is null
    /// and every outstanding cursor is stale.
    pub fn clear(&mut self) {
        self.buf.release();
        self.ledger.renew();
    }

    /// Appends `value`, doubling the capacity when the sequence is full.
    ///
    /// # Errors
    ///
    /// [`BufferError::Allocation`] if the sequence is already at its
    /// ceiling, [`BufferError::OutOfMemory`] if the allocator fails. `value`
    /// is dropped on error and the sequence is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<(), BufferError> {
        let len = self.buf.len();
        let grew = self.buf.grow_for_append(len + 1)?;
        self.ledger.record(grew, len);
        // SAFETY: `grow_for_append` made room for one more element.
        unsafe { self.buf.push_unchecked(value) };
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// Popping an empty sequence is a caller error: it fails a debug
    /// assertion, and returns `None` in release builds.
    pub fn pop_back(&mut self) -> Option<T> {
        debug_assert!(!self.is_empty(), "pop_back on an empty Sequence");
        let value = self.buf.pop()?;
        self.ledger.edit(self.buf.len());
        Some(value)
    }

    /// Resizes to exactly `count` elements, filling new slots with values
    /// produced by `fill`.
    ///
    /// # Errors
    ///
    /// Capacity errors as for [`Sequence::reserve`]; the sequence is
    /// unchanged on error.
    pub fn resize_with<F>(&mut self, count: usize, mut fill: F) -> Result<(), BufferError>
    where
        F: FnMut() -> T,
    {
        let len = self.buf.len();
        match count.cmp(&len) {
            Ordering::Less => {
                self.buf.truncate(count);
                self.ledger.edit(count);
            }
            Ordering::Equal => {}
            Ordering::Greater => {
                let grew = self.buf.grow_for_bulk(count - len)?;
                self.ledger.record(grew, len);
                for _ in len..count {
                    // SAFETY: `grow_for_bulk` made room for `count` elements.
                    unsafe { self.buf.push_unchecked(fill()) };
                }
            }
        }
        Ok(())
    }

    /// Inserts `value` at `index`, shifting the tail right by one.
    ///
    /// When the insert reallocates, every outstanding [`Cursor`] becomes
    /// stale. When it fits in the current capacity, cursors before `index`
    /// are still accepted by [`Sequence::at_cursor`]; only cursors at or past
    /// `index` are rejected. Code that needs portable iterator semantics
    /// should treat all cursors as invalidated by any insert.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `index > len()`; capacity errors as for
    /// [`Sequence::push_back`].
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), BufferError> {
        let len = self.buf.len();
        if index > len {
            return Err(BufferError::out_of_range("insert", index, len));
        }
        let grew = self.buf.grow_for_append(len + 1)?;
        self.ledger.record(grew, index);
        // SAFETY: there is room for one more slot; the opened gap is written
        // before the length covers it again.
        unsafe {
            self.buf.shift_right(index, 1);
            self.buf.as_mut_ptr().add(index).write(value);
            self.buf.set_len(len + 1);
        }
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> Result<T, BufferError> {
        let len = self.buf.len();
        if index >= len {
            return Err(BufferError::out_of_range("erase", index, len));
        }
        self.ledger.edit(index);
        // SAFETY: `index` is live; it is moved out and then overwritten by the
        // shifted tail, and the length drops by one.
        unsafe {
            let value = self.buf.as_ptr().add(index).read();
            self.buf.shift_left(index + 1, 1);
            self.buf.set_len(len - 1);
            Ok(value)
        }
    }

    /// Drops the elements in `[start, end)`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] unless `start <= end <= len()`.
    pub fn erase_range(&mut self, start: usize, end: usize) -> Result<(), BufferError> {
        let len = self.buf.len();
        if end > len {
            return Err(BufferError::out_of_range("erase_range", end, len));
        }
        if start > end {
            return Err(BufferError::out_of_range("erase_range", start, end));
        }
        if start == end {
            return Ok(());
        }
        self.ledger.edit(start);
        let count = end - start;
        // SAFETY: the length is lowered to `start` while the doomed range is
        // dropped, so a panicking destructor only leaks the tail. The range is
        // then closed with a shift and the length set to its final value.
        unsafe {
            self.buf.set_len(start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr().add(start),
                count,
            ));
            self.buf.set_len(len);
            self.buf.shift_left(end, count);
            self.buf.set_len(len - count);
        }
        Ok(())
    }

    /// Exchanges the contents of two sequences in O(1). Cursors follow the
    /// storage they were issued against.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the contents out, leaving this sequence empty (no storage, null
    /// [`Sequence::data`]) with the same options.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            buf: self.buf.take(),
            ledger: mem::replace(&mut self.ledger, Ledger::new()),
        }
    }

    /// Cursor at the first element.
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.ledger.issue(0)
    }

    /// Cursor one past the last element.
    #[must_use]
    pub fn end(&self) -> Cursor {
        self.ledger.issue(self.len())
    }

    /// Dereferences a cursor.
    ///
    /// # Errors
    ///
    /// [`BufferError::StaleCursor`] if a mutation invalidated `cursor`,
    /// [`BufferError::OutOfRange`] if it points at or past the end.
    pub fn at_cursor(&self, cursor: Cursor) -> Result<&T, BufferError> {
        let index = self.ledger.check(cursor)?;
        self.at(index)
    }

    /// Dereferences a cursor mutably.
    ///
    /// # Errors
    ///
    /// As for [`Sequence::at_cursor`].
    pub fn at_cursor_mut(&mut self, cursor: Cursor) -> Result<&mut T, BufferError> {
        let index = self.ledger.check(cursor)?;
        self.at_mut(index)
    }

    /// The elements between two valid cursors.
    ///
    /// # Errors
    ///
    /// [`BufferError::StaleCursor`] for an invalidated cursor,
    /// [`BufferError::OutOfRange`] unless `first <= last <= len()`.
    pub fn range(&self, first: Cursor, last: Cursor) -> Result<&[T], BufferError> {
        let start = self.ledger.check(first)?;
        let end = self.ledger.check(last)?;
        let len = self.len();
        if end > len {
            return Err(BufferError::out_of_range("range", end, len));
        }
        if start > end {
            return Err(BufferError::out_of_range("range", start, end));
        }
        Ok(&self.as_slice()[start..end])
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates over the elements mutably.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Reserves room for `additional` elements by the bulk policy.
    fn grow_by(&mut self, additional: usize, at: usize) -> Result<(), BufferError> {
        let grew = self.buf.grow_for_bulk(additional)?;
        self.ledger.record(grew, at);
        Ok(())
    }
}

impl<T: Clone> Sequence<T> {
    /// Creates a sequence of `count` clones of `value`, with capacity exactly
    /// `count`.
    ///
    /// # Errors
    ///
    /// Capacity errors as for [`Sequence::reserve`].
    pub fn from_elem(count: usize, value: T) -> Result<Self, BufferError> {
        let mut seq = Self::new();
        seq.reserve(count)?;
        seq.buf.fill_within_capacity(count, &value);
        Ok(seq)
    }

    /// Creates a sequence holding clones of `items`, with capacity exactly
    /// `items.len()`.
    ///
    /// # Errors
    ///
    /// Capacity errors as for [`Sequence::reserve`].
    pub fn from_slice(items: &[T]) -> Result<Self, BufferError> {
        Self::from_slice_with_options(items, BufferOptions::default())
    }

    fn from_slice_with_options(items: &[T], options: BufferOptions) -> Result<Self, BufferError> {
        let mut seq = Self::with_options(options);
        seq.reserve(items.len())?;
        seq.buf.extend_cloned_within_capacity(items);
        Ok(seq)
    }

    /// Creates a sequence from the elements of `other` between two cursors.
    ///
    /// # Errors
    ///
    /// As for [`Sequence::range`], plus capacity errors.
    pub fn from_cursors(other: &Self, first: Cursor, last: Cursor) -> Result<Self, BufferError> {
        Self::from_slice_with_options(other.range(first, last)?, other.options())
    }

    /// Resizes to exactly `count` elements, cloning `value` into new slots.
    ///
    /// # Errors
    ///
    /// As for [`Sequence::resize_with`].
    pub fn resize(&mut self, count: usize, value: T) -> Result<(), BufferError> {
        self.resize_with(count, || value.clone())
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `index > len()`; capacity errors as for
    /// [`Sequence::reserve`].
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<(), BufferError> {
        self.insert_with(index, count, "insert_n", |_| value.clone())
    }

    /// Inserts clones of `items` at `index`.
    ///
    /// # Errors
    ///
    /// As for [`Sequence::insert_n`].
    pub fn insert_slice(&mut self, index: usize, items: &[T]) -> Result<(), BufferError> {
        self.insert_with(index, items.len(), "insert_slice", |i| items[i].clone())
    }

    /// Opens a gap of `count` slots at `index` and fills it with `make(i)`.
    fn insert_with<F>(
        &mut self,
        index: usize,
        count: usize,
        op: &'static str,
        mut make: F,
    ) -> Result<(), BufferError>
    where
        F: FnMut(usize) -> T,
    {
        let len = self.buf.len();
        if index > len {
            return Err(BufferError::out_of_range(op, index, len));
        }
        if count == 0 {
            return Ok(());
        }
        self.grow_by(count, index)?;
        // SAFETY: room for `len + count` was reserved. While the gap is being
        // filled the length stays at `index`, so a panicking `make` leaks the
        // shifted tail instead of exposing the gap.
        unsafe {
            self.buf.shift_right(index, count);
            self.buf.set_len(index);
            let gap = self.buf.as_mut_ptr().add(index);
            for i in 0..count {
                gap.add(i).write(make(i));
            }
            self.buf.set_len(len + count);
        }
        Ok(())
    }
}

impl<T: Default> Sequence<T> {
    /// Resizes to exactly `count` elements, default-constructing new slots.
    ///
    /// # Errors
    ///
    /// As for [`Sequence::resize_with`].
    pub fn resize_default(&mut self, count: usize) -> Result<(), BufferError> {
        self.resize_with(count, T::default)
    }
}

/// Exchanges the contents of two sequences in O(1).
pub fn swap<T>(a: &mut Sequence<T>, b: &mut Sequence<T>) {
    a.swap(b);
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Sequence<T> {
    /// Deep copy with capacity equal to the source's length.
    ///
    /// # Panics
    ///
    /// If the allocator fails.
    fn clone(&self) -> Self {
        infallible(Self::from_slice_with_options(self.as_slice(), self.options()))
    }

    /// Copy-assigns, taking the source's options and reusing the existing
    /// allocation when it is large enough and fits under the source's
    /// ceiling.
    fn clone_from(&mut self, source: &Self) {
        if !self.buf.adopt_options(source.options()) {
            *self = source.clone();
            return;
        }
        let shared = self.len().min(source.len());
        self.buf.truncate(shared);
        self.buf.as_mut_slice().clone_from_slice(&source.as_slice()[..shared]);
        let rest = &source.as_slice()[shared..];
        let grew = infallible(self.buf.grow_for_bulk(rest.len()));
        self.ledger.record(grew, 0);
        self.buf.extend_cloned_within_capacity(rest);
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Sequence<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: PartialEq> PartialEq<[T]> for Sequence<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for Sequence<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Sequence<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Sequence<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for Sequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Sequence<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Extend<T> for Sequence<T> {
    /// # Panics
    ///
    /// If the sequence reaches its ceiling or the allocator fails.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        infallible(self.grow_by(lower, self.len()));
        for value in iter {
            infallible(self.push_back(value));
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    /// # Panics
    ///
    /// If the allocator fails.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for Sequence<T> {
    fn from(items: &[T]) -> Self {
        infallible(Self::from_slice(items))
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            buf: self.buf.take(),
            front: 0,
        }
    }
}

/// Owning iterator over the elements of a [`Sequence`].
pub struct IntoIter<T> {
    buf: Buffer<T>,
    front: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.buf.len() {
            return None;
        }
        // SAFETY: `front < len`, and each slot is read at most once because
        // `front` only moves forward.
        let value = unsafe { self.buf.as_ptr().add(self.front).read() };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len() - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.buf.len() {
            return None;
        }
        self.buf.pop()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let len = self.buf.len();
        // SAFETY: `[0, front)` were moved out already; only `[front, len)` is
        // still live. The length is cleared first so the buffer frees the
        // block without touching any slot.
        unsafe {
            self.buf.set_len(0);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr().add(self.front),
                len - self.front,
            ));
        }
    }
}

impl<T> BackSequence for Sequence<T> {
    type Item = T;

    fn push_back(&mut self, value: T) -> Result<(), BufferError> {
        Sequence::push_back(self, value)
    }

    fn pop_back(&mut self) -> Option<T> {
        Sequence::pop_back(self)
    }

    fn front(&self) -> Option<&T> {
        Sequence::front(self)
    }

    fn back(&self) -> Option<&T> {
        Sequence::back(self)
    }

    fn len(&self) -> usize {
        Sequence::len(self)
    }
}
