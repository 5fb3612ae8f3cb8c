//! [`CharBuffer`], a NUL-terminated byte buffer on the shared buffer engine.
//!
//! The buffer is a plain byte sequence; it does not interpret its contents as
//! UTF-8 or any other encoding. Whenever storage is allocated, the allocation
//! holds at least `len() + 1` bytes and the byte at index `len()` is `0`, so
//! [`CharBuffer::c_str`] never needs to reallocate. [`CharBuffer::capacity`]
//! reports the bytes usable for content, excluding that terminator slot.
//!
//! Position and count parameters accept [`NPOS`] to mean "to the end".
//! Counts are clamped to what is available; positions past the end are
//! rejected with [`BufferError::OutOfRange`].
//!
//! Every edit (insert, erase, append, replace, resize) is a single splice:
//! grow if needed, slide the tail with a memmove, then write the new bytes.
//! The `*_within` methods take their source from this same buffer and copy it
//! aside before the first write, so overlapping ranges are safe.
use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    ffi::CStr,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Deref, DerefMut},
    ptr,
};

use bstr::BStr;

use crate::{BackSequence, BufferError, BufferOptions, buffer::Buffer, infallible};

/// Sentinel for "until the end of the buffer".
pub const NPOS: usize = usize::MAX;

/// Bytes to be written into a gap opened by a splice.
#[derive(Clone, Copy)]
enum Patch<'a> {
    Bytes(&'a [u8]),
    Fill { count: usize, byte: u8 },
}

impl Patch<'_> {
    fn len(&self) -> usize {
        match self {
            Patch::Bytes(bytes) => bytes.len(),
            Patch::Fill { count, .. } => *count,
        }
    }

    /// # Safety
    ///
    /// `dst` must be valid for `self.len()` byte writes and must not overlap
    /// the source bytes.
    unsafe fn write_to(&self, dst: *mut u8) {
        // SAFETY: forwarded from the caller.
        unsafe {
            match self {
                Patch::Bytes(bytes) => ptr::copy_nonoverlapping(bytes.as_ptr(), dst, bytes.len()),
                Patch::Fill { count, byte } => ptr::write_bytes(dst, *byte, *count),
            }
        }
    }
}

/// A growable byte buffer that always keeps a NUL terminator slot.
///
/// # Examples
///
/// ```rust
/// use seqbuf::{CharBuffer, NPOS};
///
/// let mut s = CharBuffer::from("hello");
/// s.insert(5, b", world")?;
/// assert_eq!(s, "hello, world");
/// assert_eq!(s.substr(7, NPOS)?, "world");
///
/// s.replace_within(0, 5, 7, NPOS)?;
/// assert_eq!(s, "world, world");
/// # Ok::<(), seqbuf::BufferError>(())
/// ```
pub struct CharBuffer {
    buf: Buffer<u8>,
}

impl CharBuffer {
    /// Creates an empty buffer with [`BufferOptions::char_buffer`]. Does not
    /// allocate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BufferOptions::char_buffer())
    }

    /// Creates an empty buffer governed by `options`, whose `max_capacity` is
    /// the ceiling on usable bytes. Does not allocate.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            buf: Buffer::new(BufferOptions {
                max_capacity: options.max_capacity.saturating_add(1),
                ..options
            }),
        }
    }

    /// Creates an empty buffer with exactly `capacity` usable bytes.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::reserve`].
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut s = Self::new();
        s.reserve(capacity)?;
        Ok(s)
    }

    /// Creates a buffer of `count` copies of `byte`.
    ///
    /// # Errors
    ///
    /// [`BufferError::Length`] if `count` exceeds the ceiling.
    pub fn from_fill(count: usize, byte: u8) -> Result<Self, BufferError> {
        let mut s = Self::new();
        s.assign_fill(count, byte)?;
        Ok(s)
    }

    /// Creates a buffer holding a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// [`BufferError::Length`] if `bytes` is longer than the ceiling.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BufferError> {
        Self::from_bytes_with_options(bytes, BufferOptions::char_buffer())
    }

    /// Creates a buffer holding the bytes of `s`, without its terminator.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::from_bytes`].
    pub fn from_c_str(s: &CStr) -> Result<Self, BufferError> {
        Self::from_bytes(s.to_bytes())
    }

    /// Creates a buffer from `count` bytes of `other` starting at `pos`.
    ///
    /// `count` is clamped to `other.len() - pos`, so [`NPOS`] takes the whole
    /// tail and the source is never read past its length.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > other.len()`.
    pub fn from_substr(other: &CharBuffer, pos: usize, count: usize) -> Result<Self, BufferError> {
        other.substr(pos, count)
    }

    fn from_bytes_with_options(bytes: &[u8], options: BufferOptions) -> Result<Self, BufferError> {
        let mut s = Self::with_options(options);
        s.append(bytes)?;
        Ok(s)
    }

    /// The options this buffer grows by; `max_capacity` is in usable bytes.
    #[must_use]
    pub fn options(&self) -> BufferOptions {
        let options = self.buf.options();
        BufferOptions {
            max_capacity: options.max_capacity.saturating_sub(1),
            ..options
        }
    }

    /// Number of bytes, excluding the terminator.
    #[doc(alias = "size")]
    #[doc(alias = "length")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer holds no bytes.
    #[doc(alias = "empty")]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// Usable bytes in the current allocation, excluding the terminator slot.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity().saturating_sub(1)
    }

    /// Largest length this buffer may ever reach.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.buf.max_capacity().saturating_sub(1)
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] when `pos >= len()`.
    pub fn at(&self, pos: usize) -> Result<u8, BufferError> {
        let len = self.len();
        self.as_bytes()
            .get(pos)
            .copied()
            .ok_or(BufferError::out_of_range("at", pos, len))
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] when `pos >= len()`.
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut u8, BufferError> {
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
    /// `pos <= len()` with storage allocated (`pos == len()` reads the
    /// terminator). Anything else is undefined behavior.
    #[must_use]
    pub unsafe fn get_unchecked(&self, pos: usize) -> u8 {
        debug_assert!(pos < self.buf.capacity());
        // SAFETY: the caller guarantees `pos` addresses an initialized byte.
        unsafe { *self.buf.as_ptr().add(pos) }
    }

    /// The first byte.
    #[must_use]
    pub fn front(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }

    /// The last byte.
    #[must_use]
    pub fn back(&self) -> Option<u8> {
        self.as_bytes().last().copied()
    }

    /// The content bytes, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// The content bytes followed by the terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.buf.capacity() == 0 {
            return b"\0";
        }
        // SAFETY: the allocation holds `len + 1` initialized bytes whenever
        // it exists.
        unsafe { core::slice::from_raw_parts(self.buf.as_ptr(), self.len() + 1) }
    }

    /// The contents as a C string. Stops at the first interior NUL, if any.
    #[must_use]
    pub fn c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(self.as_bytes_with_nul()).unwrap_or_default()
    }

    /// Raw pointer to the first byte, or null when nothing is allocated.
    ///
    /// When non-null, the pointed-to bytes are NUL-terminated at `len()`.
    #[must_use]
    pub fn data(&self) -> *const u8 {
        self.buf.data()
    }

    /// Guarantees `capacity() >= new_capacity`, allocating exactly
    /// `new_capacity` usable bytes when growing. Never shrinks.
    ///
    /// # Errors
    ///
    /// [`BufferError::Length`] if `new_capacity` exceeds the ceiling,
    /// [`BufferError::OutOfMemory`] if the allocator fails.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), BufferError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.check_length(new_capacity, "reserve")?;
        self.buf
            .ensure_capacity(new_capacity + 1)
            .map_err(|err| err.into_length("reserve"))?;
        self.terminate();
        Ok(())
    }

    /// Reallocates so that `capacity() == len()`. An empty buffer releases
    /// its storage.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfMemory`] if the allocator fails.
    pub fn shrink_to_fit(&mut self) -> Result<(), BufferError> {
        if self.is_empty() {
            self.clear();
            return Ok(());
        }
        self.buf.shrink_to(self.len() + 1)?;
        self.terminate();
        Ok(())
    }

    /// Drops the contents and releases the storage. Afterwards
    /// [`CharBuffer::data`] is null.
    pub fn clear(&mut self) {
        self.buf.release();
    }

    /// Inserts `bytes` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `index > len()`,
    /// [`BufferError::Length`] if the result would exceed the ceiling.
    pub fn insert(&mut self, index: usize, bytes: &[u8]) -> Result<(), BufferError> {
        self.check_pos(index, "insert")?;
        self.splice(index, 0, Patch::Bytes(bytes), "insert")
    }

    /// Inserts `count` copies of `byte` at `index`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::insert`].
    pub fn insert_fill(&mut self, index: usize, count: usize, byte: u8) -> Result<(), BufferError> {
        self.check_pos(index, "insert")?;
        self.splice(index, 0, Patch::Fill { count, byte }, "insert")
    }

    /// Inserts a copy of this buffer's own `[pos, pos + count)` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `index` or `pos` is past the end,
    /// [`BufferError::Length`] if the result would exceed the ceiling.
    pub fn insert_within(&mut self, index: usize, pos: usize, count: usize) -> Result<(), BufferError> {
        self.check_pos(index, "insert")?;
        let source = self.snapshot(pos, count, "insert")?;
        self.splice(index, 0, Patch::Bytes(&source), "insert")
    }

    /// Removes up to `count` bytes starting at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `index > len()`.
    pub fn erase(&mut self, index: usize, count: usize) -> Result<(), BufferError> {
        self.check_pos(index, "erase")?;
        let count = self.clamp_count(index, count);
        self.splice(index, count, Patch::Bytes(&[]), "erase")
    }

    /// Appends one byte, doubling the capacity when full.
    ///
    /// # Errors
    ///
    /// [`BufferError::Length`] at the ceiling.
    pub fn push_back(&mut self, byte: u8) -> Result<(), BufferError> {
        let len = self.len();
        self.check_length(len + 1, "push_back")?;
        self.buf
            .grow_for_append(len + 2)
            .map_err(|err| err.into_length("push_back"))?;
        // SAFETY: there is room for the byte and the terminator after it.
        unsafe { self.buf.push_unchecked(byte) };
        self.terminate();
        Ok(())
    }

    /// Removes the last byte.
    ///
    /// Popping an empty buffer is a caller error: it fails a debug assertion,
    /// and returns `None` in release builds.
    pub fn pop_back(&mut self) -> Option<u8> {
        debug_assert!(!self.is_empty(), "pop_back on an empty CharBuffer");
        let byte = self.buf.pop()?;
        self.terminate();
        Some(byte)
    }

    /// Appends `bytes`.
    ///
    /// # Errors
    ///
    /// [`BufferError::Length`] if the result would exceed the ceiling.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.splice(self.len(), 0, Patch::Bytes(bytes), "append")
    }

    /// Appends `count` copies of `byte`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::append`].
    pub fn append_fill(&mut self, count: usize, byte: u8) -> Result<(), BufferError> {
        self.splice(self.len(), 0, Patch::Fill { count, byte }, "append")
    }

    /// Appends the bytes of `s`, without its terminator.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::append`].
    pub fn append_c_str(&mut self, s: &CStr) -> Result<(), BufferError> {
        self.append(s.to_bytes())
    }

    /// Appends the contents of `other`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::append`].
    pub fn append_buffer(&mut self, other: &CharBuffer) -> Result<(), BufferError> {
        self.append(other.as_bytes())
    }

    /// Appends up to `count` bytes of `other` starting at `pos`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > other.len()`, otherwise as for
    /// [`CharBuffer::append`].
    pub fn append_substr(&mut self, other: &CharBuffer, pos: usize, count: usize) -> Result<(), BufferError> {
        let bytes = other.sub_bytes(pos, count, "append")?;
        self.append(bytes)
    }

    /// Appends a copy of this buffer's own `[pos, pos + count)`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > len()`, otherwise as for
    /// [`CharBuffer::append`].
    pub fn append_within(&mut self, pos: usize, count: usize) -> Result<(), BufferError> {
        let source = self.snapshot(pos, count, "append")?;
        self.append(&source)
    }

    /// Replaces up to `count` bytes at `pos` with `bytes`. The remainder after
    /// the replaced range is preserved after the inserted bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > len()`,
    /// [`BufferError::Length`] if the result would exceed the ceiling.
    pub fn replace(&mut self, pos: usize, count: usize, bytes: &[u8]) -> Result<(), BufferError> {
        self.check_pos(pos, "replace")?;
        let count = self.clamp_count(pos, count);
        self.splice(pos, count, Patch::Bytes(bytes), "replace")
    }

    /// Replaces up to `count` bytes at `pos` with up to `count2` bytes of
    /// `other` starting at `pos2`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > len()` or
    /// `pos2 > other.len()`, otherwise as for [`CharBuffer::replace`].
    pub fn replace_substr(
        &mut self,
        pos: usize,
        count: usize,
        other: &CharBuffer,
        pos2: usize,
        count2: usize,
    ) -> Result<(), BufferError> {
        self.check_pos(pos, "replace")?;
        let bytes = other.sub_bytes(pos2, count2, "replace")?;
        let count = self.clamp_count(pos, count);
        self.splice(pos, count, Patch::Bytes(bytes), "replace")
    }

    /// Replaces up to `count` bytes at `pos` with `count2` copies of `byte`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::replace`].
    pub fn replace_fill(&mut self, pos: usize, count: usize, count2: usize, byte: u8) -> Result<(), BufferError> {
        self.check_pos(pos, "replace")?;
        let count = self.clamp_count(pos, count);
        self.splice(pos, count, Patch::Fill { count: count2, byte }, "replace")
    }

    /// Replaces up to `count` bytes at `pos` with a copy of this buffer's own
    /// `[pos2, pos2 + count2)`, as it was before the call.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos` or `pos2` is past the end,
    /// otherwise as for [`CharBuffer::replace`].
    pub fn replace_within(&mut self, pos: usize, count: usize, pos2: usize, count2: usize) -> Result<(), BufferError> {
        self.check_pos(pos, "replace")?;
        let source = self.snapshot(pos2, count2, "replace")?;
        let count = self.clamp_count(pos, count);
        self.splice(pos, count, Patch::Bytes(&source), "replace")
    }

    /// A new, independently owned buffer holding up to `count` bytes starting
    /// at `pos`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > len()`.
    pub fn substr(&self, pos: usize, count: usize) -> Result<CharBuffer, BufferError> {
        let bytes = self.sub_bytes(pos, count, "substr")?;
        Self::from_bytes_with_options(bytes, self.options())
    }

    /// Copies up to `count` bytes starting at `pos` into `dest` and returns
    /// how many were written. No terminator is written.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > len()`.
    pub fn copy_to(&self, dest: &mut [u8], count: usize, pos: usize) -> Result<usize, BufferError> {
        let bytes = self.sub_bytes(pos, count, "copy")?;
        let written = bytes.len().min(dest.len());
        dest[..written].copy_from_slice(&bytes[..written]);
        Ok(written)
    }

    /// Resizes to exactly `count` bytes, filling new bytes with `byte`.
    ///
    /// # Errors
    ///
    /// [`BufferError::Length`] if `count` exceeds the ceiling.
    pub fn resize(&mut self, count: usize, byte: u8) -> Result<(), BufferError> {
        let len = self.len();
        if count <= len {
            return self.splice(count, len - count, Patch::Bytes(&[]), "resize");
        }
        self.splice(len, 0, Patch::Fill { count: count - len, byte }, "resize")
    }

    /// Resizes to exactly `count` bytes, filling new bytes with NUL.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::resize`].
    pub fn resize_default(&mut self, count: usize) -> Result<(), BufferError> {
        self.resize(count, 0)
    }

    /// Replaces the contents with a copy of `other`.
    ///
    /// # Errors
    ///
    /// [`BufferError::Length`] if `other` is longer than this buffer's
    /// ceiling.
    pub fn assign(&mut self, other: &CharBuffer) -> Result<(), BufferError> {
        self.assign_bytes(other.as_bytes())
    }

    /// Replaces the contents with up to `count` bytes of `other` at `pos`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > other.len()`, otherwise as for
    /// [`CharBuffer::assign`].
    pub fn assign_substr(&mut self, other: &CharBuffer, pos: usize, count: usize) -> Result<(), BufferError> {
        let bytes = other.sub_bytes(pos, count, "assign")?;
        self.assign_bytes(bytes)
    }

    /// Replaces the contents with a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::assign`].
    pub fn assign_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.splice(0, self.len(), Patch::Bytes(bytes), "assign")
    }

    /// Replaces the contents with the bytes of `s`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::assign`].
    pub fn assign_c_str(&mut self, s: &CStr) -> Result<(), BufferError> {
        self.assign_bytes(s.to_bytes())
    }

    /// Replaces the contents with `count` copies of `byte`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::assign`].
    pub fn assign_fill(&mut self, count: usize, byte: u8) -> Result<(), BufferError> {
        self.splice(0, self.len(), Patch::Fill { count, byte }, "assign")
    }

    /// Replaces the contents with the single byte `byte`.
    ///
    /// # Errors
    ///
    /// As for [`CharBuffer::assign`].
    pub fn assign_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        self.assign_fill(1, byte)
    }

    /// Exchanges the contents of two buffers in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Moves the contents out, leaving this buffer empty with no storage.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self { buf: self.buf.take() }
    }

    /// Panics unless the terminator invariant holds.
    #[cfg(any(test, feature = "fuzzing"))]
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let allocated = self.buf.capacity();
        if allocated == 0 {
            assert_eq!(self.len(), 0, "bytes without storage");
            assert!(self.data().is_null());
            return;
        }
        assert!(allocated > self.len(), "no room for the terminator");
        assert!(self.capacity() <= self.max_capacity(), "capacity above the ceiling");
        assert_eq!(self.as_bytes_with_nul().last(), Some(&0), "missing terminator");
    }

    fn check_pos(&self, pos: usize, op: &'static str) -> Result<(), BufferError> {
        let len = self.len();
        if pos > len {
            return Err(BufferError::out_of_range(op, pos, len));
        }
        Ok(())
    }

    fn check_length(&self, requested: usize, op: &'static str) -> Result<(), BufferError> {
        let max = self.max_capacity();
        if requested > max {
            return Err(BufferError::Length { op, requested, max });
        }
        Ok(())
    }

    /// `count` clamped to the bytes available from `pos`. `pos` must be valid.
    fn clamp_count(&self, pos: usize, count: usize) -> usize {
        count.min(self.len() - pos)
    }

    fn sub_bytes(&self, pos: usize, count: usize, op: &'static str) -> Result<&[u8], BufferError> {
        self.check_pos(pos, op)?;
        let count = self.clamp_count(pos, count);
        Ok(&self.as_bytes()[pos..pos + count])
    }

    /// Copies a range of this buffer aside so it can be written back into
    /// the same buffer.
    fn snapshot(&self, pos: usize, count: usize, op: &'static str) -> Result<Vec<u8>, BufferError> {
        Ok(self.sub_bytes(pos, count, op)?.to_vec())
    }

    /// Writes the terminator at `len` when storage exists.
    fn terminate(&mut self) {
        let len = self.buf.len();
        if self.buf.capacity() > len {
            // SAFETY: `len < capacity`.
            unsafe { self.buf.as_mut_ptr().add(len).write(0) };
        }
    }

    /// Removes `remove` bytes at `pos` and writes `patch` in their place.
    ///
    /// `pos + remove <= len()` must already hold. All checks happen before
    /// the first write.
    fn splice(&mut self, pos: usize, remove: usize, patch: Patch<'_>, op: &'static str) -> Result<(), BufferError> {
        let len = self.len();
        debug_assert!(pos + remove <= len);
        let insert = patch.len();
        if remove == 0 && insert == 0 {
            return Ok(());
        }
        let new_len = (len - remove)
            .checked_add(insert)
            .ok_or(BufferError::Length {
                op,
                requested: usize::MAX,
                max: self.max_capacity(),
            })?;
        self.check_length(new_len, op)?;
        if new_len + 1 > self.buf.capacity() {
            self.buf
                .grow_for_bulk(new_len + 1 - len)
                .map_err(|err| err.into_length(op))?;
        }
        let tail = pos + remove;
        // SAFETY: the allocation holds at least `new_len + 1` bytes. Bytes
        // need no drop, so the shifted-over slots only have to be rewritten
        // before the length covers them, which the patch write does.
        unsafe {
            if insert > remove {
                self.buf.shift_right(tail, insert - remove);
            } else if insert < remove {
                self.buf.shift_left(tail, remove - insert);
            }
            patch.write_to(self.buf.as_mut_ptr().add(pos));
            self.buf.set_len(new_len);
        }
        self.terminate();
        Ok(())
    }
}

/// Exchanges the contents of two buffers in O(1).
pub fn swap(a: &mut CharBuffer, b: &mut CharBuffer) {
    a.swap(b);
}

impl Default for CharBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CharBuffer {
    /// Deep copy with capacity equal to the source's length.
    ///
    /// # Panics
    ///
    /// If the allocator fails.
    fn clone(&self) -> Self {
        infallible(Self::from_bytes_with_options(self.as_bytes(), self.options()))
    }

    /// Copy-assigns, taking the source's options and reusing the existing
    /// allocation when it fits under the source's ceiling.
    ///
    /// # Panics
    ///
    /// If the allocator fails.
    fn clone_from(&mut self, source: &Self) {
        if !self.buf.adopt_options(source.buf.options()) {
            *self = source.clone();
            return;
        }
        infallible(self.assign(source));
    }
}

impl Deref for CharBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl DerefMut for CharBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut_slice()
    }
}

impl fmt::Debug for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(BStr::new(self.as_bytes()), f)
    }
}

/// Writes the NUL-terminated view: bytes up to the first NUL, with invalid
/// UTF-8 shown as replacement characters.
impl fmt::Display for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.c_str().to_bytes()), f)
    }
}

impl PartialEq for CharBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CharBuffer {}

impl PartialEq<[u8]> for CharBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for CharBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for CharBuffer {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for CharBuffer {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl PartialEq<str> for CharBuffer {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for CharBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<CStr> for CharBuffer {
    fn eq(&self, other: &CStr) -> bool {
        self.as_bytes() == other.to_bytes()
    }
}

impl PartialOrd for CharBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic byte order; a strict prefix orders first.
impl Ord for CharBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for CharBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

/// # Panics
///
/// `+=` panics if the result would exceed the ceiling; use the `append`
/// methods to handle that case.
impl AddAssign<&CharBuffer> for CharBuffer {
    fn add_assign(&mut self, rhs: &CharBuffer) {
        infallible(self.append_buffer(rhs));
    }
}

impl AddAssign<&[u8]> for CharBuffer {
    fn add_assign(&mut self, rhs: &[u8]) {
        infallible(self.append(rhs));
    }
}

impl AddAssign<&str> for CharBuffer {
    fn add_assign(&mut self, rhs: &str) {
        infallible(self.append(rhs.as_bytes()));
    }
}

impl AddAssign<u8> for CharBuffer {
    fn add_assign(&mut self, rhs: u8) {
        infallible(self.push_back(rhs));
    }
}

impl Add<&CharBuffer> for CharBuffer {
    type Output = CharBuffer;

    fn add(mut self, rhs: &CharBuffer) -> CharBuffer {
        self += rhs;
        self
    }
}

impl Add<&str> for CharBuffer {
    type Output = CharBuffer;

    fn add(mut self, rhs: &str) -> CharBuffer {
        self += rhs;
        self
    }
}

impl Add<u8> for CharBuffer {
    type Output = CharBuffer;

    fn add(mut self, rhs: u8) -> CharBuffer {
        self += rhs;
        self
    }
}

/// # Panics
///
/// Conversions panic if the input is longer than
/// [`BufferOptions::CHAR_BUFFER_MAX`]; use [`CharBuffer::from_bytes`] to
/// handle that case.
impl From<&str> for CharBuffer {
    fn from(s: &str) -> Self {
        infallible(Self::from_bytes(s.as_bytes()))
    }
}

impl From<&[u8]> for CharBuffer {
    fn from(bytes: &[u8]) -> Self {
        infallible(Self::from_bytes(bytes))
    }
}

impl From<&CStr> for CharBuffer {
    fn from(s: &CStr) -> Self {
        infallible(Self::from_c_str(s))
    }
}

impl Extend<u8> for CharBuffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            infallible(self.push_back(byte));
        }
    }
}

impl<'a> Extend<&'a u8> for CharBuffer {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<u8> for CharBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl BackSequence for CharBuffer {
    type Item = u8;

    fn push_back(&mut self, value: u8) -> Result<(), BufferError> {
        CharBuffer::push_back(self, value)
    }

    fn pop_back(&mut self) -> Option<u8> {
        CharBuffer::pop_back(self)
    }

    fn front(&self) -> Option<&u8> {
        self.as_bytes().first()
    }

    fn back(&self) -> Option<&u8> {
        self.as_bytes().last()
    }

    fn len(&self) -> usize {
        CharBuffer::len(self)
    }
}
