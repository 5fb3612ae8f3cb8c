//! The raw contiguous storage shared by [`Sequence`](crate::Sequence) and
//! [`CharBuffer`](crate::CharBuffer).
//!
//! A [`Buffer`] owns exactly one allocation, a logical length and a capacity.
//! Slots `[0, len)` hold live values and slots `[len, cap)` are uninitialized.
//! The buffer knows how to grow (doubling for single appends, policy-driven
//! for bulk requests), how to slide its live tail left or right with memmove
//! semantics, and how to release everything it owns exactly once.
//!
//! Growth never clones: live values are relocated bitwise into the new
//! allocation and the old allocation is freed in the same step, so each value
//! is constructed once and dropped once.
use alloc::alloc::{Layout, alloc, dealloc};
use core::{
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
    slice,
};

use crate::{BufferError, BufferOptions, BulkGrowth};

const TRACE_TARGET: &str = "seqbuf::buffer";

pub(crate) struct Buffer<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    options: BufferOptions,
    _owns: PhantomData<T>,
}

// SAFETY: `Buffer<T>` uniquely owns its `T`s, exactly like `Vec<T>`.
unsafe impl<T: Send> Send for Buffer<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> Buffer<T> {
    pub(crate) const fn new(options: BufferOptions) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            options,
            _owns: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn options(&self) -> BufferOptions {
        self.options
    }

    /// Adopts `options` when the current allocation fits under their ceiling.
    /// Returns whether they were adopted.
    pub(crate) fn adopt_options(&mut self, options: BufferOptions) -> bool {
        if self.cap > options.max_capacity {
            return false;
        }
        self.options = options;
        true
    }

    /// The effective slot ceiling: the configured maximum, bounded by what a
    /// single allocation of `T` can address.
    pub(crate) fn max_capacity(&self) -> usize {
        let addressable = match mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX.unsigned_abs() / size,
        };
        self.options.max_capacity.min(addressable)
    }

    /// Pointer to slot 0, or null when nothing is allocated.
    pub(crate) fn data(&self) -> *const T {
        if self.cap == 0 {
            ptr::null()
        } else {
            self.ptr.as_ptr()
        }
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is non-null and aligned, and `[0, len)` is initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Sets the logical length without touching any slot.
    ///
    /// # Safety
    ///
    /// `new_len <= capacity()` and every slot in `[0, new_len)` must hold a
    /// live value that is not owned anywhere else.
    #[inline]
    pub(crate) unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.cap);
        self.len = new_len;
    }

    /// Guarantees `capacity() >= min_capacity`, reallocating to exactly
    /// `min_capacity` slots if needed.
    ///
    /// Returns whether the storage moved.
    pub(crate) fn ensure_capacity(&mut self, min_capacity: usize) -> Result<bool, BufferError> {
        if self.cap >= min_capacity {
            return Ok(false);
        }
        let max = self.max_capacity();
        if min_capacity > max {
            tracing::debug!(
                target: TRACE_TARGET,
                requested = min_capacity,
                max,
                "capacity request rejected"
            );
            return Err(BufferError::Allocation {
                requested: min_capacity,
                max,
            });
        }
        self.reallocate(min_capacity)?;
        Ok(true)
    }

    /// Makes room for `needed` slots using the single-append policy: when
    /// the buffer is full, capacity becomes `max(1, capacity * 2)`, clamped to
    /// the ceiling but never below `needed`.
    ///
    /// Returns whether the storage moved.
    pub(crate) fn grow_for_append(&mut self, needed: usize) -> Result<bool, BufferError> {
        if self.cap >= needed {
            return Ok(false);
        }
        let doubled = self.cap.saturating_mul(2).max(1);
        let target = doubled.max(needed).min(self.max_capacity());
        // `ensure_capacity` reports the ceiling if even `needed` does not fit.
        self.ensure_capacity(target.max(needed))
    }

    /// Makes room for `extra` slots past the current length using the
    /// configured [`BulkGrowth`] policy.
    ///
    /// Returns whether the storage moved.
    pub(crate) fn grow_for_bulk(&mut self, extra: usize) -> Result<bool, BufferError> {
        let needed = self
            .len
            .checked_add(extra)
            .ok_or(BufferError::Allocation {
                requested: usize::MAX,
                max: self.max_capacity(),
            })?;
        if self.cap >= needed {
            return Ok(false);
        }
        let target = match self.options.bulk_growth {
            BulkGrowth::Exact => needed,
            BulkGrowth::Double => self
                .cap
                .saturating_mul(2)
                .min(self.max_capacity())
                .max(needed),
        };
        self.ensure_capacity(target)
    }

    /// Reallocates down to `max(len, min_capacity)` slots.
    ///
    /// Returns whether the storage moved.
    pub(crate) fn shrink_to(&mut self, min_capacity: usize) -> Result<bool, BufferError> {
        let target = self.len.max(min_capacity);
        if target >= self.cap {
            return Ok(false);
        }
        self.reallocate(target)?;
        Ok(true)
    }

    /// Slides the live tail `[at, len)` right by `count` slots.
    ///
    /// Source and destination may overlap. The length is not changed.
    ///
    /// # Safety
    ///
    /// `at <= len` and `len + count <= capacity()`. Afterwards the slots
    /// `[at, at + count)` hold stale bit copies: the caller must overwrite
    /// them (or shrink the length below `at`) before anything can observe or
    /// drop them.
    pub(crate) unsafe fn shift_right(&mut self, at: usize, count: usize) {
        debug_assert!(at <= self.len);
        debug_assert!(self.len + count <= self.cap);
        if count == 0 || at == self.len {
            return;
        }
        // SAFETY: both ranges lie within the allocation per the contract;
        // `ptr::copy` tolerates the overlap.
        unsafe {
            let base = self.ptr.as_ptr();
            ptr::copy(base.add(at), base.add(at + count), self.len - at);
        }
    }

    /// Slides the live tail `[at, len)` left by `count` slots, onto
    /// `[at - count, len - count)`.
    ///
    /// Source and destination may overlap. The length is not changed.
    ///
    /// # Safety
    ///
    /// `count <= at <= len`, and the values in `[at - count, at)` must
    /// already have been dropped or moved out. Afterwards the slots
    /// `[len - count, len)` are stale and the caller must lower the length.
    pub(crate) unsafe fn shift_left(&mut self, at: usize, count: usize) {
        debug_assert!(count <= at && at <= self.len);
        if count == 0 || at == self.len {
            return;
        }
        // SAFETY: both ranges lie within `[0, len)`; `ptr::copy` is memmove.
        unsafe {
            let base = self.ptr.as_ptr();
            ptr::copy(base.add(at), base.add(at - count), self.len - at);
        }
    }

    /// Writes `value` into the slot at `len` and bumps the length.
    ///
    /// # Safety
    ///
    /// `len < capacity()`.
    #[inline]
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.cap);
        // SAFETY: the slot at `len` is inside the allocation and uninitialized.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Moves the last live value out.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside `[0, len)`.
        Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
    }

    /// Drops every live value at or after `new_len`.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        // Lower the length first so a panicking destructor cannot cause a
        // second drop of the same slots.
        self.len = new_len;
        // SAFETY: `[new_len, new_len + tail)` were live and are now excluded.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr().add(new_len),
                tail,
            ));
        }
    }

    /// Drops every live value and frees the allocation, returning to the
    /// empty state. A no-op on an already empty buffer.
    pub(crate) fn release(&mut self) {
        if self.cap == 0 && self.len == 0 {
            return;
        }
        self.truncate(0);
        tracing::trace!(
            target: TRACE_TARGET,
            capacity = self.cap,
            elem_size = mem::size_of::<T>(),
            "released"
        );
        // SAFETY: no live values remain and the pointer is forgotten below.
        unsafe { self.deallocate() };
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    /// Moves the storage out, leaving an empty buffer with the same options.
    pub(crate) fn take(&mut self) -> Self {
        mem::replace(self, Self::new(self.options))
    }

    fn reallocate(&mut self, new_cap: usize) -> Result<(), BufferError> {
        debug_assert!(new_cap >= self.len);
        let new_ptr = self.allocate(new_cap)?;
        if self.len > 0 {
            // SAFETY: distinct allocations, both hold at least `len` slots.
            unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len) };
        }
        tracing::trace!(
            target: TRACE_TARGET,
            old_capacity = self.cap,
            new_capacity = new_cap,
            len = self.len,
            elem_size = mem::size_of::<T>(),
            "reallocated"
        );
        // SAFETY: the live values were relocated above; the old block is dead.
        unsafe { self.deallocate() };
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn allocate(&self, cap: usize) -> Result<NonNull<T>, BufferError> {
        let layout = Layout::array::<T>(cap).map_err(|_| BufferError::Allocation {
            requested: cap,
            max: self.max_capacity(),
        })?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: the layout has non-zero size.
        let raw = unsafe { alloc(layout) };
        NonNull::new(raw.cast::<T>()).ok_or(BufferError::OutOfMemory {
            bytes: layout.size(),
        })
    }

    /// Frees the current block without touching its slots.
    ///
    /// # Safety
    ///
    /// No live value may remain in the block, and `ptr` must not be used
    /// again before it is replaced.
    unsafe fn deallocate(&mut self) {
        if self.cap == 0 {
            return;
        }
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            if layout.size() != 0 {
                // SAFETY: `ptr` came from `alloc` with this exact layout.
                unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }
}

impl<T: Clone> Buffer<T> {
    /// Appends clones of `items`, which must already fit.
    ///
    /// The length is bumped after every clone, so a panicking `clone` leaves
    /// the buffer consistent.
    pub(crate) fn extend_cloned_within_capacity(&mut self, items: &[T]) {
        assert!(self.cap - self.len >= items.len());
        for item in items {
            // SAFETY: capacity checked above.
            unsafe { self.push_unchecked(item.clone()) };
        }
    }

    /// Appends `count` clones of `value`, which must already fit.
    pub(crate) fn fill_within_capacity(&mut self, count: usize, value: &T) {
        assert!(self.cap - self.len >= count);
        for _ in 0..count {
            // SAFETY: capacity checked above.
            unsafe { self.push_unchecked(value.clone()) };
        }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len)
            .field("cap", &self.cap)
            .field("items", &self.as_slice())
            .finish()
    }
}
