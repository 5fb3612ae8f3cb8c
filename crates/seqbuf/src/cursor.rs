//! Detached, generation-checked positions into a [`Sequence`](crate::Sequence).
//!
//! A [`Cursor`] is the random-access iterator of the crate: a position plus
//! the identity of the storage it was issued against. It holds no reference,
//! so it survives mutations of its sequence, and is validated every time it
//! is dereferenced:
//!
//! - any reallocation or release of the storage renews the generation and
//!   invalidates every outstanding cursor;
//! - an edit that keeps the storage in place (pop, erase, truncation,
//!   in-capacity insert or push) invalidates the cursors at or after the edit
//!   point that were issued before the edit.
//!
//! The ledger remembers the last [`EDIT_WINDOW`] edit points exactly and folds
//! older ones into a single floor. A cursor that has seen fewer edits than the
//! window is judged precisely; an older one is judged against the floor as
//! well, so it may be rejected even though no edit at or below its index
//! happened after it was issued. The ledger never accepts a cursor that the
//! rules above invalidate.
use core::{
    cmp::Ordering,
    sync::atomic::{AtomicUsize, Ordering as AtomicOrdering},
};

use crate::BufferError;

/// Generation `0` is reserved for storage that was never allocated.
static NEXT_GENERATION: AtomicUsize = AtomicUsize::new(1);

fn next_generation() -> usize {
    NEXT_GENERATION.fetch_add(1, AtomicOrdering::Relaxed)
}

/// A position in a [`Sequence`](crate::Sequence), checked against the
/// sequence when dereferenced.
///
/// Cursors compare equal when they were issued against the same storage
/// generation and point at the same index. Cursors from the same generation
/// order by index; comparing cursors of different generations is meaningless
/// but consistent.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    generation: usize,
    stamp: usize,
    index: usize,
}

impl Cursor {
    /// The index this cursor points at.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the cursor `n` positions forward.
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        Self {
            index: self.index.saturating_add(n),
            ..self
        }
    }

    /// Moves the cursor `n` positions back, stopping at `0`.
    #[must_use]
    pub fn retreat(self, n: usize) -> Self {
        Self {
            index: self.index.saturating_sub(n),
            ..self
        }
    }

    /// Signed distance from `origin` to `self`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn offset_from(&self, origin: &Cursor) -> isize {
        (self.index as isize).wrapping_sub(origin.index as isize)
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && self.index == other.index
    }
}

impl Eq for Cursor {}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.generation, self.index).cmp(&(other.generation, other.index))
    }
}

/// Number of in-place edits a [`Ledger`] remembers individually.
pub const EDIT_WINDOW: usize = 8;

/// Per-storage validity state, owned by the sequence next to its buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ledger {
    generation: usize,
    stamp: usize,
    /// Edit point of stamp `s` lives in `recent[s % EDIT_WINDOW]`.
    recent: [usize; EDIT_WINDOW],
    /// Lowest edit point that has left the window.
    floor: usize,
}

impl Ledger {
    pub(crate) const fn new() -> Self {
        Self {
            generation: 0,
            stamp: 0,
            recent: [usize::MAX; EDIT_WINDOW],
            floor: usize::MAX,
        }
    }

    /// The storage moved or was released: every cursor is now stale.
    pub(crate) fn renew(&mut self) {
        *self = Self {
            generation: next_generation(),
            ..Self::new()
        };
    }

    /// Renews only if `reallocated`, otherwise records an in-place edit at
    /// `at`.
    pub(crate) fn record(&mut self, reallocated: bool, at: usize) {
        if reallocated {
            self.renew();
        } else {
            self.edit(at);
        }
    }

    /// An in-place edit touched every position from `at` onward.
    pub(crate) fn edit(&mut self, at: usize) {
        self.stamp = self.stamp.wrapping_add(1);
        let slot = &mut self.recent[self.stamp % EDIT_WINDOW];
        self.floor = self.floor.min(*slot);
        *slot = at;
    }

    pub(crate) fn issue(&self, index: usize) -> Cursor {
        Cursor {
            generation: self.generation,
            stamp: self.stamp,
            index,
        }
    }

    /// Lowest edit point recorded after `stamp`.
    fn lowest_edit_since(&self, stamp: usize) -> usize {
        let missed = self.stamp.wrapping_sub(stamp);
        if missed > EDIT_WINDOW {
            let recent = self.recent.iter().copied().min().unwrap_or(usize::MAX);
            return recent.min(self.floor);
        }
        (1..=missed)
            .map(|back| self.recent[stamp.wrapping_add(back) % EDIT_WINDOW])
            .min()
            .unwrap_or(usize::MAX)
    }

    /// Returns the cursor's index if it is still valid for this storage.
    pub(crate) fn check(&self, cursor: Cursor) -> Result<usize, BufferError> {
        if cursor.generation != self.generation {
            return Err(BufferError::StaleCursor);
        }
        if cursor.index >= self.lowest_edit_since(cursor.stamp) {
            return Err(BufferError::StaleCursor);
        }
        Ok(cursor.index)
    }
}
