use alloc::rc::Rc;
use core::cell::Cell;

use crate::CharBuffer;

/// Number of quickcheck cases to run for a property.
pub fn quickcheck_tests() -> u64 {
    #[cfg(all(not(miri), not(feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(all(not(miri), feature = "test-fast"))]
    let tests = 100;
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// A value that counts how many times it has been dropped.
#[derive(Debug, Clone)]
pub struct DropCounter {
    pub id: usize,
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new(id: usize, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            id,
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

impl PartialEq for DropCounter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Asserts the content and the terminator invariant in one go.
#[track_caller]
pub fn assert_text(s: &CharBuffer, expected: &str) {
    s.assert_invariants();
    assert_eq!(s.as_bytes(), expected.as_bytes(), "got {s:?}");
}
