//! Growable contiguous containers built on a single buffer engine.
//!
//! - [`Sequence<T>`] is a generic growable sequence: amortized O(1) appends,
//!   shifted in-place insert and erase, checked and unchecked element access,
//!   and generation-checked [`Cursor`]s.
//! - [`CharBuffer`] is a byte buffer on the same engine that always keeps a
//!   NUL terminator slot behind its contents, so a C string view is available
//!   without reallocating. It adds substring, insert, erase, append and
//!   replace operations, including forms whose source is the buffer itself.
//!
//! Both share one growth policy: single appends double the capacity, bulk
//! operations grow as configured by [`BufferOptions`], and every container
//! enforces a hard capacity ceiling.
//!
//! Checked failures are reported as [`BufferError`] and leave the container
//! untouched. The crate is `no_std` and only needs `alloc`.
//!
//! ```rust
//! use seqbuf::{CharBuffer, Sequence};
//!
//! let mut seq: Sequence<i32> = [3, 5, 6, 7, 1].into();
//! seq.resize(10, 10)?;
//! assert_eq!(seq, [3, 5, 6, 7, 1, 10, 10, 10, 10, 10]);
//!
//! let mut text = CharBuffer::from("replaceXXXX!");
//! text.replace(7, 4, b"here")?;
//! assert_eq!(text, "replacehere!");
//! assert_eq!(text.c_str().to_bytes(), b"replacehere!");
//! # Ok::<(), seqbuf::BufferError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod back_sequence;
mod buffer;
pub mod char_buffer;
pub mod cursor;
mod error;
mod options;
pub mod sequence;

#[cfg(test)]
mod tests;

pub use back_sequence::BackSequence;
pub use char_buffer::{CharBuffer, NPOS};
pub use cursor::Cursor;
pub use error::BufferError;
pub use options::{BufferOptions, BulkGrowth};
pub use sequence::Sequence;

/// Unwraps results on paths that cannot report errors (trait operators,
/// `Clone`), turning a capacity failure into a panic with its message.
#[track_caller]
pub(crate) fn infallible<T>(result: Result<T, BufferError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("seqbuf: {err}"),
    }
}
