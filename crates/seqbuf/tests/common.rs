#![allow(missing_docs)]

use core::fmt::{Debug, Write};

use seqbuf::{CharBuffer, Sequence};

/// Collects one line per step of a scenario for snapshotting.
#[derive(Default)]
pub struct Trace {
    out: String,
}

impl Trace {
    pub fn text(&mut self, label: &str, s: &CharBuffer) {
        writeln!(
            self.out,
            "{label}: {s:?} len={} cap={} display={s}",
            s.len(),
            s.capacity()
        )
        .unwrap();
    }

    pub fn seq<T: Debug>(&mut self, label: &str, seq: &Sequence<T>) {
        writeln!(self.out, "{label}: {seq:?} len={} cap={}", seq.len(), seq.capacity()).unwrap();
    }

    pub fn finish(self) -> String {
        self.out
    }
}
