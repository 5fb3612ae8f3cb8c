#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use seqbuf::{BufferOptions, BulkGrowth, CharBuffer, NPOS, Sequence};

/// Ceiling small enough that length errors are reached regularly.
const MAX: usize = 4_096;

#[derive(Arbitrary, Debug)]
enum Edit {
    Insert { pos: u16, bytes: Vec<u8> },
    InsertWithin { index: u16, pos: u16, count: u16 },
    Erase { pos: u16, count: u16 },
    Append { bytes: Vec<u8> },
    AppendWithin { pos: u16, count: u16 },
    Replace { pos: u16, count: u16, bytes: Vec<u8> },
    ReplaceWithin { pos: u16, count: u16, pos2: u16, count2: u16 },
    PushBack(u8),
    PopBack,
    Resize { count: u16, byte: u8 },
    Reserve(u16),
    ShrinkToFit,
    Clear,
}

#[derive(Arbitrary, Debug)]
struct Script {
    double: bool,
    edits: Vec<Edit>,
}

/// `u16::MAX` stands for "to the end".
fn count(raw: u16) -> usize {
    if raw == u16::MAX { NPOS } else { usize::from(raw) }
}

fn range(len: usize, pos: usize, count: usize) -> std::ops::Range<usize> {
    pos..pos + count.min(len - pos)
}

/// Applies an edit to the model the way `CharBuffer` should, returning
/// whether it is expected to succeed.
fn splice(model: &mut Vec<u8>, pos: usize, remove: usize, insert: &[u8]) -> bool {
    if pos > model.len() {
        return false;
    }
    let remove = remove.min(model.len() - pos);
    if model.len() - remove + insert.len() > MAX {
        return false;
    }
    model.splice(pos..pos + remove, insert.iter().copied());
    true
}

fn run(script: Script) {
    let options = BufferOptions {
        max_capacity: MAX,
        bulk_growth: if script.double { BulkGrowth::Double } else { BulkGrowth::Exact },
    };
    let mut text = CharBuffer::with_options(options);
    let mut seq: Sequence<u8> = Sequence::with_options(options);
    let mut model: Vec<u8> = Vec::new();

    for edit in script.edits {
        let len = model.len();
        // (model accepted, buffer result, whether `seq` received the same edit)
        let (expected, result, mirrored) = match edit {
            Edit::Insert { pos, bytes } => {
                let pos = usize::from(pos);
                let _ = seq.insert_slice(pos, &bytes);
                (splice(&mut model, pos, 0, &bytes), text.insert(pos, &bytes), true)
            }
            Edit::InsertWithin { index, pos, count: n } => {
                let (index, pos) = (usize::from(index), usize::from(pos));
                let source = (pos <= len).then(|| model[range(len, pos, count(n))].to_vec());
                let expected = source.is_some_and(|s| splice(&mut model, index, 0, &s));
                (expected, text.insert_within(index, pos, count(n)), false)
            }
            Edit::Erase { pos, count: n } => {
                let pos = usize::from(pos);
                (splice(&mut model, pos, count(n), &[]), text.erase(pos, count(n)), false)
            }
            Edit::Append { bytes } => (splice(&mut model, len, 0, &bytes), text.append(&bytes), false),
            Edit::AppendWithin { pos, count: n } => {
                let pos = usize::from(pos);
                let source = (pos <= len).then(|| model[range(len, pos, count(n))].to_vec());
                let expected = source.is_some_and(|s| splice(&mut model, len, 0, &s));
                (expected, text.append_within(pos, count(n)), false)
            }
            Edit::Replace { pos, count: n, bytes } => {
                let pos = usize::from(pos);
                (splice(&mut model, pos, count(n), &bytes), text.replace(pos, count(n), &bytes), false)
            }
            Edit::ReplaceWithin { pos, count: n, pos2, count2 } => {
                let (pos, pos2) = (usize::from(pos), usize::from(pos2));
                let source = (pos2 <= len).then(|| model[range(len, pos2, count(count2))].to_vec());
                let expected = source.is_some_and(|s| splice(&mut model, pos, count(n), &s));
                (expected, text.replace_within(pos, count(n), pos2, count(count2)), false)
            }
            Edit::PushBack(byte) => {
                let _ = seq.push_back(byte);
                (splice(&mut model, len, 0, &[byte]), text.push_back(byte), true)
            }
            Edit::PopBack => {
                if len == 0 {
                    continue;
                }
                assert_eq!(seq.pop_back(), model.last().copied());
                assert_eq!(text.pop_back(), model.pop());
                (true, Ok(()), true)
            }
            Edit::Resize { count: n, byte } => {
                let n = usize::from(n);
                let fits = n <= MAX;
                if fits {
                    model.resize(n, byte);
                }
                assert_eq!(seq.resize(n, byte).is_ok(), fits);
                (fits, text.resize(n, byte), true)
            }
            Edit::Reserve(n) => {
                let n = usize::from(n);
                let before = (text.capacity(), seq.capacity());
                let result = text.reserve(n);
                assert_eq!(seq.reserve(n).is_ok(), n <= MAX);
                if result.is_ok() {
                    assert!(text.capacity() >= before.0.max(n));
                    assert!(seq.capacity() >= before.1.max(n));
                }
                (n <= MAX, result, true)
            }
            Edit::ShrinkToFit => {
                seq.shrink_to_fit().unwrap();
                text.shrink_to_fit().unwrap();
                assert_eq!(text.capacity(), text.len());
                assert_eq!(seq.capacity(), seq.len());
                (true, Ok(()), true)
            }
            Edit::Clear => {
                model.clear();
                seq.clear();
                text.clear();
                assert!(text.data().is_null());
                assert!(seq.data().is_null());
                (true, Ok(()), true)
            }
        };
        match result {
            Ok(()) => assert!(expected, "edit succeeded but the model rejected it"),
            Err(err) => assert!(!expected, "edit failed: {err}"),
        }
        text.assert_invariants();
        assert_eq!(text.as_bytes(), &model[..]);
        if mirrored {
            assert_eq!(seq.as_slice(), &model[..]);
        } else {
            seq.clear();
            seq.insert_slice(0, &model).unwrap();
        }
    }
}

fuzz_target!(|script: Script| run(script));
