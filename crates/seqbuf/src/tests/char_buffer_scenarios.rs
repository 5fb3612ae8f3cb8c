use alloc::{format, string::ToString, vec::Vec};

use rstest::rstest;

use super::utils::assert_text;
use crate::{BufferError, BufferOptions, BulkGrowth, CharBuffer, NPOS};

fn small(max_capacity: usize) -> CharBuffer {
    CharBuffer::with_options(BufferOptions {
        max_capacity,
        ..BufferOptions::char_buffer()
    })
}

#[test]
fn empty_buffer_owns_nothing() {
    let s = CharBuffer::new();
    assert!(s.is_empty());
    assert_eq!(s.capacity(), 0);
    assert!(s.data().is_null());
    assert_eq!(s.c_str().to_bytes(), b"");
    assert_eq!(s.as_bytes_with_nul(), b"\0");
    assert_eq!(s.max_capacity(), BufferOptions::CHAR_BUFFER_MAX);
    s.assert_invariants();
}

#[test]
fn push_back_grows_geometrically() {
    let mut s = CharBuffer::new();
    let mut capacities = Vec::new();
    for byte in b"abcdefgh" {
        s.push_back(*byte).unwrap();
        capacities.push(s.capacity());
        s.assert_invariants();
    }
    // One slot of every allocation belongs to the terminator.
    assert_eq!(capacities, [1, 3, 3, 7, 7, 7, 7, 15]);
    assert_text(&s, "abcdefgh");
}

#[test]
fn constructors() {
    assert_text(&CharBuffer::from_fill(4, b'z').unwrap(), "zzzz");
    assert_text(&CharBuffer::from_bytes(b"bytes").unwrap(), "bytes");
    assert_text(&CharBuffer::from_c_str(c"c string").unwrap(), "c string");
    let source = CharBuffer::from("teststring");
    assert_text(&CharBuffer::from_substr(&source, 4, 3).unwrap(), "str");
    assert_text(&CharBuffer::from_substr(&source, 4, NPOS).unwrap(), "string");
    assert!(CharBuffer::from_substr(&source, 11, 1).is_err());
    assert_text(&b"iter".iter().copied().collect::<CharBuffer>(), "iter");

    let sized = CharBuffer::with_capacity(32).unwrap();
    assert_eq!(sized.capacity(), 32);
    sized.assert_invariants();
}

#[test]
fn from_fill_allocates_exactly() {
    let s = CharBuffer::from_fill(10, b'-').unwrap();
    assert_eq!(s.capacity(), 10);
    let empty = CharBuffer::from_fill(0, b'-').unwrap();
    assert!(empty.data().is_null());
}

#[test]
fn reserve_is_exact_and_never_shrinks() {
    let mut s = CharBuffer::from("abc");
    s.reserve(0).unwrap();
    assert_eq!(s.capacity(), 3);
    s.reserve(40).unwrap();
    assert_eq!(s.capacity(), 40);
    s.reserve(5).unwrap();
    assert_eq!(s.capacity(), 40);
    assert_text(&s, "abc");

    let mut fresh = CharBuffer::new();
    fresh.reserve(0).unwrap();
    assert!(fresh.data().is_null());
}

#[rstest]
#[case::front(0, "HEREstring")]
#[case::middle(4, "striHEREng")]
#[case::back(6, "stringHERE")]
fn insert_bytes(#[case] index: usize, #[case] expected: &str) {
    let mut s = CharBuffer::from("string");
    s.insert(index, b"HERE").unwrap();
    assert_text(&s, expected);
}

#[test]
fn insert_variants() {
    let mut s = CharBuffer::from("abc");
    s.insert_fill(1, 3, b'.').unwrap();
    assert_text(&s, "a...bc");
    s.insert(6, b"").unwrap();
    assert_text(&s, "a...bc");
    assert_eq!(
        s.insert(7, b"x"),
        Err(BufferError::OutOfRange {
            op: "insert",
            pos: 7,
            len: 6
        })
    );
    assert_text(&s, "a...bc");
}

#[rstest]
#[case::self_at_end("abc", 3, 0, NPOS, "abcabc")]
#[case::self_at_front("abc", 0, 0, NPOS, "abcabc")]
#[case::overlapping_middle("abcdef", 2, 1, 3, "abbcdcdef")]
#[case::clamped("abc", 1, 2, 100, "acbc")]
fn insert_within_copies_before_writing(
    #[case] initial: &str,
    #[case] index: usize,
    #[case] pos: usize,
    #[case] count: usize,
    #[case] expected: &str,
) {
    let mut s = CharBuffer::from(initial);
    s.insert_within(index, pos, count).unwrap();
    assert_text(&s, expected);
}

#[rstest]
#[case::head(0, 2, "cdef")]
#[case::middle(2, 2, "abef")]
#[case::to_end(3, NPOS, "abc")]
#[case::past_the_tail(4, 100, "abcd")]
#[case::nothing(6, 3, "abcdef")]
#[case::everything(0, NPOS, "")]
fn erase_clamps_the_count(#[case] index: usize, #[case] count: usize, #[case] expected: &str) {
    let mut s = CharBuffer::from("abcdef");
    s.erase(index, count).unwrap();
    assert_text(&s, expected);
}

#[test]
fn erase_past_the_end_is_rejected() {
    let mut s = CharBuffer::from("abc");
    assert_eq!(
        s.erase(4, 1),
        Err(BufferError::OutOfRange {
            op: "erase",
            pos: 4,
            len: 3
        })
    );
}

#[test]
fn append_variants() {
    let mut s = CharBuffer::from("ab");
    s.append(b"cd").unwrap();
    s.append_fill(2, b'!').unwrap();
    s.append_c_str(c"ef").unwrap();
    s.append_buffer(&CharBuffer::from("gh")).unwrap();
    s.append_substr(&CharBuffer::from("0123456"), 4, 2).unwrap();
    assert_text(&s, "abcd!!efgh45");
    assert!(s.append_substr(&CharBuffer::from("x"), 2, 1).is_err());

    let mut echo = CharBuffer::from("ab");
    echo.append_within(0, NPOS).unwrap();
    echo.append_within(1, 2).unwrap();
    assert_text(&echo, "ababba");
}

#[rstest]
#[case::same_length(7, 4, "here", "replacehere!")]
#[case::shorter(7, 4, "", "replace!")]
#[case::longer(7, 4, "somewhere", "replacesomewhere!")]
#[case::clamped(7, NPOS, "d", "replaced")]
#[case::at_end(12, 0, "?", "replaceXXXX!?")]
fn replace_bytes(#[case] pos: usize, #[case] count: usize, #[case] with: &str, #[case] expected: &str) {
    let mut s = CharBuffer::from("replaceXXXX!");
    s.replace(pos, count, with.as_bytes()).unwrap();
    assert_text(&s, expected);
}

#[test]
fn replace_variants() {
    let mut s = CharBuffer::from("hello world");
    s.replace_fill(0, 5, 3, b'*').unwrap();
    assert_text(&s, "*** world");
    let other = CharBuffer::from("big planet");
    s.replace_substr(4, NPOS, &other, 4, NPOS).unwrap();
    assert_text(&s, "*** planet");
    assert!(s.replace_substr(0, 1, &other, 11, 1).is_err());
    assert_eq!(
        s.replace(11, 1, b"x"),
        Err(BufferError::OutOfRange {
            op: "replace",
            pos: 11,
            len: 10
        })
    );
    assert_text(&s, "*** planet");
}

#[rstest]
#[case::grow_from_whole("abcdef", 1, 2, 0, NPOS, "aabcdefdef")]
#[case::shrink_from_tail("abcdef", 0, 4, 4, 2, "efef")]
#[case::overlapping("abcdef", 2, 3, 1, 4, "abbcdef")]
#[case::empty_source("abc", 1, 1, 3, 5, "ac")]
fn replace_within_sees_the_original(
    #[case] initial: &str,
    #[case] pos: usize,
    #[case] count: usize,
    #[case] pos2: usize,
    #[case] count2: usize,
    #[case] expected: &str,
) {
    let mut s = CharBuffer::from(initial);
    s.replace_within(pos, count, pos2, count2).unwrap();
    assert_text(&s, expected);
}

#[test]
fn substr_and_copy() {
    let s = CharBuffer::from("teststring");
    assert_text(&s.substr(0, 4).unwrap(), "test");
    assert_text(&s.substr(4, NPOS).unwrap(), "string");
    assert_text(&s.substr(10, 5).unwrap(), "");
    assert_eq!(
        s.substr(11, 1),
        Err(BufferError::OutOfRange {
            op: "substr",
            pos: 11,
            len: 10
        })
    );

    let mut out = [0_u8; 8];
    assert_eq!(s.copy_to(&mut out, 6, 4), Ok(6));
    assert_eq!(&out[..6], b"string");
    assert_eq!(s.copy_to(&mut out[..2], NPOS, 0), Ok(2));
    assert_eq!(&out[..2], b"te");
    assert!(s.copy_to(&mut out, 1, 11).is_err());
}

#[test]
fn resize_and_shrink_to_fit() {
    let mut s = CharBuffer::from_fill(100, b'x').unwrap();
    s.resize(10, 0).unwrap();
    assert_eq!(s.len(), 10);
    assert!(s.capacity() > s.len());
    s.shrink_to_fit().unwrap();
    assert_eq!(s.capacity(), 10);
    assert_text(&s, "xxxxxxxxxx");

    s.resize(13, b'y').unwrap();
    assert_text(&s, "xxxxxxxxxxyyy");
    s.resize_default(14).unwrap();
    assert_eq!(s.back(), Some(0));
    assert_eq!(s.c_str().to_bytes(), b"xxxxxxxxxxyyy");

    s.resize(0, 0).unwrap();
    s.shrink_to_fit().unwrap();
    assert!(s.data().is_null());
}

#[test]
fn clear_releases_storage() {
    let mut s = CharBuffer::from("abc");
    s.clear();
    assert!(s.is_empty());
    assert!(s.data().is_null());
    assert_eq!(s.c_str().to_bytes(), b"");
    s.push_back(b'q').unwrap();
    assert_text(&s, "q");
}

#[test]
fn pop_back_keeps_the_terminator() {
    let mut s = CharBuffer::from("ab");
    assert_eq!(s.pop_back(), Some(b'b'));
    assert_text(&s, "a");
    assert_eq!(s.c_str().to_bytes(), b"a");
    assert_eq!(s.pop_back(), Some(b'a'));
    assert_text(&s, "");
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "pop_back on an empty CharBuffer")]
fn pop_back_on_empty_is_a_caller_error() {
    let mut s = CharBuffer::new();
    let _ = s.pop_back();
}

#[test]
fn element_access() {
    let mut s = CharBuffer::from("abc");
    assert_eq!(s.at(1), Ok(b'b'));
    assert!(s.at(3).is_err());
    *s.at_mut(0).unwrap() = b'A';
    s[2] = b'C';
    assert_eq!((s.front(), s.back()), (Some(b'A'), Some(b'C')));
    // SAFETY: index 3 is the terminator of an allocated buffer.
    assert_eq!(unsafe { s.get_unchecked(3) }, 0);
    assert_text(&s, "AbC");
}

#[test]
fn interior_nul_ends_the_c_string() {
    let s = CharBuffer::from_bytes(b"ab\0cd").unwrap();
    assert_eq!(s.len(), 5);
    assert_eq!(s.c_str().to_bytes(), b"ab");
    assert_eq!(s.to_string(), "ab");
    assert_eq!(format!("{s:?}"), r#""ab\0cd""#);
}

#[test]
fn ceiling_reports_length_errors() {
    let mut s = small(8);
    s.append(b"12345678").unwrap();
    assert_eq!(s.capacity(), 8);
    assert_eq!(
        s.push_back(b'9'),
        Err(BufferError::Length {
            op: "push_back",
            requested: 9,
            max: 8
        })
    );
    assert_eq!(
        s.insert(0, b"x"),
        Err(BufferError::Length {
            op: "insert",
            requested: 9,
            max: 8
        })
    );
    assert_eq!(
        s.reserve(9),
        Err(BufferError::Length {
            op: "reserve",
            requested: 9,
            max: 8
        })
    );
    assert!(s.resize(9, 0).is_err());
    assert!(s.append_within(0, 1).is_err());
    assert_text(&s, "12345678");
    s.replace(0, 2, b"ab").unwrap();
    assert_text(&s, "ab345678");
}

#[test]
fn default_ceiling_is_char_buffer_max() {
    let mut s = CharBuffer::from_fill(BufferOptions::CHAR_BUFFER_MAX, b'a').unwrap();
    assert!(matches!(s.push_back(b'a'), Err(BufferError::Length { .. })));
    assert!(CharBuffer::from_fill(BufferOptions::CHAR_BUFFER_MAX + 1, b'a').is_err());
    s.assert_invariants();
}

#[test]
fn push_back_clamps_to_the_ceiling() {
    let mut s = small(5);
    for byte in b"abcde" {
        s.push_back(*byte).unwrap();
    }
    assert_eq!(s.capacity(), 5);
    assert_text(&s, "abcde");
}

#[test]
fn doubling_bulk_growth() {
    let mut s = CharBuffer::with_options(BufferOptions {
        bulk_growth: BulkGrowth::Double,
        ..BufferOptions::char_buffer()
    });
    s.append(b"abc").unwrap();
    assert_eq!(s.capacity(), 3);
    s.append(b"d").unwrap();
    assert_eq!(s.capacity(), 7);
    assert_eq!(s.substr(0, NPOS).unwrap().options().bulk_growth, BulkGrowth::Double);
}

#[test]
fn assignment() {
    let mut s = CharBuffer::from("something long enough");
    let data = s.data();
    s.assign_bytes(b"short").unwrap();
    assert_eq!(s.data(), data);
    assert_text(&s, "short");
    s.assign(&CharBuffer::from("other")).unwrap();
    assert_text(&s, "other");
    s.assign_substr(&CharBuffer::from("prefix-suffix"), 7, NPOS).unwrap();
    assert_text(&s, "suffix");
    s.assign_c_str(c"cstr").unwrap();
    assert_text(&s, "cstr");
    s.assign_fill(3, b'#').unwrap();
    assert_text(&s, "###");
    s.assign_byte(b'1').unwrap();
    assert_text(&s, "1");
}

#[test]
fn clone_is_tight_and_independent() {
    let mut original = CharBuffer::from("text");
    original.reserve(64).unwrap();
    let copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.capacity(), 4);
    original.push_back(b'!').unwrap();
    assert_text(&copy, "text");

    let mut target = CharBuffer::with_capacity(16).unwrap();
    let data = target.data();
    target.clone_from(&original);
    assert_eq!(target.data(), data);
    assert_text(&target, "text!");
}

#[test]
fn clone_from_takes_the_source_options() {
    let source = CharBuffer::from_fill(100, b'x').unwrap();
    let mut target = CharBuffer::with_options(BufferOptions {
        max_capacity: 8,
        ..BufferOptions::char_buffer()
    });
    target.append(b"short").unwrap();
    target.clone_from(&source);
    assert_eq!(target, source);
    assert_eq!(target.options(), source.options());
    target.assert_invariants();
}

#[test]
fn swap_and_take() {
    let mut a = CharBuffer::from("first");
    let mut b = CharBuffer::from("second");
    crate::char_buffer::swap(&mut a, &mut b);
    assert_text(&a, "second");
    assert_text(&b, "first");
    a.swap(&mut b);
    assert_text(&a, "first");

    let moved = a.take();
    assert_text(&moved, "first");
    assert!(a.data().is_null());
    assert_text(&a, "");
}

#[test]
fn comparisons() {
    let abc = CharBuffer::from("abc");
    assert!(CharBuffer::from("ab") < abc);
    assert!(abc < CharBuffer::from("abd"));
    assert!(CharBuffer::from("b") > abc);
    assert_eq!(abc, "abc");
    assert_eq!(abc, *b"abc");
    assert_eq!(abc, b"abc"[..]);
    assert_eq!(abc, *c"abc");
    assert_ne!(abc, CharBuffer::from("abc\0"));
}

#[test]
fn operators() {
    let mut s = CharBuffer::from("con");
    s += "cat";
    s += b'e';
    s += &b"na"[..];
    s += &CharBuffer::from("tion");
    assert_text(&s, "concatenation");

    let joined = CharBuffer::from("a") + &CharBuffer::from("b") + "!" + b'a';
    assert_text(&joined, "ab!a");
}

#[test]
fn display_and_debug() {
    let s = CharBuffer::from_bytes(b"caf\xc3\xa9 \xff").unwrap();
    assert_eq!(s.to_string(), "caf\u{e9} \u{fffd}");
    assert_eq!(format!("{s:?}"), r#""café \xFF""#);
}
