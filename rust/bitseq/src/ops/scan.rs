//! Set/clear bit scans over a window.
//!
//! Each scan walks whole storage words through a range cursor, filling the
//! margins with the *opposite* of the sought bit so that positions outside
//! the window can never register as a match.

use crate::cursor::RangeCursor;
use crate::word_store::WordSource;

/// Returns the lowest index of a set bit in `[offset, offset + len)`.
pub(crate) fn next_set_bit<S: WordSource + ?Sized>(src: &S, offset: u64, len: u64) -> Option<u64> {
    let mut cursor = RangeCursor::new(offset, len);
    while cursor.has_next() {
        let word = cursor.next_word(src, false);
        if word != 0 {
            return Some(cursor.word_index() * 64 + word.leading_zeros() as u64);
        }
    }
    None
}

/// Returns the lowest index of a clear bit in `[offset, offset + len)`.
pub(crate) fn next_clear_bit<S: WordSource + ?Sized>(src: &S, offset: u64, len: u64) -> Option<u64> {
    let mut cursor = RangeCursor::new(offset, len);
    while cursor.has_next() {
        let word = cursor.next_word(src, true);
        if word != u64::MAX {
            return Some(cursor.word_index() * 64 + word.leading_ones() as u64);
        }
    }
    None
}

/// Returns the highest index of a set bit in `[offset, offset + len)`.
pub(crate) fn prev_set_bit<S: WordSource + ?Sized>(src: &S, offset: u64, len: u64) -> Option<u64> {
    let mut cursor = RangeCursor::new(offset, len);
    while cursor.has_prev() {
        let word = cursor.prev_word(src, false);
        if word != 0 {
            return Some(cursor.word_index() * 64 + (63 - word.trailing_zeros() as u64));
        }
    }
    None
}

/// Returns the highest index of a clear bit in `[offset, offset + len)`.
pub(crate) fn prev_clear_bit<S: WordSource + ?Sized>(src: &S, offset: u64, len: u64) -> Option<u64> {
    let mut cursor = RangeCursor::new(offset, len);
    while cursor.has_prev() {
        let word = cursor.prev_word(src, true);
        if word != u64::MAX {
            return Some(cursor.word_index() * 64 + (63 - word.trailing_ones() as u64));
        }
    }
    None
}
