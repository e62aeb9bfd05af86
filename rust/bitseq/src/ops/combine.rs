//! Elementwise boolean combine and word-wise comparison predicates.

use crate::cursor::RangeCursor;
use crate::word_store::{WordSource, WordStore};

/// Applies a binary word operator pointwise over two windows of equal
/// operation length, writing the result into the destination window.
///
/// Both operands are walked by aligned cursors in lockstep, so their offsets
/// may differ mod 64. Only bits inside `[dst_off, dst_off + len)` change;
/// boundary-word margins are spliced back on write.
///
/// `src_fill` pads the source's final partial chunk: all-ones for AND-like
/// operators (missing bits must not clear anything), all-zeros otherwise.
/// With the operation length already clamped to the shorter operand the
/// padding never reaches a written bit, but keeping it makes the operator
/// total over full words.
pub(crate) fn combine<S: WordSource + ?Sized>(
    dst: &mut WordStore,
    dst_off: u64,
    src: &S,
    src_off: u64,
    len: u64,
    src_fill: bool,
    op: impl Fn(u64, u64) -> u64,
) {
    let mut dst_cursor = RangeCursor::new(dst_off, len);
    let mut src_cursor = RangeCursor::new(src_off, len);
    while dst_cursor.has_next() {
        let a = dst_cursor.next_aligned(&*dst, false);
        let b = src_cursor.next_aligned(src, src_fill);
        dst_cursor.write_chunk(dst, op(a, b));
    }
}

/// Applies a binary word predicate pointwise over two windows, returning
/// `default` unless some word pair deviates from it, in which case the scan
/// short-circuits and returns `!default`.
///
/// Equality uses `default = true` with an equality predicate (any unequal
/// word means "not equal"); intersection uses `default = false` with a
/// nonzero-AND predicate.
pub(crate) fn compare<A, B>(
    a: &A,
    a_off: u64,
    b: &B,
    b_off: u64,
    len: u64,
    fill: bool,
    default: bool,
    predicate: impl Fn(u64, u64) -> bool,
) -> bool
where
    A: WordSource + ?Sized,
    B: WordSource + ?Sized,
{
    let mut a_cursor = RangeCursor::new(a_off, len);
    let mut b_cursor = RangeCursor::new(b_off, len);
    while a_cursor.has_next() {
        let wa = a_cursor.next_aligned(a, fill);
        let wb = b_cursor.next_aligned(b, fill);
        if predicate(wa, wb) != default {
            return !default;
        }
    }
    default
}

/// Counts the set bits inside a window. Margin bits are masked to zero so
/// they never contribute.
pub(crate) fn count_ones<S: WordSource + ?Sized>(src: &S, offset: u64, len: u64) -> u64 {
    let mut cursor = RangeCursor::new(offset, len);
    let mut total = 0u64;
    while cursor.has_next() {
        total += cursor.next_word(src, false).count_ones() as u64;
    }
    total
}
