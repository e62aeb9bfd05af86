//! Window-to-window copies and range fill.
//!
//! Copies run in ascending or descending chunk order. For moves within one
//! store the caller picks the direction that reads ahead of its own writes:
//! forward when the destination precedes the source, backward otherwise.

use crate::align::{read_word_at, write_bits_at};
use crate::cursor::RangeCursor;
use crate::word_store::{WordSource, WordStore};

/// Copies `len` bits from a window of `src` into a window of `dst`,
/// front to back.
pub(crate) fn copy_across<S: WordSource + ?Sized>(
    dst: &mut WordStore,
    dst_off: u64,
    src: &S,
    src_off: u64,
    len: u64,
) {
    debug_assert!(len == 0 || src_off + len <= src.bit_len());
    let mut src_cursor = RangeCursor::new(src_off, len);
    let mut dst_cursor = RangeCursor::new(dst_off, len);
    while src_cursor.has_next() {
        let chunk = src_cursor.next_aligned(src, false);
        dst_cursor.skip_aligned();
        dst_cursor.write_chunk(dst, chunk);
    }
}

/// Copies `len` bits from a window of `src` into a window of `dst`,
/// back to front.
pub(crate) fn copy_across_backward<S: WordSource + ?Sized>(
    dst: &mut WordStore,
    dst_off: u64,
    src: &S,
    src_off: u64,
    len: u64,
) {
    debug_assert!(len == 0 || src_off + len <= src.bit_len());
    let mut src_cursor = RangeCursor::new(src_off, len);
    let mut dst_cursor = RangeCursor::new(dst_off, len);
    while src_cursor.has_prev() {
        let chunk = src_cursor.prev_aligned(src, false);
        dst_cursor.skip_prev_aligned();
        dst_cursor.write_chunk(dst, chunk);
    }
}

/// Copies as many bits as the source window provides into the destination
/// window, aligned at the destination's front; a shorter source leaves the
/// destination tail zero-filled, a longer one is truncated.
pub(crate) fn copy_from_front<S: WordSource + ?Sized>(
    dst: &mut WordStore,
    dst_off: u64,
    dst_len: u64,
    src: &S,
    src_off: u64,
    src_len: u64,
) {
    let count = src_len.min(dst_len);
    copy_across(dst, dst_off, src, src_off, count);
    fill_range(dst, dst_off + count, dst_len - count, false);
}

/// Back-aligned counterpart of [`copy_from_front`]: the source's trailing
/// bits land at the destination window's back, and a shorter source leaves
/// the destination front zero-filled.
pub(crate) fn copy_from_back<S: WordSource + ?Sized>(
    dst: &mut WordStore,
    dst_off: u64,
    dst_len: u64,
    src: &S,
    src_off: u64,
    src_len: u64,
) {
    let count = src_len.min(dst_len);
    copy_across_backward(
        dst,
        dst_off + (dst_len - count),
        src,
        src_off + (src_len - count),
        count,
    );
    fill_range(dst, dst_off, dst_len - count, false);
}

/// Moves `len` bits within one store, ascending. Safe when `dst_off <
/// src_off`: every chunk is read before any later position is written.
pub(crate) fn copy_within_forward(store: &mut WordStore, dst_off: u64, src_off: u64, len: u64) {
    debug_assert!(dst_off <= src_off);
    let mut pos = 0u64;
    while pos < len {
        let width = (len - pos).min(64) as u32;
        let chunk = read_word_at(&*store, src_off + pos);
        write_bits_at(store, dst_off + pos, width, chunk);
        pos += width as u64;
    }
}

/// Moves `len` bits within one store, descending. Safe when `dst_off >
/// src_off`.
pub(crate) fn copy_within_backward(store: &mut WordStore, dst_off: u64, src_off: u64, len: u64) {
    debug_assert!(dst_off >= src_off);
    let mut remaining = len;
    while remaining > 0 {
        let width = remaining.min(64) as u32;
        remaining -= width as u64;
        let chunk = read_word_at(&*store, src_off + remaining);
        write_bits_at(store, dst_off + remaining, width, chunk);
    }
}

/// Fills a window with the given bit value, word at a time; margin bits of
/// the boundary words survive through the cursor's splice.
pub(crate) fn fill_range(store: &mut WordStore, offset: u64, len: u64, fill: bool) {
    let word = if fill { u64::MAX } else { 0 };
    let mut cursor = RangeCursor::new(offset, len);
    while cursor.has_next() {
        cursor.next_word(&*store, fill);
        cursor.write_word(store, word);
    }
}
