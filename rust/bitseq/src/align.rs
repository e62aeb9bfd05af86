//! Stateless word-level alignment primitives.
//!
//! Bit order is big-endian by index: bit `i` of the sequence lives in word
//! `i / 64`, at bit position `63 - (i % 64)` counted from the LSB. All
//! helpers below operate on that layout.

use crate::word_store::{WordSource, WordStore};

/// Returns a word with the `n` most significant bits set, `n` in `0..=64`.
#[inline]
pub(crate) fn high_mask(n: u32) -> u64 {
    debug_assert!(n <= 64);
    if n == 0 { 0 } else { u64::MAX << (64 - n) }
}

/// Returns a word with the `n` least significant bits set, `n` in `0..=64`.
#[inline]
pub(crate) fn low_mask(n: u32) -> u64 {
    debug_assert!(n <= 64);
    if n == 0 { 0 } else { u64::MAX >> (64 - n) }
}

/// Shifts `lo` left by `shift` (`0..=63`), funneling in the top bits of the
/// following word `hi`.
#[inline]
pub(crate) fn shift_pair_left(shift: u32, lo: u64, hi: u64) -> u64 {
    debug_assert!(shift < 64);
    if shift == 0 {
        lo
    } else {
        (lo << shift) | (hi >> (64 - shift))
    }
}

/// Forces the `margin` most significant bits of `word` to the fill bit.
#[inline]
pub(crate) fn fill_margin_high(word: u64, margin: u32, fill: bool) -> u64 {
    let mask = high_mask(margin);
    if fill { word | mask } else { word & !mask }
}

/// Forces the `margin` least significant bits of `word` to the fill bit.
#[inline]
pub(crate) fn fill_margin_low(word: u64, margin: u32, fill: bool) -> u64 {
    let mask = low_mask(margin);
    if fill { word | mask } else { word & !mask }
}

/// Splices `updated` over `original`, keeping the bits of `original` selected
/// by `keep_mask`. This is the margin-restore step after a destructive
/// word-level write: data outside the active window that physically shares a
/// word with in-window data survives unchanged.
#[inline]
pub(crate) fn splice(original: u64, updated: u64, keep_mask: u64) -> u64 {
    (original & keep_mask) | (updated & !keep_mask)
}

/// Reads 64 logical bits starting at the arbitrary bit offset `bit`,
/// left-aligned: sequence bit `bit + k` lands at result bit `63 - k`.
///
/// Positions past the source's word capacity read as the source's resting
/// word (zero for owned storage, the fill word for a constant source), so
/// callers only ever mask, never bounds-check, the tail.
#[inline]
pub(crate) fn read_word_at<S: WordSource + ?Sized>(src: &S, bit: u64) -> u64 {
    let word_index = bit / 64;
    let shift = (bit % 64) as u32;
    if shift == 0 {
        src.word(word_index)
    } else {
        shift_pair_left(shift, src.word(word_index), src.word(word_index + 1))
    }
}

/// Writes the `count` (`1..=64`) most significant bits of `value` into the
/// store at bit offset `bit`, leaving every other bit untouched.
///
/// Touches at most two physical words; out-of-window bits of the boundary
/// words are restored via [`splice`].
pub(crate) fn write_bits_at(store: &mut WordStore, bit: u64, count: u32, value: u64) {
    debug_assert!(count >= 1 && count <= 64);
    debug_assert!(bit + count as u64 <= store.word_capacity());
    let word_index = (bit / 64) as usize;
    let shift = (bit % 64) as u32;
    let head = count.min(64 - shift);

    let words = store.words_mut();
    let head_mask = high_mask(head) >> shift;
    words[word_index] = splice(words[word_index], value >> shift, !head_mask);

    let rest = count - head;
    if rest > 0 {
        // shift > 0 is implied: head < count requires a word boundary split.
        let rest_mask = high_mask(rest);
        words[word_index + 1] = splice(words[word_index + 1], value << (64 - shift), !rest_mask);
    }
}
