//! Intra-window and cross-structure rotation.
//!
//! A rotation is a shift whose displaced bits are reinjected at the vacated
//! end, carried through a spill buffer exactly `n` bits long: the wrapping
//! bits are copied out, the window shifts, and the spill is copied back in
//! at the other end.
//!
//! Public amounts are signed; the reducers below fold sign and magnitude
//! into an equivalent left rotation in `0..len` using `unsigned_abs`, so
//! `i64::MIN` never needs to be negated.

use super::copy::copy_across;
use super::shift::{shift_left, shift_left_across};
use crate::word_store::WordStore;

/// Reduces a signed left-rotation amount to an equivalent left rotation in
/// `0..len`. `len` must be nonzero.
pub(crate) fn reduce_left_amount(amount: i64, len: u64) -> u64 {
    debug_assert!(len > 0);
    let magnitude = amount.unsigned_abs() % len;
    if amount >= 0 || magnitude == 0 {
        magnitude
    } else {
        len - magnitude
    }
}

/// Reduces a signed right-rotation amount to an equivalent left rotation in
/// `0..len`. `len` must be nonzero.
pub(crate) fn reduce_right_amount(amount: i64, len: u64) -> u64 {
    debug_assert!(len > 0);
    let magnitude = amount.unsigned_abs() % len;
    if amount < 0 || magnitude == 0 {
        magnitude
    } else {
        len - magnitude
    }
}

/// Rotates the window `[offset, offset + len)` left by `n`, with `n` already
/// reduced to `0..len`.
pub(crate) fn rotate_left_by(store: &mut WordStore, offset: u64, len: u64, n: u64) {
    debug_assert!(len == 0 || n < len);
    if n == 0 {
        return;
    }
    let mut spill = WordStore::zeroed(n);
    copy_across(&mut spill, 0, &*store, offset, n);
    shift_left(store, offset, len, n, false);
    copy_across(store, offset + len - n, &spill, 0, n);
}

/// Rotates the combined ring `a-window ++ b-window` left by `n`, with `n`
/// already reduced to `0..a_len + b_len`. The spill holds the first `n`
/// stream bits, drawn from `a` and, when `n` exceeds `a`'s window, from `b`;
/// it is reinjected over the stream tail, which may likewise span both
/// windows.
pub(crate) fn rotate_left_across_by(
    a: &mut WordStore,
    a_off: u64,
    a_len: u64,
    b: &mut WordStore,
    b_off: u64,
    b_len: u64,
    n: u64,
) {
    let total = a_len + b_len;
    debug_assert!(total == 0 || n < total);
    if n == 0 {
        return;
    }

    let mut spill = WordStore::zeroed(n);
    let from_a = n.min(a_len);
    copy_across(&mut spill, 0, &*a, a_off, from_a);
    if n > from_a {
        copy_across(&mut spill, from_a, &*b, b_off, n - from_a);
    }

    shift_left_across(a, a_off, a_len, b, b_off, b_len, n, false);

    // Stream tail [total - n, total) receives the spill.
    let tail_start = total - n;
    if tail_start >= a_len {
        copy_across(b, b_off + (tail_start - a_len), &spill, 0, n);
    } else {
        let into_a = a_len - tail_start;
        copy_across(a, a_off + tail_start, &spill, 0, into_a);
        copy_across(b, b_off, &spill, into_a, n - into_a);
    }
}
