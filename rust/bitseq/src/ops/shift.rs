//! Intra-window and cross-structure shifts.
//!
//! A shift drops `n` bits off one end of the window, moves the rest, and
//! fills the `n` vacated positions with the caller's fill bit. `n >= len`
//! fills the entire window. Bits outside the window never change.
//!
//! The cross-structure forms treat `this ++ other` as one logical stream.
//! Update order matters: each window is written only from data that has not
//! been mutated yet (shift-left updates `this` before `other` shifts;
//! shift-right updates `other` before `this` shifts).

use super::copy::{copy_across, copy_within_backward, copy_within_forward, fill_range};
use crate::word_store::WordStore;

/// Shifts the window `[offset, offset + len)` toward lower bit indices by
/// `n`, filling the vacated tail.
pub(crate) fn shift_left(store: &mut WordStore, offset: u64, len: u64, n: u64, fill: bool) {
    if n >= len {
        fill_range(store, offset, len, fill);
        return;
    }
    if n == 0 {
        return;
    }
    copy_within_forward(store, offset, offset + n, len - n);
    fill_range(store, offset + len - n, n, fill);
}

/// Shifts the window toward higher bit indices by `n`, filling the vacated
/// front.
pub(crate) fn shift_right(store: &mut WordStore, offset: u64, len: u64, n: u64, fill: bool) {
    if n >= len {
        fill_range(store, offset, len, fill);
        return;
    }
    if n == 0 {
        return;
    }
    copy_within_backward(store, offset + n, offset, len - n);
    fill_range(store, offset, n, fill);
}

/// Shifts the combined stream `a-window ++ b-window` left by `n`: bits
/// leaving the front of `b` enter the back of `a`, bits leaving the front of
/// `a` are lost, and the vacated stream tail is filled.
pub(crate) fn shift_left_across(
    a: &mut WordStore,
    a_off: u64,
    a_len: u64,
    b: &mut WordStore,
    b_off: u64,
    b_len: u64,
    n: u64,
    fill: bool,
) {
    if n == 0 {
        return;
    }
    // New a = stream[n .. n + a_len]. The part still inside a moves first
    // (forward, reads ahead of writes), then the part drawn from the still
    // untouched b, then fill for anything past the stream.
    let kept = a_len.saturating_sub(n);
    if kept > 0 {
        copy_within_forward(a, a_off, a_off + n, kept);
    }
    let take = a_len - kept;
    let b_start = n.saturating_sub(a_len);
    let from_b = take.min(b_len.saturating_sub(b_start));
    if from_b > 0 {
        copy_across(a, a_off + kept, &*b, b_off + b_start, from_b);
    }
    if take > from_b {
        fill_range(a, a_off + kept + from_b, take - from_b, fill);
    }
    // New b = stream[a_len + n ..] reads only from b itself.
    shift_left(b, b_off, b_len, n, fill);
}

/// Shifts the combined stream `a-window ++ b-window` right by `n`: bits
/// leaving the back of `a` enter the front of `b`, bits leaving the back of
/// `b` are lost, and the vacated stream front is filled.
pub(crate) fn shift_right_across(
    a: &mut WordStore,
    a_off: u64,
    a_len: u64,
    b: &mut WordStore,
    b_off: u64,
    b_len: u64,
    n: u64,
    fill: bool,
) {
    if n == 0 {
        return;
    }
    // New b = stream[a_len - n .. a_len - n + b_len], computed while a is
    // still intact. The part staying inside b moves backward first.
    let kept = b_len.saturating_sub(n);
    if kept > 0 {
        copy_within_backward(b, b_off + n, b_off, kept);
    }
    let take = b_len - kept;
    let fill_count = n.saturating_sub(a_len).min(take);
    if fill_count > 0 {
        fill_range(b, b_off, fill_count, fill);
    }
    let from_a = take - fill_count;
    if from_a > 0 {
        // from_a > 0 guarantees a_len + fill_count >= n, so this cannot
        // underflow.
        copy_across(b, b_off + fill_count, &*a, a_off + (a_len + fill_count - n), from_a);
    }
    shift_right(a, a_off, a_len, n, fill);
}
