//! In-place bit reversal of a window.

use crate::align::{read_word_at, write_bits_at};
use crate::word_store::WordStore;

/// Reverses the bit order of the window `[offset, offset + len)` in place.
///
/// Full 64-bit chunks are swapped pairwise from both ends, each chunk
/// bit-reversed as it crosses. The middle remnant of fewer than 128 bits is
/// loaded into a double word, reversed as a unit, and written back — this is
/// what keeps the converging ends from reversing any bit twice.
pub(crate) fn reverse(store: &mut WordStore, offset: u64, len: u64) {
    let mut lo = offset;
    let mut hi = offset + len;

    while hi - lo >= 128 {
        let front = read_word_at(&*store, lo);
        let back = read_word_at(&*store, hi - 64);
        write_bits_at(store, lo, 64, back.reverse_bits());
        write_bits_at(store, hi - 64, 64, front.reverse_bits());
        lo += 64;
        hi -= 64;
    }

    let rest = (hi - lo) as u32;
    if rest == 0 {
        return;
    }
    let w0 = read_word_at(&*store, lo);
    let w1 = if rest > 64 { read_word_at(&*store, lo + 64) } else { 0 };
    let packed = ((w0 as u128) << 64) | w1 as u128;
    // Window bit k sits at packed bit 127 - k; after reverse_bits it sits at
    // bit k, and the shift re-aligns reversed bit 0 with packed bit 127.
    let reversed = packed.reverse_bits() << (128 - rest);
    write_bits_at(store, lo, rest.min(64), (reversed >> 64) as u64);
    if rest > 64 {
        write_bits_at(store, lo + 64, rest - 64, reversed as u64);
    }
}
