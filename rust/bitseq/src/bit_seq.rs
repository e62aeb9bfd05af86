//! A mutable, arbitrary-length sequence of bits backed by packed 64-bit
//! words.

use std::fmt;

use bitseq_common::{Result, verify_arg};

use crate::align::{read_word_at, write_bits_at};
use crate::field::BitField;
use crate::ops::{combine, copy, reverse, rotate, scan, shift};
use crate::view::RangeView;
use crate::word_store::{ConstantSource, WordStore};

/// A mutable, arbitrary-length bit sequence with `u64` word storage.
///
/// `BitSeq` supports bit-level read/write, boolean algebra over arbitrary
/// regions, shifting, rotation, reversal, and structural edits (append,
/// insert, delete, replace) — all addressable by bit offset and length,
/// including operations spanning two independent sequences treated as one
/// logical stream.
///
/// # Storage Format
///
/// Bits are stored big-endian by index within an array of `u64` words:
/// - Bit 0 is the most significant bit (MSB) of the first word
/// - Bit 63 is the least significant bit (LSB) of the first word
/// - Bit 64 is the MSB of the second word, and so on
///
/// Bits at index `>= len()` are unspecified garbage: the engine never reads
/// them and never promises them to be zero. Export paths
/// ([`Self::to_msb_words`], [`Self::to_msb_bytes`]) zero-pad their final
/// partial unit.
///
/// # Errors
///
/// Region-addressed operations validate their offsets and lengths before
/// touching any word, so a failed call is a no-op. Appends and whole-sequence
/// operations cannot fail and return `()`.
///
/// # Performance
///
/// - Individual bit access: O(1)
/// - Region operations: O(len/64), independent of the operands' alignment
#[derive(Clone, Default)]
pub struct BitSeq {
    store: WordStore,
}

impl BitSeq {
    /// Creates an empty sequence with no allocated storage.
    pub fn new() -> BitSeq {
        BitSeq {
            store: WordStore::new(),
        }
    }

    /// Creates an empty sequence with room for at least `bits` bits, rounded
    /// up to whole words.
    pub fn with_capacity(bits: u64) -> BitSeq {
        BitSeq {
            store: WordStore::with_bit_capacity(bits),
        }
    }

    /// Creates a sequence of length `len` with every bit clear.
    pub fn zeros(len: u64) -> BitSeq {
        BitSeq {
            store: WordStore::zeroed(len),
        }
    }

    /// Creates a sequence of length `len` with every bit set.
    pub fn ones(len: u64) -> BitSeq {
        BitSeq {
            store: WordStore::with_pattern(len, u64::MAX),
        }
    }

    /// Creates a sequence of length `len` by repeating a 64-bit pattern
    /// across the storage words.
    pub fn with_pattern(len: u64, pattern: u64) -> BitSeq {
        BitSeq {
            store: WordStore::with_pattern(len, pattern),
        }
    }

    /// Creates a sequence from MSB-ordered words (bit 0 is the MSB of
    /// word 0). Only the first `len.div_ceil(64)` words are used.
    ///
    /// # Panics
    ///
    /// Panics if `len > words.len() * 64`.
    pub fn from_msb_words(words: &[u64], len: u64) -> BitSeq {
        assert!(len <= words.len() as u64 * 64);
        let count = len.div_ceil(64) as usize;
        let mut store = WordStore::zeroed(len);
        store.words_mut().copy_from_slice(&words[..count]);
        BitSeq { store }
    }

    /// Creates a sequence from MSB-ordered bytes (bit 0 is the MSB of
    /// byte 0).
    ///
    /// # Panics
    ///
    /// Panics if `len > bytes.len() * 8`.
    pub fn from_msb_bytes(bytes: &[u8], len: u64) -> BitSeq {
        assert!(len <= bytes.len() as u64 * 8);
        let mut store = WordStore::zeroed(len);
        let byte_len = (len.div_ceil(8) as usize).min(bytes.len());
        for (word_index, chunk) in bytes[..byte_len].chunks(8).enumerate() {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            store.words_mut()[word_index] = u64::from_be_bytes(buf);
        }
        BitSeq { store }
    }

    /// Parses a sequence from a string of `'0'`/`'1'` characters, most
    /// significant (lowest index) bit first.
    pub fn from_bit_str(s: &str) -> Result<BitSeq> {
        let mut seq = BitSeq::with_capacity(s.len() as u64);
        for ch in s.chars() {
            match ch {
                '0' => seq.push(false),
                '1' => seq.push(true),
                _ => {
                    return Err(bitseq_common::error::Error::invalid_arg(
                        "s",
                        format!("unexpected character {ch:?} in bit string"),
                    ));
                }
            }
        }
        Ok(seq)
    }

    /// Returns the number of bits in the sequence.
    #[inline]
    pub fn len(&self) -> u64 {
        self.store.len()
    }

    /// Returns `true` if the sequence has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Total bit capacity of the allocated words.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.store.word_capacity()
    }

    /// Grows the storage so that at least `additional` more bits fit without
    /// reallocation.
    pub fn reserve(&mut self, additional: u64) {
        let len = self.store.len();
        self.store.ensure_capacity(len + additional);
    }

    /// Drops trailing words not covered by the logical length.
    pub fn trim(&mut self) {
        self.store.trim();
    }

    /// Structural-edit counter used by [`RangeView`] staleness checks.
    /// Incremented by every length-changing edit that is not a pure append.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    // --- single bits and fixed-width values ---------------------------------

    /// Returns the bit at `index`.
    pub fn get(&self, index: u64) -> Result<bool> {
        verify_arg!(index, index < self.len());
        Ok(self.store.get_bit(index))
    }

    /// Sets the bit at `index` to 1.
    pub fn set(&mut self, index: u64) -> Result<()> {
        self.set_to(index, true)
    }

    /// Resets the bit at `index` to 0.
    pub fn reset(&mut self, index: u64) -> Result<()> {
        self.set_to(index, false)
    }

    /// Sets the bit at `index` to the given value.
    pub fn set_to(&mut self, index: u64, value: bool) -> Result<()> {
        verify_arg!(index, index < self.len());
        self.store.set_bit(index, value);
        Ok(())
    }

    /// Inverts the bit at `index`.
    pub fn flip_bit(&mut self, index: u64) -> Result<()> {
        verify_arg!(index, index < self.len());
        let value = self.store.get_bit(index);
        self.store.set_bit(index, !value);
        Ok(())
    }

    /// Reads `width` bits (`0..=64`) starting at `offset` as a right-aligned
    /// value: the bit at `offset` becomes the most significant of the
    /// `width` result bits.
    pub fn get_bits(&self, offset: u64, width: u32) -> Result<u64> {
        verify_arg!(width, width <= 64);
        verify_arg!(offset, offset <= self.len());
        verify_arg!(width, width as u64 <= self.len() - offset);
        if width == 0 {
            return Ok(0);
        }
        Ok(read_word_at(&self.store, offset) >> (64 - width))
    }

    /// Writes the low `width` bits (`0..=64`) of `value` starting at
    /// `offset`; the most significant of them lands at `offset`.
    pub fn set_bits(&mut self, offset: u64, width: u32, value: u64) -> Result<()> {
        verify_arg!(width, width <= 64);
        verify_arg!(offset, offset <= self.len());
        verify_arg!(width, width as u64 <= self.len() - offset);
        verify_arg!(value, width == 64 || value >> width == 0);
        if width > 0 {
            write_bits_at(&mut self.store, offset, width, value << (64 - width));
        }
        Ok(())
    }

    /// Reads the field's bits as a right-aligned value. The field width must
    /// not exceed 64.
    pub fn get_field(&self, field: BitField) -> Result<u64> {
        verify_arg!(field, field.len <= 64);
        self.get_bits(field.offset, field.len as u32)
    }

    /// Writes a right-aligned value into the field's bits.
    pub fn set_field(&mut self, field: BitField, value: u64) -> Result<()> {
        verify_arg!(field, field.len <= 64);
        self.set_bits(field.offset, field.len as u32, value)
    }

    /// Fills the field's bits with the given value.
    pub fn fill_field(&mut self, field: BitField, fill: bool) -> Result<()> {
        if fill {
            self.set_range(field.offset, field.len)
        } else {
            self.clear_range(field.offset, field.len)
        }
    }

    // --- counting and predicates --------------------------------------------

    /// Counts the set bits in the whole sequence.
    pub fn count_ones(&self) -> u64 {
        combine::count_ones(&self.store, 0, self.len())
    }

    /// Counts the clear bits in the whole sequence.
    pub fn count_zeros(&self) -> u64 {
        self.len() - self.count_ones()
    }

    /// Counts the set bits in `[offset, offset + len)`.
    pub fn count_ones_range(&self, offset: u64, len: u64) -> Result<u64> {
        self.verify_window(offset, len)?;
        Ok(combine::count_ones(&self.store, offset, len))
    }

    /// Compares `len` bits of this sequence against `len` bits of `other`.
    /// Any unequal word means "not equal".
    pub fn range_eq(
        &self,
        offset: u64,
        other: &BitSeq,
        other_offset: u64,
        len: u64,
    ) -> Result<bool> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, len)?;
        Ok(combine::compare(
            &self.store,
            offset,
            &other.store,
            other_offset,
            len,
            false,
            true,
            |a, b| a == b,
        ))
    }

    /// Returns `true` if the two regions share any set bit.
    pub fn intersects_range(
        &self,
        offset: u64,
        other: &BitSeq,
        other_offset: u64,
        len: u64,
    ) -> Result<bool> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, len)?;
        Ok(combine::compare(
            &self.store,
            offset,
            &other.store,
            other_offset,
            len,
            false,
            false,
            |a, b| a & b != 0,
        ))
    }

    /// Returns `true` if the two sequences share any set bit within their
    /// common (shorter) length.
    pub fn intersects(&self, other: &BitSeq) -> bool {
        let len = self.len().min(other.len());
        combine::compare(
            &self.store,
            0,
            &other.store,
            0,
            len,
            false,
            false,
            |a, b| a & b != 0,
        )
    }

    // --- boolean combine ----------------------------------------------------

    /// `self[offset..][..len] &= other[other_offset..][..len]`.
    pub fn and_range(
        &mut self,
        offset: u64,
        other: &BitSeq,
        other_offset: u64,
        len: u64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, len)?;
        combine::combine(
            &mut self.store,
            offset,
            &other.store,
            other_offset,
            len,
            true,
            |a, b| a & b,
        );
        Ok(())
    }

    /// `self[offset..][..len] |= other[other_offset..][..len]`.
    pub fn or_range(
        &mut self,
        offset: u64,
        other: &BitSeq,
        other_offset: u64,
        len: u64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, len)?;
        combine::combine(
            &mut self.store,
            offset,
            &other.store,
            other_offset,
            len,
            false,
            |a, b| a | b,
        );
        Ok(())
    }

    /// `self[offset..][..len] ^= other[other_offset..][..len]`.
    pub fn xor_range(
        &mut self,
        offset: u64,
        other: &BitSeq,
        other_offset: u64,
        len: u64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, len)?;
        combine::combine(
            &mut self.store,
            offset,
            &other.store,
            other_offset,
            len,
            false,
            |a, b| a ^ b,
        );
        Ok(())
    }

    /// `self[offset..][..len] &= !other[other_offset..][..len]`.
    pub fn and_not_range(
        &mut self,
        offset: u64,
        other: &BitSeq,
        other_offset: u64,
        len: u64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, len)?;
        combine::combine(
            &mut self.store,
            offset,
            &other.store,
            other_offset,
            len,
            false,
            |a, b| a & !b,
        );
        Ok(())
    }

    /// ANDs the two sequences over their common (shorter) length; remaining
    /// bits of the longer operand are unchanged, as if the shorter one were
    /// extended with ones.
    pub fn and(&mut self, other: &BitSeq) {
        let len = self.len().min(other.len());
        combine::combine(&mut self.store, 0, &other.store, 0, len, true, |a, b| a & b);
    }

    /// ORs the two sequences over their common (shorter) length.
    pub fn or(&mut self, other: &BitSeq) {
        let len = self.len().min(other.len());
        combine::combine(&mut self.store, 0, &other.store, 0, len, false, |a, b| {
            a | b
        });
    }

    /// XORs the two sequences over their common (shorter) length.
    pub fn xor(&mut self, other: &BitSeq) {
        let len = self.len().min(other.len());
        combine::combine(&mut self.store, 0, &other.store, 0, len, false, |a, b| {
            a ^ b
        });
    }

    /// Clears, in this sequence, every bit set in `other`, over the common
    /// length.
    pub fn and_not(&mut self, other: &BitSeq) {
        let len = self.len().min(other.len());
        combine::combine(&mut self.store, 0, &other.store, 0, len, false, |a, b| {
            a & !b
        });
    }

    /// Sets all bits in `[offset, offset + len)` — a combine against the
    /// all-ones constant source.
    pub fn set_range(&mut self, offset: u64, len: u64) -> Result<()> {
        self.verify_window(offset, len)?;
        combine::combine(
            &mut self.store,
            offset,
            &ConstantSource::ones(),
            0,
            len,
            false,
            |a, b| a | b,
        );
        Ok(())
    }

    /// Clears all bits in `[offset, offset + len)` — a combine against the
    /// all-zeros constant source.
    pub fn clear_range(&mut self, offset: u64, len: u64) -> Result<()> {
        self.verify_window(offset, len)?;
        combine::combine(
            &mut self.store,
            offset,
            &ConstantSource::zeros(),
            0,
            len,
            true,
            |a, b| a & b,
        );
        Ok(())
    }

    /// Inverts all bits in `[offset, offset + len)` — an XOR against the
    /// all-ones constant source.
    pub fn flip_range(&mut self, offset: u64, len: u64) -> Result<()> {
        self.verify_window(offset, len)?;
        combine::combine(
            &mut self.store,
            offset,
            &ConstantSource::ones(),
            0,
            len,
            false,
            |a, b| a ^ b,
        );
        Ok(())
    }

    /// Sets every bit.
    pub fn set_all(&mut self) {
        let len = self.len();
        copy::fill_range(&mut self.store, 0, len, true);
    }

    /// Clears every bit.
    pub fn clear_all(&mut self) {
        let len = self.len();
        copy::fill_range(&mut self.store, 0, len, false);
    }

    /// Inverts every bit.
    pub fn flip_all(&mut self) {
        let len = self.len();
        combine::combine(
            &mut self.store,
            0,
            &ConstantSource::ones(),
            0,
            len,
            false,
            |a, b| a ^ b,
        );
    }

    // --- copy, extract, reverse ---------------------------------------------

    /// Overwrites `[offset, offset + len)` with bits from a window of `src`.
    pub fn overwrite(
        &mut self,
        offset: u64,
        src: &BitSeq,
        src_offset: u64,
        len: u64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        src.verify_window(src_offset, len)?;
        copy::copy_across(&mut self.store, offset, &src.store, src_offset, len);
        Ok(())
    }

    /// Copies a source window into a destination window, aligned at the
    /// destination's front; a shorter source leaves the destination tail
    /// zero-filled, a longer one is truncated.
    pub fn copy_from_front(
        &mut self,
        offset: u64,
        len: u64,
        src: &BitSeq,
        src_offset: u64,
        src_len: u64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        src.verify_window(src_offset, src_len)?;
        copy::copy_from_front(&mut self.store, offset, len, &src.store, src_offset, src_len);
        Ok(())
    }

    /// Back-aligned counterpart of [`Self::copy_from_front`]: the source's
    /// trailing bits land at the destination window's back, and a shorter
    /// source leaves the destination front zero-filled.
    pub fn copy_from_back(
        &mut self,
        offset: u64,
        len: u64,
        src: &BitSeq,
        src_offset: u64,
        src_len: u64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        src.verify_window(src_offset, src_len)?;
        copy::copy_from_back(&mut self.store, offset, len, &src.store, src_offset, src_len);
        Ok(())
    }

    /// Returns a freshly allocated sequence holding a copy of
    /// `[offset, offset + len)`.
    pub fn extract(&self, offset: u64, len: u64) -> Result<BitSeq> {
        self.verify_window(offset, len)?;
        let mut store = WordStore::zeroed(len);
        copy::copy_across(&mut store, 0, &self.store, offset, len);
        Ok(BitSeq { store })
    }

    /// Reverses the bit order of the whole sequence in place.
    pub fn reverse(&mut self) {
        let len = self.len();
        reverse::reverse(&mut self.store, 0, len);
    }

    /// Reverses the bit order of `[offset, offset + len)` in place.
    pub fn reverse_range(&mut self, offset: u64, len: u64) -> Result<()> {
        self.verify_window(offset, len)?;
        reverse::reverse(&mut self.store, offset, len);
        Ok(())
    }

    // --- shift and rotate ---------------------------------------------------

    /// Shifts the whole sequence toward lower indices by `n`, filling the
    /// vacated tail. `n >= len` fills everything.
    pub fn shift_left(&mut self, n: u64, fill: bool) {
        let len = self.len();
        shift::shift_left(&mut self.store, 0, len, n, fill);
    }

    /// Shifts the whole sequence toward higher indices by `n`, filling the
    /// vacated front.
    pub fn shift_right(&mut self, n: u64, fill: bool) {
        let len = self.len();
        shift::shift_right(&mut self.store, 0, len, n, fill);
    }

    /// Shifts `[offset, offset + len)` toward lower indices by `n`; bits
    /// outside the window are untouched.
    pub fn shift_left_range(&mut self, offset: u64, len: u64, n: u64, fill: bool) -> Result<()> {
        self.verify_window(offset, len)?;
        shift::shift_left(&mut self.store, offset, len, n, fill);
        Ok(())
    }

    /// Shifts `[offset, offset + len)` toward higher indices by `n`.
    pub fn shift_right_range(&mut self, offset: u64, len: u64, n: u64, fill: bool) -> Result<()> {
        self.verify_window(offset, len)?;
        shift::shift_right(&mut self.store, offset, len, n, fill);
        Ok(())
    }

    /// Shifts the combined stream `self ++ other` left by `n`: bits leaving
    /// the front of `other` enter the back of `self`, bits leaving the front
    /// of `self` are lost, and the stream tail is filled.
    pub fn shift_left_with(&mut self, other: &mut BitSeq, n: u64, fill: bool) {
        let (a_len, b_len) = (self.len(), other.len());
        shift::shift_left_across(
            &mut self.store,
            0,
            a_len,
            &mut other.store,
            0,
            b_len,
            n,
            fill,
        );
    }

    /// Shifts the combined stream `self ++ other` right by `n`: bits leaving
    /// the back of `self` enter the front of `other`.
    pub fn shift_right_with(&mut self, other: &mut BitSeq, n: u64, fill: bool) {
        let (a_len, b_len) = (self.len(), other.len());
        shift::shift_right_across(
            &mut self.store,
            0,
            a_len,
            &mut other.store,
            0,
            b_len,
            n,
            fill,
        );
    }

    /// Window form of [`Self::shift_left_with`].
    pub fn shift_left_range_with(
        &mut self,
        offset: u64,
        len: u64,
        other: &mut BitSeq,
        other_offset: u64,
        other_len: u64,
        n: u64,
        fill: bool,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, other_len)?;
        shift::shift_left_across(
            &mut self.store,
            offset,
            len,
            &mut other.store,
            other_offset,
            other_len,
            n,
            fill,
        );
        Ok(())
    }

    /// Window form of [`Self::shift_right_with`].
    pub fn shift_right_range_with(
        &mut self,
        offset: u64,
        len: u64,
        other: &mut BitSeq,
        other_offset: u64,
        other_len: u64,
        n: u64,
        fill: bool,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, other_len)?;
        shift::shift_right_across(
            &mut self.store,
            offset,
            len,
            &mut other.store,
            other_offset,
            other_len,
            n,
            fill,
        );
        Ok(())
    }

    /// Rotates the whole sequence left by `amount`; a negative amount
    /// rotates right. `i64::MIN` is a valid amount.
    pub fn rotate_left(&mut self, amount: i64) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let n = rotate::reduce_left_amount(amount, len);
        rotate::rotate_left_by(&mut self.store, 0, len, n);
    }

    /// Rotates the whole sequence right by `amount`; a negative amount
    /// rotates left.
    pub fn rotate_right(&mut self, amount: i64) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let n = rotate::reduce_right_amount(amount, len);
        rotate::rotate_left_by(&mut self.store, 0, len, n);
    }

    /// Rotates `[offset, offset + len)` left by `amount` in place.
    pub fn rotate_left_range(&mut self, offset: u64, len: u64, amount: i64) -> Result<()> {
        self.verify_window(offset, len)?;
        if len > 0 {
            let n = rotate::reduce_left_amount(amount, len);
            rotate::rotate_left_by(&mut self.store, offset, len, n);
        }
        Ok(())
    }

    /// Rotates `[offset, offset + len)` right by `amount` in place.
    pub fn rotate_right_range(&mut self, offset: u64, len: u64, amount: i64) -> Result<()> {
        self.verify_window(offset, len)?;
        if len > 0 {
            let n = rotate::reduce_right_amount(amount, len);
            rotate::rotate_left_by(&mut self.store, offset, len, n);
        }
        Ok(())
    }

    /// Rotates the combined ring `self ++ other` left by `amount`.
    pub fn rotate_left_with(&mut self, other: &mut BitSeq, amount: i64) {
        let (a_len, b_len) = (self.len(), other.len());
        let total = a_len + b_len;
        if total == 0 {
            return;
        }
        let n = rotate::reduce_left_amount(amount, total);
        rotate::rotate_left_across_by(&mut self.store, 0, a_len, &mut other.store, 0, b_len, n);
    }

    /// Rotates the combined ring `self ++ other` right by `amount`.
    pub fn rotate_right_with(&mut self, other: &mut BitSeq, amount: i64) {
        let (a_len, b_len) = (self.len(), other.len());
        let total = a_len + b_len;
        if total == 0 {
            return;
        }
        let n = rotate::reduce_right_amount(amount, total);
        rotate::rotate_left_across_by(&mut self.store, 0, a_len, &mut other.store, 0, b_len, n);
    }

    /// Window form of [`Self::rotate_left_with`].
    pub fn rotate_left_range_with(
        &mut self,
        offset: u64,
        len: u64,
        other: &mut BitSeq,
        other_offset: u64,
        other_len: u64,
        amount: i64,
    ) -> Result<()> {
        self.verify_window(offset, len)?;
        other.verify_window(other_offset, other_len)?;
        let total = len + other_len;
        if total > 0 {
            let n = rotate::reduce_left_amount(amount, total);
            rotate::rotate_left_across_by(
                &mut self.store,
                offset,
                len,
                &mut other.store,
                other_offset,
                other_len,
                n,
            );
        }
        Ok(())
    }

    // --- scans --------------------------------------------------------------

    /// Returns the lowest index `>= from` holding a set bit.
    pub fn next_set_bit(&self, from: u64) -> Option<u64> {
        let len = self.len();
        if from >= len {
            return None;
        }
        scan::next_set_bit(&self.store, from, len - from)
    }

    /// Returns the lowest index `>= from` holding a clear bit.
    pub fn next_clear_bit(&self, from: u64) -> Option<u64> {
        let len = self.len();
        if from >= len {
            return None;
        }
        scan::next_clear_bit(&self.store, from, len - from)
    }

    /// Returns the highest index `<= from` holding a set bit. `from` is
    /// clamped to the last valid index.
    pub fn prev_set_bit(&self, from: u64) -> Option<u64> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let from = from.min(len - 1);
        scan::prev_set_bit(&self.store, 0, from + 1)
    }

    /// Returns the highest index `<= from` holding a clear bit.
    pub fn prev_clear_bit(&self, from: u64) -> Option<u64> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let from = from.min(len - 1);
        scan::prev_clear_bit(&self.store, 0, from + 1)
    }

    // --- structural edits ---------------------------------------------------

    /// Appends one bit at the tail. Pure appends never invalidate views.
    pub fn push(&mut self, bit: bool) {
        let len = self.store.len();
        self.store.ensure_capacity(len + 1);
        self.store.set_len(len + 1);
        self.store.set_bit(len, bit);
    }

    /// Appends the low `width` bits (`0..=64`) of `value`, most significant
    /// first.
    pub fn append_bits(&mut self, value: u64, width: u32) -> Result<()> {
        verify_arg!(width, width <= 64);
        verify_arg!(value, width == 64 || value >> width == 0);
        if width == 0 {
            return Ok(());
        }
        let len = self.store.len();
        self.store.ensure_capacity(len + width as u64);
        self.store.set_len(len + width as u64);
        write_bits_at(&mut self.store, len, width, value << (64 - width));
        Ok(())
    }

    /// Appends a whole sequence at the tail.
    pub fn append(&mut self, src: &BitSeq) {
        let src_len = src.len();
        let old_len = self.store.len();
        self.store.ensure_capacity(old_len + src_len);
        self.store.set_len(old_len + src_len);
        copy::copy_across(&mut self.store, old_len, &src.store, 0, src_len);
    }

    /// Appends a window of `src` at the tail.
    pub fn append_range(&mut self, src: &BitSeq, src_offset: u64, len: u64) -> Result<()> {
        src.verify_window(src_offset, len)?;
        let old_len = self.store.len();
        self.store.ensure_capacity(old_len + len);
        self.store.set_len(old_len + len);
        copy::copy_across(&mut self.store, old_len, &src.store, src_offset, len);
        Ok(())
    }

    /// Inserts a whole sequence before position `pos`, growing the sequence
    /// by `src.len()`.
    pub fn insert(&mut self, pos: u64, src: &BitSeq) -> Result<()> {
        let src_len = src.len();
        self.insert_range(pos, src, 0, src_len)
    }

    /// Inserts a window of `src` before position `pos`. Inserting anywhere
    /// but the tail invalidates outstanding views.
    pub fn insert_range(&mut self, pos: u64, src: &BitSeq, src_offset: u64, len: u64) -> Result<()> {
        verify_arg!(pos, pos <= self.len());
        src.verify_window(src_offset, len)?;
        if len == 0 {
            return Ok(());
        }
        self.make_room(pos, len);
        copy::copy_across(&mut self.store, pos, &src.store, src_offset, len);
        Ok(())
    }

    /// Inserts the low `width` bits of `value` before position `pos`.
    pub fn insert_bits(&mut self, pos: u64, value: u64, width: u32) -> Result<()> {
        verify_arg!(pos, pos <= self.len());
        verify_arg!(width, width <= 64);
        verify_arg!(value, width == 64 || value >> width == 0);
        if width == 0 {
            return Ok(());
        }
        self.make_room(pos, width as u64);
        write_bits_at(&mut self.store, pos, width, value << (64 - width));
        Ok(())
    }

    /// Deletes `[offset, offset + len)`, shrinking the sequence.
    pub fn delete(&mut self, offset: u64, len: u64) -> Result<()> {
        self.verify_window(offset, len)?;
        if len == 0 {
            return Ok(());
        }
        let old_len = self.store.len();
        copy::copy_within_forward(&mut self.store, offset, offset + len, old_len - offset - len);
        self.store.set_len(old_len - len);
        self.store.bump_generation();
        Ok(())
    }

    /// Replaces `[offset, offset + len)` with the whole of `src`, shifting
    /// the tail by the length delta.
    pub fn replace(&mut self, offset: u64, len: u64, src: &BitSeq) -> Result<()> {
        self.verify_window(offset, len)?;
        let src_len = src.len();
        let old_len = self.store.len();
        let tail = old_len - offset - len;
        if src_len > len {
            let grow = src_len - len;
            self.store.ensure_capacity(old_len + grow);
            self.store.set_len(old_len + grow);
            copy::copy_within_backward(&mut self.store, offset + src_len, offset + len, tail);
            self.store.bump_generation();
        } else if src_len < len {
            copy::copy_within_forward(&mut self.store, offset + src_len, offset + len, tail);
            self.store.set_len(old_len - (len - src_len));
            self.store.bump_generation();
        }
        copy::copy_across(&mut self.store, offset, &src.store, 0, src_len);
        Ok(())
    }

    /// Shortens the sequence to `len` bits; a no-op when already shorter.
    pub fn truncate(&mut self, len: u64) {
        if len < self.store.len() {
            self.store.set_len(len);
            self.store.bump_generation();
        }
    }

    /// Resizes the sequence to `len` bits, appending `fill` bits on growth.
    pub fn resize(&mut self, len: u64, fill: bool) {
        let old_len = self.store.len();
        if len > old_len {
            self.store.ensure_capacity(len);
            self.store.set_len(len);
            copy::fill_range(&mut self.store, old_len, len - old_len, fill);
        } else {
            self.truncate(len);
        }
    }

    /// Shifts the tail `[pos, len)` right by `count` to make room for an
    /// insertion, bumping the generation unless the edit is a pure append.
    fn make_room(&mut self, pos: u64, count: u64) {
        let old_len = self.store.len();
        self.store.ensure_capacity(old_len + count);
        self.store.set_len(old_len + count);
        if pos < old_len {
            copy::copy_within_backward(&mut self.store, pos + count, pos, old_len - pos);
            self.store.bump_generation();
        }
    }

    // --- views --------------------------------------------------------------

    /// Creates a [`RangeView`] over `[offset, offset + len)`.
    pub fn view(&self, offset: u64, len: u64) -> Result<RangeView> {
        self.verify_window(offset, len)?;
        Ok(RangeView::new(offset, len, self.generation()))
    }

    /// Creates a [`RangeView`] over the whole sequence.
    pub fn view_all(&self) -> RangeView {
        RangeView::new(0, self.len(), self.generation())
    }

    // --- export -------------------------------------------------------------

    /// Raw word storage. Word `i` holds bits `64 * i ..`; bits past `len()`
    /// are unspecified.
    pub fn words(&self) -> &[u64] {
        self.store.words()
    }

    /// Raw storage viewed as native-endian bytes, for persistence
    /// collaborators that round-trip `(len, words)` pairs.
    pub fn as_raw_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.store.words())
    }

    /// Copies `[offset, offset + len)` into a fresh word buffer, left
    /// aligned, with the final partial word zero-padded.
    pub fn to_msb_words(&self, offset: u64, len: u64) -> Result<Vec<u64>> {
        self.verify_window(offset, len)?;
        let mut words = Vec::with_capacity(len.div_ceil(64) as usize);
        let mut cursor = crate::cursor::RangeCursor::new(offset, len);
        while cursor.has_next() {
            words.push(cursor.next_aligned(&self.store, false));
        }
        Ok(words)
    }

    /// Copies `[offset, offset + len)` into a fresh byte buffer, left
    /// aligned, with the final partial byte zero-padded.
    pub fn to_msb_bytes(&self, offset: u64, len: u64) -> Result<Vec<u8>> {
        let words = self.to_msb_words(offset, len)?;
        let mut bytes = Vec::with_capacity(len.div_ceil(8) as usize);
        for word in words {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes.truncate(len.div_ceil(8) as usize);
        Ok(bytes)
    }

    /// Renders the sequence as a string of `'0'`/`'1'` characters, most
    /// significant (lowest index) bit first, length-exact.
    pub fn to_bit_string(&self) -> String {
        let mut out = String::with_capacity(self.len() as usize);
        for index in 0..self.len() {
            out.push(if self.store.get_bit(index) { '1' } else { '0' });
        }
        out
    }

    fn verify_window(&self, offset: u64, len: u64) -> Result<()> {
        verify_arg!(offset, offset <= self.len());
        verify_arg!(len, len <= self.len() - offset);
        Ok(())
    }

    #[inline]
    pub(crate) fn store(&self) -> &WordStore {
        &self.store
    }
}

impl PartialEq for BitSeq {
    fn eq(&self, other: &BitSeq) -> bool {
        self.len() == other.len()
            && combine::compare(
                &self.store,
                0,
                &other.store,
                0,
                self.len(),
                false,
                true,
                |a, b| a == b,
            )
    }
}

impl Eq for BitSeq {}

impl fmt::Display for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl fmt::Debug for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSeq({}; {})", self.len(), self.to_bit_string())
    }
}
