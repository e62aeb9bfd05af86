//! Generation-stamped window handles over a [`BitSeq`].
//!
//! A view is a detached `(first_bit, len, expected_generation)` triple, not
//! a borrow: every method takes the base sequence explicitly, so the borrow
//! checker rules out use-after-free, while the generation stamp catches
//! logical staleness. Once the base undergoes a length-changing edit the
//! view did not perform itself, the view is stale for good — every further
//! access returns the structural-change error.

use bitseq_common::{Result, error::Error, verify_arg};

use crate::bit_seq::BitSeq;
use crate::ops::{combine, scan};

/// A window `[first_bit, first_bit + len)` of a [`BitSeq`], valid as long as
/// the base's structural generation still matches the one captured at
/// creation.
///
/// Pure tail appends to the base do not invalidate views. Length-changing
/// edits performed *through* a view keep that view current (it re-stamps
/// itself in the same call) but stale every other outstanding view,
/// including its own parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeView {
    first_bit: u64,
    len: u64,
    expected_generation: u64,
}

impl RangeView {
    pub(crate) fn new(first_bit: u64, len: u64, generation: u64) -> RangeView {
        RangeView {
            first_bit,
            len,
            expected_generation: generation,
        }
    }

    /// Absolute bit offset of the window start in the base sequence.
    #[inline]
    pub fn first_bit(&self) -> u64 {
        self.first_bit
    }

    /// Window length in bits.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the base has been structurally modified since this
    /// view was created or last edited through.
    pub fn is_stale(&self, seq: &BitSeq) -> bool {
        seq.generation() != self.expected_generation
    }

    fn validate(&self, seq: &BitSeq) -> Result<()> {
        if self.is_stale(seq) {
            return Err(Error::structural_change(
                self.expected_generation,
                seq.generation(),
            ));
        }
        Ok(())
    }

    /// Returns the bit at view-relative `index`.
    pub fn get(&self, seq: &BitSeq, index: u64) -> Result<bool> {
        self.validate(seq)?;
        verify_arg!(index, index < self.len);
        seq.get(self.first_bit + index)
    }

    /// Sets the bit at view-relative `index` to the given value.
    pub fn set_to(&self, seq: &mut BitSeq, index: u64, value: bool) -> Result<()> {
        self.validate(seq)?;
        verify_arg!(index, index < self.len);
        seq.set_to(self.first_bit + index, value)
    }

    /// Sets the bit at view-relative `index`.
    pub fn set(&self, seq: &mut BitSeq, index: u64) -> Result<()> {
        self.set_to(seq, index, true)
    }

    /// Resets the bit at view-relative `index`.
    pub fn reset(&self, seq: &mut BitSeq, index: u64) -> Result<()> {
        self.set_to(seq, index, false)
    }

    /// Reads `width` bits at view-relative `offset`, right-aligned.
    pub fn get_bits(&self, seq: &BitSeq, offset: u64, width: u32) -> Result<u64> {
        self.validate(seq)?;
        verify_arg!(offset, offset <= self.len);
        verify_arg!(width, width as u64 <= self.len - offset);
        seq.get_bits(self.first_bit + offset, width)
    }

    /// Writes the low `width` bits of `value` at view-relative `offset`.
    pub fn set_bits(&self, seq: &mut BitSeq, offset: u64, width: u32, value: u64) -> Result<()> {
        self.validate(seq)?;
        verify_arg!(offset, offset <= self.len);
        verify_arg!(width, width as u64 <= self.len - offset);
        seq.set_bits(self.first_bit + offset, width, value)
    }

    /// Counts the set bits in the window.
    pub fn count_ones(&self, seq: &BitSeq) -> Result<u64> {
        self.validate(seq)?;
        Ok(combine::count_ones(seq.store(), self.first_bit, self.len))
    }

    /// Lowest view-relative index `>= from` holding a set bit.
    pub fn next_set_bit(&self, seq: &BitSeq, from: u64) -> Result<Option<u64>> {
        self.validate(seq)?;
        if from >= self.len {
            return Ok(None);
        }
        Ok(
            scan::next_set_bit(seq.store(), self.first_bit + from, self.len - from)
                .map(|bit| bit - self.first_bit),
        )
    }

    /// Lowest view-relative index `>= from` holding a clear bit.
    pub fn next_clear_bit(&self, seq: &BitSeq, from: u64) -> Result<Option<u64>> {
        self.validate(seq)?;
        if from >= self.len {
            return Ok(None);
        }
        Ok(
            scan::next_clear_bit(seq.store(), self.first_bit + from, self.len - from)
                .map(|bit| bit - self.first_bit),
        )
    }

    /// Highest view-relative index `<= from` holding a set bit; `from` is
    /// clamped to the window's last index.
    pub fn prev_set_bit(&self, seq: &BitSeq, from: u64) -> Result<Option<u64>> {
        self.validate(seq)?;
        if self.len == 0 {
            return Ok(None);
        }
        let from = from.min(self.len - 1);
        Ok(scan::prev_set_bit(seq.store(), self.first_bit, from + 1)
            .map(|bit| bit - self.first_bit))
    }

    /// Highest view-relative index `<= from` holding a clear bit.
    pub fn prev_clear_bit(&self, seq: &BitSeq, from: u64) -> Result<Option<u64>> {
        self.validate(seq)?;
        if self.len == 0 {
            return Ok(None);
        }
        let from = from.min(self.len - 1);
        Ok(scan::prev_clear_bit(seq.store(), self.first_bit, from + 1)
            .map(|bit| bit - self.first_bit))
    }

    /// Fills the window with the given bit value.
    pub fn fill(&self, seq: &mut BitSeq, value: bool) -> Result<()> {
        self.validate(seq)?;
        if value {
            seq.set_range(self.first_bit, self.len)
        } else {
            seq.clear_range(self.first_bit, self.len)
        }
    }

    /// Inverts every bit of the window.
    pub fn flip(&self, seq: &mut BitSeq) -> Result<()> {
        self.validate(seq)?;
        seq.flip_range(self.first_bit, self.len)
    }

    /// Copies the window out into a fresh sequence.
    pub fn extract(&self, seq: &BitSeq) -> Result<BitSeq> {
        self.validate(seq)?;
        seq.extract(self.first_bit, self.len)
    }

    /// Inserts the low `width` bits of `value` before view-relative `pos`,
    /// growing both the base and this view. The view re-stamps itself, so it
    /// stays valid; every other view over the base goes stale unless the
    /// edit happened to be a pure tail append.
    pub fn insert_bits(
        &mut self,
        seq: &mut BitSeq,
        pos: u64,
        value: u64,
        width: u32,
    ) -> Result<()> {
        self.validate(seq)?;
        verify_arg!(pos, pos <= self.len);
        seq.insert_bits(self.first_bit + pos, value, width)?;
        self.len += width as u64;
        self.expected_generation = seq.generation();
        Ok(())
    }

    /// Inserts a whole sequence before view-relative `pos`.
    pub fn insert(&mut self, seq: &mut BitSeq, pos: u64, src: &BitSeq) -> Result<()> {
        self.validate(seq)?;
        verify_arg!(pos, pos <= self.len);
        seq.insert(self.first_bit + pos, src)?;
        self.len += src.len();
        self.expected_generation = seq.generation();
        Ok(())
    }

    /// Appends one bit at the window's back, growing the view.
    pub fn push(&mut self, seq: &mut BitSeq, bit: bool) -> Result<()> {
        self.insert_bits(seq, self.len, bit as u64, 1)
    }

    /// Deletes `[pos, pos + count)` from the window, shrinking both the base
    /// and this view.
    pub fn delete(&mut self, seq: &mut BitSeq, pos: u64, count: u64) -> Result<()> {
        self.validate(seq)?;
        verify_arg!(pos, pos <= self.len);
        verify_arg!(count, count <= self.len - pos);
        seq.delete(self.first_bit + pos, count)?;
        self.len -= count;
        self.expected_generation = seq.generation();
        Ok(())
    }

    /// A view over `[offset, offset + len)` of this window, stamped with the
    /// same generation.
    pub fn subview(&self, offset: u64, len: u64) -> Result<RangeView> {
        verify_arg!(offset, offset <= self.len);
        verify_arg!(len, len <= self.len - offset);
        Ok(RangeView {
            first_bit: self.first_bit + offset,
            len,
            expected_generation: self.expected_generation,
        })
    }
}
