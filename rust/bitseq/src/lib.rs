//! Mutable, arbitrary-length bit sequences over packed 64-bit words.
//!
//! The central type is [`BitSeq`]: a growable sequence of bits addressable
//! by `u64` offset, with word-at-a-time algorithms for boolean algebra,
//! copying, shifting, rotation, reversal and scans over arbitrary
//! `(offset, len)` windows — including operations that treat two sequences
//! as one concatenated stream. [`RangeView`] provides generation-stamped
//! window handles that detect structural edits made behind their back, and
//! [`BitField`] names a fixed `(offset, len)` region for repeated access.
//!
//! Bits are ordered most-significant-first within each storage word: bit 0
//! of the sequence is the MSB of word 0. Multi-bit values move in and out
//! as right-aligned `u64`s.

mod align;
mod bit_seq;
mod cursor;
mod field;
mod ops;
mod view;
mod word_store;

pub use bit_seq::BitSeq;
pub use field::BitField;
pub use view::RangeView;
pub use word_store::ConstantSource;

#[cfg(test)]
mod tests;
