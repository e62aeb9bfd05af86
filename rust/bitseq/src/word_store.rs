//! Raw word-packed storage: a resizable array of `u64` words plus a logical
//! bit length, and the constant (all-zero / all-one) virtual source.

use bitseq_common::{Result, error::Error};

/// Read access to word-packed bit storage.
///
/// Implemented by the owned [`WordStore`] and by [`ConstantSource`]. The
/// contract deliberately defines `word` for *every* index: owned storage
/// reads zero past its capacity, a constant source reads its fill word
/// everywhere. This lets the cursor and the aligned readers walk up to the
/// very last word of a window without tail branches.
pub(crate) trait WordSource {
    /// Returns the storage word at `index`.
    fn word(&self, index: u64) -> u64;

    /// Logical length of the sequence in bits.
    fn bit_len(&self) -> u64;
}

/// A resizable array of 64-bit words with a logical bit length.
///
/// Bit `i` lives in word `i / 64`; bit 0 is the most significant bit of word
/// 0 (big-endian by index). Bits at index `>= len` are unspecified garbage:
/// they are never required to be zero, and no read path exposes them.
///
/// The store grows by reallocation and never shrinks implicitly; `trim`
/// drops unused trailing words. `generation` counts the length-changing
/// edits that can invalidate outstanding range views; a pure append at the
/// tail does not count, since no offset already in use can move.
#[derive(Clone, Default)]
pub(crate) struct WordStore {
    words: Vec<u64>,
    len: u64,
    generation: u64,
}

impl WordStore {
    pub fn new() -> WordStore {
        WordStore::default()
    }

    /// Creates an empty store with room for at least `bits` bits, rounded up
    /// to whole words.
    pub fn with_bit_capacity(bits: u64) -> WordStore {
        WordStore {
            words: vec![0; bits.div_ceil(64) as usize],
            len: 0,
            generation: 0,
        }
    }

    /// Creates a store of length `len` with every bit clear.
    pub fn zeroed(len: u64) -> WordStore {
        WordStore {
            words: vec![0; len.div_ceil(64) as usize],
            len,
            generation: 0,
        }
    }

    /// Creates a store of length `len` by repeating a 64-bit pattern.
    pub fn with_pattern(len: u64, pattern: u64) -> WordStore {
        WordStore {
            words: vec![pattern; len.div_ceil(64) as usize],
            len,
            generation: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Total bit capacity of the allocated words.
    #[inline]
    pub fn word_capacity(&self) -> u64 {
        self.words.len() as u64 * 64
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Marks a structural edit that can break outstanding views.
    #[inline]
    pub fn bump_generation(&mut self) {
        self.generation += 1;
    }

    /// Sets the logical length. The caller is responsible for capacity.
    #[inline]
    pub fn set_len(&mut self, len: u64) {
        debug_assert!(len <= self.word_capacity());
        self.len = len;
    }

    /// Grows the word array so that at least `bits` bits fit. Existing
    /// content is preserved; new words are zeroed.
    pub fn ensure_capacity(&mut self, bits: u64) {
        let needed = bits.div_ceil(64) as usize;
        if needed > self.words.len() {
            log::trace!(
                "word store grow: {} -> {} words (len {} bits)",
                self.words.len(),
                needed,
                self.len
            );
            self.words.resize(needed, 0);
        }
    }

    /// Drops trailing words not covered by the logical length.
    pub fn trim(&mut self) {
        let needed = self.len.div_ceil(64) as usize;
        if needed < self.words.len() {
            log::trace!("word store trim: {} -> {} words", self.words.len(), needed);
            self.words.truncate(needed);
            self.words.shrink_to_fit();
        }
    }

    #[inline]
    pub fn get_bit(&self, index: u64) -> bool {
        debug_assert!(index < self.len, "bit {index} out of bounds (len {})", self.len);
        let word = self.words[(index / 64) as usize];
        (word >> (63 - index % 64)) & 1 != 0
    }

    #[inline]
    pub fn set_bit(&mut self, index: u64, value: bool) {
        debug_assert!(index < self.len, "bit {index} out of bounds (len {})", self.len);
        let mask = 1u64 << (63 - index % 64);
        let word = &mut self.words[(index / 64) as usize];
        *word = (*word & !mask) | (mask & (-(value as i64) as u64));
    }

    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

impl WordSource for WordStore {
    #[inline]
    fn word(&self, index: u64) -> u64 {
        self.words.get(index as usize).copied().unwrap_or(0)
    }

    #[inline]
    fn bit_len(&self) -> u64 {
        self.len
    }
}

/// An immutable, effectively infinite sequence of one fixed word value.
///
/// Used as a virtual operand (range set/clear/flip are boolean combines
/// against a constant) and as a fill source. Every mutating call fails with
/// the unsupported-operation error.
#[derive(Clone, Copy, Debug)]
pub struct ConstantSource {
    fill: bool,
}

impl ConstantSource {
    pub const fn zeros() -> ConstantSource {
        ConstantSource { fill: false }
    }

    pub const fn ones() -> ConstantSource {
        ConstantSource { fill: true }
    }

    /// The word returned for every index.
    #[inline]
    pub fn fill_word(&self) -> u64 {
        if self.fill { u64::MAX } else { 0 }
    }

    pub fn write_word(&mut self, _index: u64, _word: u64) -> Result<()> {
        Err(Error::unsupported_operation("constant_source.write_word"))
    }

    pub fn set_bit(&mut self, _index: u64, _value: bool) -> Result<()> {
        Err(Error::unsupported_operation("constant_source.set_bit"))
    }

    pub fn set_len(&mut self, _len: u64) -> Result<()> {
        Err(Error::unsupported_operation("constant_source.set_len"))
    }
}

impl WordSource for ConstantSource {
    #[inline]
    fn word(&self, _index: u64) -> u64 {
        self.fill_word()
    }

    #[inline]
    fn bit_len(&self) -> u64 {
        u64::MAX
    }
}
