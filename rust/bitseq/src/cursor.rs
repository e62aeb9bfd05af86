//! A reusable traversal descriptor over a declared `(offset, len)` bit
//! window of a word source.
//!
//! The cursor walks the window word by word (forward or backward — one
//! direction per instance), yielding whole storage words whose margin bits
//! (the bits of a boundary word lying outside the window) are forced to a
//! caller-chosen fill bit. The aligned variants instead yield up to 64
//! window bits left-aligned to window position 0, which is what two-operand
//! algorithms need when the operands' offsets differ mod 64.
//!
//! Advancing a cursor past exhaustion is a programming error and panics;
//! no user input can produce it.

use crate::align::{fill_margin_high, fill_margin_low, high_mask, low_mask, read_word_at, splice, write_bits_at};
use crate::word_store::{WordSource, WordStore};

const NOT_STARTED: u64 = u64::MAX;

/// Stateful walker over the window `[offset, offset + len)`.
pub(crate) struct RangeCursor {
    /// Absolute bit offset of the window start.
    offset: u64,
    /// Window length in bits.
    len: u64,
    /// Window bits not yet yielded. Strictly decreases to zero exactly when
    /// the window is exhausted.
    remaining: u64,
    /// Current storage word, or `NOT_STARTED`. Moves monotonically toward
    /// `last_word` (forward) or `first_word` (backward).
    word_index: u64,
    first_word: u64,
    last_word: u64,
    /// Out-of-window bits at the high end of the first word.
    left_margin: u32,
    /// Out-of-window bits at the low end of the last word.
    right_margin: u32,
    /// Position and width of the last aligned yield, for `write_chunk`.
    chunk_pos: u64,
    chunk_width: u32,
}

impl RangeCursor {
    pub fn new(offset: u64, len: u64) -> RangeCursor {
        let first_word = offset / 64;
        let last_bit = if len == 0 { offset } else { offset + len - 1 };
        RangeCursor {
            offset,
            len,
            remaining: len,
            word_index: NOT_STARTED,
            first_word,
            last_word: last_bit / 64,
            left_margin: (offset % 64) as u32,
            right_margin: (63 - last_bit % 64) as u32,
            chunk_pos: 0,
            chunk_width: 0,
        }
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    #[inline]
    pub fn has_prev(&self) -> bool {
        self.remaining > 0
    }

    /// Storage word index of the last yield of `next_word`/`prev_word`.
    #[inline]
    pub fn word_index(&self) -> u64 {
        assert!(self.word_index != NOT_STARTED, "range cursor not started");
        self.word_index
    }

    /// Yields the next storage word of the window, with margin bits of the
    /// boundary words forced to `fill`. `fill = false` doubles as the masked
    /// variant used when only in-window bits matter (e.g. bit counting).
    pub fn next_word<S: WordSource + ?Sized>(&mut self, src: &S, fill: bool) -> u64 {
        assert!(self.remaining > 0, "range cursor advanced past exhaustion");
        let word_index = if self.word_index == NOT_STARTED {
            self.first_word
        } else {
            self.word_index + 1
        };
        self.word_index = word_index;
        self.remaining -= self.window_bits_of(word_index);
        self.masked_word(src, word_index, fill)
    }

    /// Yields the previous storage word of the window (starting from the
    /// last), with margins forced to `fill`.
    pub fn prev_word<S: WordSource + ?Sized>(&mut self, src: &S, fill: bool) -> u64 {
        assert!(self.remaining > 0, "range cursor advanced past exhaustion");
        let word_index = if self.word_index == NOT_STARTED {
            self.last_word
        } else {
            self.word_index - 1
        };
        self.word_index = word_index;
        self.remaining -= self.window_bits_of(word_index);
        self.masked_word(src, word_index, fill)
    }

    /// Writes a word back at the position of the last `next_word`/`prev_word`
    /// yield, splicing the store's original margin bits over the boundary
    /// portions so nothing outside the window changes.
    pub fn write_word(&self, store: &mut WordStore, word: u64) {
        let word_index = self.word_index();
        let mut keep = 0u64;
        if word_index == self.first_word {
            keep |= high_mask(self.left_margin);
        }
        if word_index == self.last_word {
            keep |= low_mask(self.right_margin);
        }
        let cell = &mut store.words_mut()[word_index as usize];
        *cell = splice(*cell, word, keep);
    }

    /// Yields the next up-to-64 window bits left-aligned to window position
    /// 0; bits of the result past the chunk width are forced to `fill`.
    pub fn next_aligned<S: WordSource + ?Sized>(&mut self, src: &S, fill: bool) -> u64 {
        assert!(self.remaining > 0, "range cursor advanced past exhaustion");
        let width = self.remaining.min(64) as u32;
        let pos = self.offset + (self.len - self.remaining);
        self.remaining -= width as u64;
        self.chunk_pos = pos;
        self.chunk_width = width;
        fill_margin_low(read_word_at(src, pos), 64 - width, fill)
    }

    /// Yields the last up-to-64 unconsumed window bits, left-aligned, walking
    /// the window back to front.
    pub fn prev_aligned<S: WordSource + ?Sized>(&mut self, src: &S, fill: bool) -> u64 {
        assert!(self.remaining > 0, "range cursor advanced past exhaustion");
        let width = self.remaining.min(64) as u32;
        let pos = self.offset + self.remaining - width as u64;
        self.remaining -= width as u64;
        self.chunk_pos = pos;
        self.chunk_width = width;
        fill_margin_low(read_word_at(src, pos), 64 - width, fill)
    }

    /// Advances the aligned walk one chunk without reading, for write-only
    /// consumers that produce the chunk from elsewhere.
    pub fn skip_aligned(&mut self) {
        assert!(self.remaining > 0, "range cursor advanced past exhaustion");
        let width = self.remaining.min(64) as u32;
        self.chunk_pos = self.offset + (self.len - self.remaining);
        self.chunk_width = width;
        self.remaining -= width as u64;
    }

    /// Backward counterpart of `skip_aligned`.
    pub fn skip_prev_aligned(&mut self) {
        assert!(self.remaining > 0, "range cursor advanced past exhaustion");
        let width = self.remaining.min(64) as u32;
        self.chunk_pos = self.offset + self.remaining - width as u64;
        self.chunk_width = width;
        self.remaining -= width as u64;
    }

    /// Writes the top `chunk_width` bits of `word` back at the position of
    /// the last aligned yield.
    pub fn write_chunk(&self, store: &mut WordStore, word: u64) {
        assert!(self.chunk_width > 0, "range cursor has no pending chunk");
        write_bits_at(store, self.chunk_pos, self.chunk_width, word);
    }

    /// Number of window bits contained in storage word `word_index`.
    #[inline]
    fn window_bits_of(&self, word_index: u64) -> u64 {
        let lm = if word_index == self.first_word { self.left_margin } else { 0 };
        let rm = if word_index == self.last_word { self.right_margin } else { 0 };
        (64 - lm - rm) as u64
    }

    fn masked_word<S: WordSource + ?Sized>(&self, src: &S, word_index: u64, fill: bool) -> u64 {
        let mut word = src.word(word_index);
        if word_index == self.first_word {
            word = fill_margin_high(word, self.left_margin, fill);
        }
        if word_index == self.last_word {
            word = fill_margin_low(word, self.right_margin, fill);
        }
        word
    }
}
