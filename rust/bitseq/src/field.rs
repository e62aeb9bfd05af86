//! Fixed-position field descriptors.

use std::fmt;

/// Position and width of a fixed field inside a bit sequence, for callers
/// that address the same region repeatedly (record headers, packed structs).
///
/// A `BitField` carries no generation stamp: it is a plain coordinate pair,
/// revalidated against the sequence bounds on every access. Fields wider
/// than 64 bits can be filled and viewed, but not read or written as a
/// single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    /// Absolute bit offset of the field start.
    pub offset: u64,
    /// Field width in bits.
    pub len: u64,
}

impl BitField {
    pub const fn new(offset: u64, len: u64) -> BitField {
        BitField { offset, len }
    }

    /// First bit offset past the field.
    #[inline]
    pub const fn end(&self) -> u64 {
        self.offset + self.len
    }

    /// A field of the same width starting right after this one.
    pub const fn next(&self) -> BitField {
        BitField {
            offset: self.offset + self.len,
            len: self.len,
        }
    }
}

impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.offset, self.end())
    }
}
