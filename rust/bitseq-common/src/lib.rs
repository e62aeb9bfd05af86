//! Core definitions (errors, results, argument verification), relied upon by
//! the bitseq-* crates.

pub mod error;
pub mod result;

pub use result::Result;
