//! Bulk bit-range algorithms, built on the range cursor and the alignment
//! primitives. All functions here assume their windows were validated at the
//! public boundary; offsets and lengths are trusted.

pub(crate) mod combine;
pub(crate) mod copy;
pub(crate) mod reverse;
pub(crate) mod rotate;
pub(crate) mod scan;
pub(crate) mod shift;
