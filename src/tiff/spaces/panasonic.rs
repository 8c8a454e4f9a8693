//! Panasonic maker notes
//!
//! A "Panasonic\0\0\0" label followed by a bare IFD with absolute
//! offsets in the enclosing block's byte order. The table is not
//! followed by a next pointer, so the footer slot is never read.

/// The fixed Panasonic1 maker note label
pub const PANASONIC1_LABEL: [u8; 12] = *b"Panasonic\0\0\0";

/// Record for Panasonic1 maker notes; the dialect carries no state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panasonic1Rec;
