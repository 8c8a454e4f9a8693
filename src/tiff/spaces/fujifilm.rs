//! Fujifilm maker notes
//!
//! An eight-byte label followed by the second half of a TIFF header:
//! the four-byte position of the IFD, relative to the start of the
//! maker note. The block is always little-endian, even when the
//! enclosing Exif block is big-endian (as in the Leica Digilux 4.3).

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::Ifd;
use crate::tiff::spaces::{Base, TagSpace};
use crate::tiff::tree::IfdNode;

/// The usual Fujifilm maker note label
pub const FUJIFILM1_LABEL: [u8; 8] = *b"FUJIFILM";

/// Label used by the GE E1255W
pub const GENERALE_LABEL: [u8; 8] = *b"GENERALE";

/// Record for Fujifilm1 maker notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fujifilm1Rec {
    /// The label the note was read with, kept for re-serialization
    pub label: Vec<u8>,
}

impl Default for Fujifilm1Rec {
    fn default() -> Self {
        Fujifilm1Rec { label: FUJIFILM1_LABEL.to_vec() }
    }
}

impl Fujifilm1Rec {
    /// Label plus the four-byte IFD position
    pub fn prefix_size(&self) -> u32 {
        self.label.len() as u32 + 4
    }
}

/// Consume the label and IFD position, switching the node to the
/// note-relative buffer base.
pub(crate) fn read_prologue(
    rec: &mut Fujifilm1Rec,
    ifd: &mut Ifd,
    buf: &[u8],
    pos: u32,
) -> TiffResult<Base> {
    let note = &buf[pos as usize..];
    if note.starts_with(&FUJIFILM1_LABEL) {
        rec.label = FUJIFILM1_LABEL.to_vec();
    } else if note.starts_with(&GENERALE_LABEL) {
        rec.label = GENERALE_LABEL.to_vec();
    } else {
        return Err(TiffError::MakerNoteLabelMismatch(TagSpace::Fujifilm1));
    }
    // Must be read as little-endian regardless of the Exif order.
    ifd.order = ByteOrder::LittleEndian;
    let lablen = rec.label.len();
    if note.len() < lablen + 4 {
        return Err(TiffError::MakerNoteLabelMismatch(TagSpace::Fujifilm1));
    }
    let ifd_pos = ifd.order.read_u32(&note[lablen..]);
    Ok(Base::Relative { start: pos, pos: ifd_pos })
}

/// Serialize the label, the IFD position, and the tree on the
/// note-relative base.
pub(crate) fn write_tree(
    rec: &Fujifilm1Rec,
    node: &IfdNode,
    buf: &mut [u8],
    pos: u32,
) -> TiffResult<u32> {
    let lablen = rec.label.len();
    let start = lablen as u32 + 4;
    let note = &mut buf[pos as usize..];
    note[..lablen].copy_from_slice(&rec.label);
    node.ifd.order.write_u32(&mut note[lablen..], start);
    let end = node.generic_write_tree(note, start)?;
    Ok(pos + end)
}
