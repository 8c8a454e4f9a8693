//! Sony maker notes
//!
//! A twelve-byte label from a small family of literals, followed by a
//! bare IFD with absolute offsets. The byte order varies by camera
//! model and is detected from the entry count. The table is not
//! followed by a next pointer; the slot is often invalid and is never
//! read.

use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::Ifd;
use crate::tiff::spaces::makernote::detect_byte_order;
use crate::tiff::spaces::{Base, TagSpace};
use crate::tiff::tree::IfdNode;

/// The labels that introduce a Sony1 maker note
pub const SONY1_LABELS: [[u8; 12]; 5] = [
    // Includes various Sony camcorders.
    *b"SONY CAM \0\0\0",
    // Includes various Sony still cameras.
    *b"SONY DSC \0\0\0",
    // Sony DSC-TF1.
    *b"\0\0SONY PIC\0\0",
    // Sony Xperia.
    *b"SONY MOBILE\0",
    // Hasselblad versions of Sony cameras.
    *b"VHAB     \0\0\0",
];

/// Record for Sony1 maker notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sony1Rec {
    /// The label the note was read with, kept for re-serialization
    pub label: Vec<u8>,
}

impl Default for Sony1Rec {
    fn default() -> Self {
        Sony1Rec { label: SONY1_LABELS[1].to_vec() }
    }
}

/// Consume the label and detect the byte order of the table.
pub(crate) fn read_prologue(
    rec: &mut Sony1Rec,
    ifd: &mut Ifd,
    buf: &[u8],
    pos: u32,
) -> TiffResult<Base> {
    let note = &buf[pos as usize..];
    for label in &SONY1_LABELS {
        if note.starts_with(label) {
            rec.label = label.to_vec();
            let ifd_pos = pos + label.len() as u32;
            // Byte order varies by camera model and may differ from
            // the Exif order.
            ifd.order = detect_byte_order(&note[label.len()..]);
            return Ok(Base::Absolute(ifd_pos));
        }
    }
    Err(TiffError::MakerNoteLabelMismatch(TagSpace::Sony1))
}

/// Serialize the label and the tree on the absolute base.
pub(crate) fn write_tree(
    rec: &Sony1Rec,
    node: &IfdNode,
    buf: &mut [u8],
    pos: u32,
) -> TiffResult<u32> {
    buf[pos as usize..pos as usize + rec.label.len()].copy_from_slice(&rec.label);
    node.generic_write_tree(buf, pos + rec.label.len() as u32)
}
