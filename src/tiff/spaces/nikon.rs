//! Nikon maker notes
//!
//! Nikon has used three layouts. Nikon1 is a fixed "Nikon\0\x01\0"
//! label followed by a bare IFD with absolute offsets. Nikon2 with a
//! label wraps a complete inner TIFF block, byte order and all, with
//! offsets relative to that inner header; early cameras such as the
//! Coolpix 775 and 990 use the same tags but no label or header at
//! all. The Nikon2 preview and scan sub-IFDs get their own
//! namespaces.

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::nikon2_tags;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::Field;
use crate::tiff::header::{get_header, put_header, HEADER_SIZE};
use crate::tiff::ifd::Ifd;
use crate::tiff::spaces::makernote::detect_byte_order;
use crate::tiff::spaces::{Base, TagSpace};
use crate::tiff::tree::{recurse_sub_ifds, IfdNode, ParseCtx, SubIfd};
use crate::tiff::types::FieldType;

/// The fixed Nikon1 maker note label
pub const NIKON1_LABEL: [u8; 8] = *b"Nikon\0\x01\0";

/// Prefix shared by all labeled Nikon2 maker notes; four
/// version/type bytes follow it
pub const NIKON2_LABEL_PREFIX: [u8; 6] = *b"Nikon\0";

/// Record for Nikon1 maker notes; the dialect carries no state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nikon1Rec;

/// Record for Nikon2 maker notes
///
/// The label varies by model but the tags are compatible. Model
/// examples: Coolpix 990 has no label at all, the Coolpix 5000 uses
/// "Nikon\0\x02\0\0\0", the D5100 "Nikon\0\x02\x10\0\0", and the D500
/// "Nikon\0\x02\x11\0\0". An empty label means the unlabeled layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Nikon2Rec {
    pub label: Vec<u8>,
}

impl Nikon2Rec {
    /// Label plus the inner TIFF header, or nothing for the unlabeled
    /// layout
    pub fn prefix_size(&self) -> u32 {
        if self.label.is_empty() {
            0
        } else {
            self.label.len() as u32 + HEADER_SIZE
        }
    }
}

/// Record for Nikon2 preview IFDs; the preview image pairing is
/// handled by the image data specs for the namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nikon2PreviewRec;

/// Consume the Nikon2 label and inner TIFF header if present,
/// otherwise detect the byte order of the bare table.
pub(crate) fn read_nikon2_prologue(
    rec: &mut Nikon2Rec,
    ifd: &mut Ifd,
    buf: &[u8],
    pos: u32,
) -> TiffResult<Base> {
    let note = &buf[pos as usize..];
    if note.starts_with(&NIKON2_LABEL_PREFIX) {
        let lablen = NIKON2_LABEL_PREFIX.len() + 4;
        if note.len() < lablen + HEADER_SIZE as usize {
            return Err(TiffError::GenericError(
                "TIFF header not found in Nikon2 maker note".to_string(),
            ));
        }
        rec.label = note[..lablen].to_vec();
        // The note contains a new TIFF block with relative offsets.
        let tiff_start = pos + lablen as u32;
        let (order, ifd_pos) = get_header(&buf[tiff_start as usize..]).ok_or_else(|| {
            TiffError::GenericError("TIFF header not found in Nikon2 maker note".to_string())
        })?;
        ifd.order = order;
        Ok(Base::Relative { start: tiff_start, pos: ifd_pos })
    } else {
        // Unlabeled note; the byte order may differ from the Exif
        // block.
        rec.label.clear();
        ifd.order = detect_byte_order(note);
        Ok(Base::Absolute(pos))
    }
}

/// Serialize a Nikon1 note: label, then the tree on the absolute base.
pub(crate) fn write_nikon1_tree(node: &IfdNode, buf: &mut [u8], pos: u32) -> TiffResult<u32> {
    buf[pos as usize..pos as usize + NIKON1_LABEL.len()].copy_from_slice(&NIKON1_LABEL);
    node.generic_write_tree(buf, pos + NIKON1_LABEL.len() as u32)
}

/// Serialize a Nikon2 note: label and inner TIFF block if labeled,
/// bare tree otherwise.
pub(crate) fn write_nikon2_tree(
    rec: &Nikon2Rec,
    node: &IfdNode,
    buf: &mut [u8],
    pos: u32,
) -> TiffResult<u32> {
    if rec.label.is_empty() {
        return node.generic_write_tree(buf, pos);
    }
    let lablen = rec.label.len();
    buf[pos as usize..pos as usize + lablen].copy_from_slice(&rec.label);
    let inner = &mut buf[pos as usize + lablen..];
    put_header(inner, node.ifd.order, HEADER_SIZE)?;
    let end = node.generic_write_tree(inner, HEADER_SIZE)?;
    Ok(pos + lablen as u32 + end)
}

/// Identify the sub-IFDs a Nikon2 field refers to
pub(crate) fn take_nikon2_field(
    buf: &[u8],
    order: ByteOrder,
    field: &Field,
    ctx: &mut ParseCtx,
) -> Vec<SubIfd> {
    if field.field_type != FieldType::Ifd
        && field.tag != nikon2_tags::PREVIEW_IFD
        && field.tag != nikon2_tags::NIKON_SCAN_IFD
    {
        return Vec::new();
    }
    let subspace = match field.tag {
        nikon2_tags::PREVIEW_IFD => TagSpace::Nikon2Preview,
        nikon2_tags::NIKON_SCAN_IFD => TagSpace::Nikon2Scan,
        _ => TagSpace::Nikon2,
    };
    recurse_sub_ifds(buf, order, field, subspace, ctx)
}

/// Identify the sub-IFDs a Nikon2 preview field refers to; IFD fields
/// aren't usually present in this namespace
pub(crate) fn take_preview_field(
    buf: &[u8],
    order: ByteOrder,
    field: &Field,
    ctx: &mut ParseCtx,
) -> Vec<SubIfd> {
    if field.field_type == FieldType::Ifd {
        recurse_sub_ifds(buf, order, field, TagSpace::Nikon2Preview, ctx)
    } else {
        Vec::new()
    }
}

/// Check that an unlabeled payload parsed as Nikon2 really looks like
/// one: the MakerNoteVersion field must be present as four UNDEFINED
/// bytes.
pub(crate) fn looks_like_nikon2(node: &IfdNode) -> bool {
    let fields = node.ifd.find_fields(&[nikon2_tags::MAKER_NOTE_VERSION]);
    fields.len() == 1
        && fields[0].field_type == FieldType::Undefined
        && fields[0].count == 4
}
