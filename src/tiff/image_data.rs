//! Image data bookkeeping
//!
//! Strips, tiles, free lists and JPEG streams are stored outside the
//! IFD table and addressed by paired offset/size fields. On read the
//! segments are copied out of the buffer and attached to their IFD; on
//! write they are re-emitted and the offset arrays rewritten.

use log::trace;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::{nikon2_tags, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::Field;

/// A single segment of image data
pub type ImageSegment = Vec<u8>;

/// Tags of a pair of fields that specify image data
///
/// One field holds an array of offsets and the other an array of
/// sizes, e.g. StripOffsets and StripByteCounts. `size_tag` is zero
/// for the old-style JPEG table fields, whose segment sizes are
/// implied by their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDataSpec {
    pub offset_tag: u16,
    pub size_tag: u16,
}

/// Image data segments for a single pair of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub offset_tag: u16,
    pub size_tag: u16,
    pub segments: Vec<ImageSegment>,
}

/// Image data specifications recognized in TIFF-space IFDs
pub const TIFF_IMAGE_DATA: [ImageDataSpec; 7] = [
    ImageDataSpec { offset_tag: tags::STRIP_OFFSETS, size_tag: tags::STRIP_BYTE_COUNTS },
    ImageDataSpec { offset_tag: tags::TILE_OFFSETS, size_tag: tags::TILE_BYTE_COUNTS },
    ImageDataSpec { offset_tag: tags::FREE_OFFSETS, size_tag: tags::FREE_BYTE_COUNTS },
    // Single data block, but works like the others.
    ImageDataSpec {
        offset_tag: tags::JPEG_INTERCHANGE_FORMAT,
        size_tag: tags::JPEG_INTERCHANGE_FORMAT_LENGTH,
    },
    // Obsolete JPEG fields are special cases with implied sizes.
    ImageDataSpec { offset_tag: tags::JPEG_Q_TABLES, size_tag: 0 },
    ImageDataSpec { offset_tag: tags::JPEG_DC_TABLES, size_tag: 0 },
    ImageDataSpec { offset_tag: tags::JPEG_AC_TABLES, size_tag: 0 },
];

/// Image data specification recognized in Nikon2 preview IFDs
pub const NIKON2_PREVIEW_IMAGE_DATA: [ImageDataSpec; 1] = [ImageDataSpec {
    offset_tag: nikon2_tags::PREVIEW_IMAGE_START,
    size_tag: nikon2_tags::PREVIEW_IMAGE_LENGTH,
}];

/// Size of an obsolete JPEG quantization table segment
const JPEG_Q_TABLE_SIZE: u32 = 64;

/// Compute the size of an obsolete JPEG Huffman table at `offset`:
/// a 16-byte BITS table followed by as many values as the BITS bytes
/// sum to.
fn huffman_table_size(buf: &[u8], offset: u32) -> Option<u32> {
    let end = offset.checked_add(16)?;
    if end as usize > buf.len() {
        return None;
    }
    let numvals: u32 = buf[offset as usize..end as usize]
        .iter()
        .map(|&b| b as u32)
        .sum();
    Some(16 + numvals)
}

/// Extract the image data segments addressed by an offset field
///
/// `size_field` supplies the segment sizes, except for the old-style
/// JPEG table tags whose sizes are computed from the buffer contents.
/// `ifd_pos` is only used for error reporting.
pub fn extract_image_data(
    buf: &[u8],
    order: ByteOrder,
    offset_field: &Field,
    size_field: Option<&Field>,
    ifd_pos: u32,
) -> TiffResult<ImageData> {
    let bufsize = buf.len() as u32;
    let out_of_range = || TiffError::ImageDataOutOfRange { pos: ifd_pos, tag: offset_field.tag };
    let mut segments = Vec::with_capacity(offset_field.count as usize);
    for j in 0..offset_field.count {
        let (offset, size) = match offset_field.tag {
            tags::JPEG_Q_TABLES => (offset_field.any_integer(j, order) as u32, JPEG_Q_TABLE_SIZE),
            tags::JPEG_DC_TABLES | tags::JPEG_AC_TABLES => {
                let offset = offset_field.any_integer(j, order) as u32;
                let size = huffman_table_size(buf, offset).ok_or_else(out_of_range)?;
                (offset, size)
            }
            _ => match size_field {
                Some(size_field) => (
                    offset_field.any_integer(j, order) as u32,
                    size_field.any_integer(j, order) as u32,
                ),
                None => (0, 0),
            },
        };
        if size > 0 {
            let end = offset.checked_add(size).ok_or_else(out_of_range)?;
            if end > bufsize {
                return Err(out_of_range());
            }
            trace!(
                "Image data segment for tag {}: {} bytes at offset {}",
                offset_field.tag, size, offset
            );
            segments.push(buf[offset as usize..end as usize].to_vec());
        } else {
            segments.push(Vec::new());
        }
    }
    Ok(ImageData {
        offset_tag: offset_field.tag,
        size_tag: size_field.map(|f| f.tag).unwrap_or(0),
        segments,
    })
}
