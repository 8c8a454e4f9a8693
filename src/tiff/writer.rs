//! IFD table writer
//!
//! Serializes one IFD into a caller-supplied buffer in three zones:
//! the table itself, the image data segments, then any field data too
//! large to store inline. Offset fields are patched to the positions
//! where their segments actually land, and fields that refer to
//! sub-IFDs receive the positions chosen for them by the tree walker.

use std::collections::HashMap;

use log::trace;

use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::Ifd;
use crate::tiff::types::FieldType;

/// Offsets at or above this cannot be stored in a SHORT offset field;
/// `Ifd::fix` promotes such fields to LONG before serialization.
pub const SHORT_OFFSET_LIMIT: u32 = 65536;

/// Align a position to the next word (2 byte) boundary
pub fn align(pos: u32) -> u32 {
    if pos % 2 != 0 {
        pos + 1
    } else {
        pos
    }
}

/// The serialized position of a sub-IFD, as chosen by the tree walker
#[derive(Debug, Clone, Copy)]
pub struct SubIfdPos {
    /// Field that refers to the sub-IFD
    pub tag: u16,
    pub pos: u32,
    /// Serialized size of the sub-tree; used for maker notes stored as
    /// inline arrays
    pub size: u32,
}

/// Serialize an IFD and its external data into `buf` at `pos`
///
/// `buf` must represent a serialized TIFF file with the start of the
/// file at the start of the slice, and must be large enough for the
/// new data. `pos` must be word aligned and the field tags must be in
/// ascending order. `sub_positions` supplies the positions of any
/// sub-IFDs referred to by fields of this IFD, and `next` the position
/// of the next IFD or 0 if none. Returns the position following the
/// last byte used.
pub fn put_ifd(
    buf: &mut [u8],
    ifd: &Ifd,
    pos: u32,
    sub_positions: &[SubIfdPos],
    next: u32,
) -> TiffResult<u32> {
    let order = ifd.order;
    if pos % 2 != 0 {
        return Err(TiffError::UnalignedPosition(pos));
    }
    if ifd.fields.is_empty() {
        // The TIFF specification requires at least one entry per IFD;
        // callers are expected to run delete_empty_ifds first.
        return Err(TiffError::EmptyIfd(pos));
    }

    // Zone order in the buffer: 1) table 2) image data 3) external
    // field data.
    let datapos = pos + ifd.table_size();
    let (mut datapos, offset_arrays) = put_image_data(buf, ifd, datapos)?;

    order.write_u16(&mut buf[pos as usize..], ifd.fields.len() as u16);
    let mut entry_pos = pos + 2;
    let mut last_tag = 0u16;
    for field in &ifd.fields {
        if field.tag < last_tag {
            return Err(TiffError::TagsOutOfOrder { previous: last_tag, tag: field.tag });
        }
        last_tag = field.tag;
        order.write_u16(&mut buf[entry_pos as usize..], field.tag);
        order.write_u16(&mut buf[entry_pos as usize + 2..], field.field_type.code());

        // Two kinds of sub-IFD references exist. Fields of a 4-byte
        // type hold pointers to one or more sub-IFDs. Fields that are
        // arrays of single-byte values, such as maker notes, contain a
        // whole serialized sub-tree: their count slot receives the
        // sub-tree's size and their value slot its position.
        let subs: Vec<&SubIfdPos> =
            sub_positions.iter().filter(|sub| sub.tag == field.tag).collect();
        if !subs.is_empty() && field.field_type.size() == 1 {
            if subs.len() > 1 {
                return Err(TiffError::GenericError(format!(
                    "field {} expected to embed a single sub-IFD, found {}",
                    field.tag,
                    subs.len()
                )));
            }
            if subs[0].size < 5 {
                return Err(TiffError::GenericError(format!(
                    "embedded sub-IFD for field {} is too small to store out of line",
                    field.tag
                )));
            }
            order.write_u32(&mut buf[entry_pos as usize + 4..], subs[0].size);
            order.write_u32(&mut buf[entry_pos as usize + 8..], subs[0].pos);
            entry_pos += 12;
            continue;
        }

        order.write_u32(&mut buf[entry_pos as usize + 4..], field.count);
        let size = field.size();
        let mut data = &field.data[..];
        let pointer_data;
        if !subs.is_empty() {
            // Field points to one or more sub-IFDs.
            if field.field_type.size() != 4 {
                return Err(TiffError::GenericError(format!(
                    "sub-IFD pointer field {} does not have a 4-byte type",
                    field.tag
                )));
            }
            let mut bytes = vec![0u8; size as usize];
            for (i, sub) in subs.iter().enumerate() {
                order.write_u32(&mut bytes[i * 4..], sub.pos);
            }
            pointer_data = bytes;
            data = &pointer_data;
        } else if let Some(offsets) = offset_arrays.get(&field.tag) {
            // Image data offset field: substitute the rewritten
            // offsets.
            data = offsets;
        }

        if size <= 4 {
            // Inline payload, right-padded with NULs.
            buf[entry_pos as usize + 8..entry_pos as usize + 12].fill(0);
            buf[entry_pos as usize + 8..entry_pos as usize + 8 + size as usize]
                .copy_from_slice(&data[..size as usize]);
        } else {
            order.write_u32(&mut buf[entry_pos as usize + 8..], datapos);
            buf[datapos as usize..datapos as usize + size as usize].copy_from_slice(data);
            datapos += size;
        }
        entry_pos += 12;
    }
    order.write_u32(&mut buf[entry_pos as usize..], next);
    Ok(datapos)
}

/// Write the IFD's image data segments at `datapos` and build the
/// rewritten offset array for each offset field. Returns the next free
/// position and a map from offset tag to its new offset array bytes.
fn put_image_data(
    buf: &mut [u8],
    ifd: &Ifd,
    mut datapos: u32,
) -> TiffResult<(u32, HashMap<u16, Vec<u8>>)> {
    let order = ifd.order;
    let mut offset_arrays = HashMap::new();
    for id in &ifd.image_data {
        // Resolve the offset field by tag at write time; fixes may
        // have reallocated it since the image data was attached.
        let offset_field = ifd
            .fields
            .iter()
            .find(|field| field.tag == id.offset_tag)
            .ok_or_else(|| {
                TiffError::GenericError(format!(
                    "image data offset field {} not present in IFD",
                    id.offset_tag
                ))
            })?;
        if id.segments.len() != offset_field.count as usize {
            return Err(TiffError::GenericError(format!(
                "image data for field {} has {} segments but the field count is {}",
                id.offset_tag,
                id.segments.len(),
                offset_field.count
            )));
        }
        let mut offsets = vec![0u8; offset_field.size() as usize];
        for (j, segment) in id.segments.iter().enumerate() {
            buf[datapos as usize..datapos as usize + segment.len()].copy_from_slice(segment);
            match offset_field.field_type {
                FieldType::Long => order.write_u32(&mut offsets[j * 4..], datapos),
                FieldType::Short => {
                    if datapos >= SHORT_OFFSET_LIMIT {
                        return Err(TiffError::ShortOffsetOverflow(datapos));
                    }
                    order.write_u16(&mut offsets[j * 2..], datapos as u16);
                }
                _ => {
                    return Err(TiffError::GenericError(format!(
                        "image data offset field {} is not SHORT or LONG",
                        id.offset_tag
                    )))
                }
            }
            trace!(
                "Image data segment for tag {} written at {} ({} bytes)",
                id.offset_tag,
                datapos,
                segment.len()
            );
            datapos += segment.len() as u32;
        }
        offset_arrays.insert(id.offset_tag, offsets);
    }
    Ok((datapos, offset_arrays))
}
