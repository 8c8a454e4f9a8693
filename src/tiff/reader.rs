//! IFD table reader
//!
//! Decodes a single 12-byte-entry table from a buffer, resolving
//! inline and out-of-line field data and pairing offset fields with
//! size fields into image data. Damaged tables are salvaged rather
//! than rejected: a truncated table yields the fields that fit, a
//! field whose data lies outside the buffer is skipped, and the
//! problems are recorded as soft errors.

use log::{debug, warn};

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{ErrorList, TiffError, TiffResult};
use crate::tiff::field::Field;
use crate::tiff::image_data::{extract_image_data, ImageData, ImageDataSpec};
use crate::tiff::types::FieldType;

/// Size of a single IFD table entry
pub const TABLE_ENTRY_SIZE: u32 = 12;

/// Serialized size of an IFD table with the given number of entries
pub fn table_size(entries: u16) -> u32 {
    2 + entries as u32 * TABLE_ENTRY_SIZE + 4
}

/// The result of reading one IFD table
#[derive(Debug)]
pub struct TableRead {
    /// Decoded fields, with owned copies of their data
    pub fields: Vec<Field>,
    /// Position of each field's data within the buffer, parallel to
    /// `fields`; the position of the inline payload bytes for small
    /// values
    pub data_positions: Vec<u32>,
    /// Position of the next IFD, or 0 if none
    pub next: u32,
    /// Image data addressed by this table's offset fields
    pub image_data: Vec<ImageData>,
}

/// Read an IFD table at `pos`
///
/// `specs` names the offset/size field pairs that address image data
/// in this IFD's namespace. `read_next` is false for dialects whose
/// tables are not followed by a next pointer. Recoverable problems are
/// recorded in `errors`; the only hard failure is a table position
/// outside the buffer.
pub fn read_ifd(
    buf: &[u8],
    order: ByteOrder,
    pos: u32,
    specs: &[ImageDataSpec],
    read_next: bool,
    errors: &mut ErrorList,
) -> TiffResult<TableRead> {
    let buflen = buf.len() as u64;
    let trailer = if read_next { 4u64 } else { 0 };
    if pos as u64 + 2 > buflen {
        return Err(TiffError::IfdPositionOutOfRange(pos));
    }
    let declared = order.read_u16(&buf[pos as usize..]);
    if declared == 0 {
        // Technically invalid; report it but keep whatever chain
        // information is present.
        errors.push(TiffError::EmptyIfd(pos));
        let next = if read_next && pos as u64 + 6 <= buflen {
            order.read_u32(&buf[pos as usize + 2..])
        } else {
            0
        };
        return Ok(TableRead {
            fields: Vec::new(),
            data_positions: Vec::new(),
            next,
            image_data: Vec::new(),
        });
    }

    let mut entries = declared;
    let mut salvage = false;
    if pos as u64 + 2 + declared as u64 * TABLE_ENTRY_SIZE as u64 + trailer > buflen {
        // The declared entry count runs past the buffer. Keep as many
        // entries as physically fit and stop at the first descending
        // tag, since the tail is likely garbage.
        errors.push(TiffError::IfdTruncated { pos, entries: declared });
        salvage = true;
        let avail = buflen.saturating_sub(pos as u64 + 2 + trailer);
        entries = (avail / TABLE_ENTRY_SIZE as u64).min(u16::MAX as u64) as u16;
        warn!(
            "IFD at {} claims {} entries but only {} fit; salvaging",
            pos, declared, entries
        );
    }

    let mut fields = Vec::with_capacity(entries as usize);
    let mut data_positions = Vec::with_capacity(entries as usize);
    let mut last_tag = 0u16;
    for i in 0..entries {
        let epos = (pos + 2 + i as u32 * TABLE_ENTRY_SIZE) as usize;
        let tag = order.read_u16(&buf[epos..]);
        if salvage && tag < last_tag {
            debug!("Salvage stopped at entry {}: tag {} after {}", i, tag, last_tag);
            break;
        }
        last_tag = tag;
        let field_type = FieldType::from_code(order.read_u16(&buf[epos + 2..]));
        let count = order.read_u32(&buf[epos + 4..]);
        let size = field_type.size() as u64 * count as u64;
        let data_pos = if size <= 4 {
            epos as u32 + 8
        } else {
            let data_pos = order.read_u32(&buf[epos + 8..]);
            if data_pos as u64 + size > buflen {
                errors.push(TiffError::FieldDataOutOfRange { pos, tag });
                continue;
            }
            data_pos
        };
        let data = buf[data_pos as usize..data_pos as usize + size as usize].to_vec();
        fields.push(Field { tag, field_type, count, data });
        data_positions.push(data_pos);
    }

    let image_data = pair_image_data(buf, order, pos, &fields, specs, errors);

    let next = if salvage || !read_next {
        0
    } else {
        order.read_u32(&buf[(pos + 2 + declared as u32 * TABLE_ENTRY_SIZE) as usize..])
    };
    Ok(TableRead { fields, data_positions, next, image_data })
}

/// Pair offset fields with size fields per `specs` and extract the
/// segments they address.
fn pair_image_data(
    buf: &[u8],
    order: ByteOrder,
    pos: u32,
    fields: &[Field],
    specs: &[ImageDataSpec],
    errors: &mut ErrorList,
) -> Vec<ImageData> {
    let mut image_data = Vec::new();
    for spec in specs {
        let offset_field = fields.iter().find(|f| f.tag == spec.offset_tag);
        let size_field = if spec.size_tag != 0 {
            fields.iter().find(|f| f.tag == spec.size_tag)
        } else {
            None
        };
        let offset_field = match offset_field {
            Some(field) => field,
            None => continue,
        };
        if spec.size_tag != 0 && size_field.is_none() {
            // Only half of the pair is present; leave the field alone.
            continue;
        }
        if !offset_field.field_type.is_integral()
            || size_field.map_or(false, |f| !f.field_type.is_integral())
        {
            warn!(
                "Image data fields for tag {} have non-integral types; ignoring",
                spec.offset_tag
            );
            continue;
        }
        match extract_image_data(buf, order, offset_field, size_field, pos) {
            Ok(data) => image_data.push(data),
            Err(error) => errors.push(error),
        }
    }
    image_data
}
