//! TIFF header codec
//!
//! The 8-byte preamble of every TIFF file: a two-byte order mark, the
//! magic number 42, and the absolute position of the 0th IFD.

use log::debug;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// The size of a TIFF header: byte order (2 bytes), magic number
/// (2 bytes), IFD position (4 bytes)
pub const HEADER_SIZE: u32 = 8;

/// Try to read a TIFF header from the start of a buffer
///
/// Returns the byte order and the position of the 0th IFD, or `None`
/// if the buffer is too short, the order mark is unrecognized, the
/// magic number is wrong, or the IFD position is zero (a TIFF file
/// must contain at least one IFD).
pub fn get_header(buf: &[u8]) -> Option<(ByteOrder, u32)> {
    if buf.len() < HEADER_SIZE as usize {
        debug!("Header rejected: buffer of {} bytes is too short", buf.len());
        return None;
    }
    let order = if buf[0..2] == header::LITTLE_ENDIAN_MARKER {
        ByteOrder::LittleEndian
    } else if buf[0..2] == header::BIG_ENDIAN_MARKER {
        ByteOrder::BigEndian
    } else {
        debug!("Header rejected: unrecognized order mark {:02X} {:02X}", buf[0], buf[1]);
        return None;
    };
    if order.read_u16(&buf[2..]) != header::TIFF_MAGIC {
        debug!("Header rejected: bad magic number");
        return None;
    }
    let ifd_pos = order.read_u32(&buf[4..]);
    if ifd_pos == 0 {
        debug!("Header rejected: zero IFD position");
        return None;
    }
    Some((order, ifd_pos))
}

/// Create a TIFF header at the beginning of a buffer
///
/// Writes the order mark, the magic number, and the position of the
/// 0th IFD. Eight bytes are used.
pub fn put_header(buf: &mut [u8], order: ByteOrder, ifd_pos: u32) -> TiffResult<()> {
    if buf.len() < HEADER_SIZE as usize {
        return Err(TiffError::BufferTooSmall {
            needed: HEADER_SIZE as usize,
            actual: buf.len(),
        });
    }
    let marker = match order {
        ByteOrder::LittleEndian => header::LITTLE_ENDIAN_MARKER,
        ByteOrder::BigEndian => header::BIG_ENDIAN_MARKER,
    };
    buf[0..2].copy_from_slice(&marker);
    order.write_u16(&mut buf[2..], header::TIFF_MAGIC);
    order.write_u32(&mut buf[4..], ifd_pos);
    Ok(())
}
