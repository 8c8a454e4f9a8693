//! Tests for the IFD table reader

extern crate std;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::tags;
use crate::tiff::errors::{ErrorList, TiffError};
use crate::tiff::header::get_header;
use crate::tiff::image_data::TIFF_IMAGE_DATA;
use crate::tiff::reader::read_ifd;
use crate::tiff::spaces::TagSpace;
use crate::tiff::tree::get_ifd_tree;
use crate::tiff::types::FieldType;

/// A complete minimal TIFF file: one little-endian IFD at offset 8
/// with a single inline SHORT Compression field and no next IFD.
/// 26 bytes: 8 header + 2 entry count + 12 entry + 4 next.
pub fn minimal_tiff() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(0x4949).unwrap(); // II
    buf.write_u16::<LittleEndian>(42).unwrap();
    buf.write_u32::<LittleEndian>(8).unwrap();
    buf.write_u16::<LittleEndian>(1).unwrap(); // entry count
    buf.write_u16::<LittleEndian>(tags::COMPRESSION).unwrap();
    buf.write_u16::<LittleEndian>(3).unwrap(); // SHORT
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(1).unwrap(); // value
    buf.write_u16::<LittleEndian>(0).unwrap(); // inline padding
    buf.write_u32::<LittleEndian>(0).unwrap(); // next
    buf
}

#[test]
fn test_minimal_single_ifd_file() {
    let buf = minimal_tiff();
    std::assert_eq!(buf.len(), 26);

    let (order, ifd_pos) = get_header(&buf).unwrap();
    std::assert_eq!(order, ByteOrder::LittleEndian);
    std::assert_eq!(ifd_pos, 8);

    let (root, errors) = get_ifd_tree(&buf, order, ifd_pos, TagSpace::Tiff).unwrap();
    std::assert!(errors.is_empty());
    std::assert_eq!(root.ifd.fields.len(), 1);
    std::assert!(root.next.is_none());
    std::assert!(root.sub_ifds.is_empty());

    let field = &root.ifd.fields[0];
    std::assert_eq!(field.tag, tags::COMPRESSION);
    std::assert_eq!(field.field_type, FieldType::Short);
    std::assert_eq!(field.count, 1);
    std::assert_eq!(field.data, vec![1, 0]);
    std::assert_eq!(field.short(0, order), 1);
}

#[test]
fn test_out_of_line_field_data() {
    // One LONG field with two values stored after the table.
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(tags::IMAGE_WIDTH).unwrap();
    buf.write_u16::<LittleEndian>(4).unwrap(); // LONG
    buf.write_u32::<LittleEndian>(2).unwrap();
    buf.write_u32::<LittleEndian>(18).unwrap(); // offset past the table
    buf.write_u32::<LittleEndian>(0).unwrap(); // next
    buf.write_u32::<LittleEndian>(7).unwrap();
    buf.write_u32::<LittleEndian>(9).unwrap();

    let mut errors = ErrorList::new();
    let table = read_ifd(&buf, ByteOrder::LittleEndian, 0, &[], true, &mut errors).unwrap();
    std::assert!(errors.is_empty());
    std::assert_eq!(table.fields.len(), 1);
    std::assert_eq!(table.data_positions, vec![18]);
    std::assert_eq!(table.fields[0].long(0, ByteOrder::LittleEndian), 7);
    std::assert_eq!(table.fields[0].long(1, ByteOrder::LittleEndian), 9);
}

#[test]
fn test_ifd_position_out_of_range() {
    let buf = minimal_tiff();
    let result = read_ifd(&buf, ByteOrder::LittleEndian, 100, &[], true, &mut ErrorList::new());
    std::assert!(matches!(result, Err(TiffError::IfdPositionOutOfRange(100))));
}

#[test]
fn test_truncated_table_salvage() {
    // The table declares 3 entries but the buffer only has room for
    // one; salvage keeps what fits and records a soft error.
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(3).unwrap();
    buf.write_u16::<LittleEndian>(tags::IMAGE_WIDTH).unwrap();
    buf.write_u16::<LittleEndian>(4).unwrap(); // LONG
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(640).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap(); // would-be next slot

    let mut errors = ErrorList::new();
    let table = read_ifd(&buf, ByteOrder::LittleEndian, 0, &[], true, &mut errors).unwrap();
    std::assert_eq!(errors.len(), 1);
    std::assert!(matches!(
        errors.iter().next(),
        Some(TiffError::IfdTruncated { pos: 0, entries: 3 })
    ));
    std::assert_eq!(table.fields.len(), 1);
    std::assert_eq!(table.fields[0].long(0, ByteOrder::LittleEndian), 640);
    std::assert_eq!(table.next, 0);
}

#[test]
fn test_salvage_stops_at_descending_tag() {
    // Two entries fit, but the second tag goes backwards; the tail is
    // likely garbage and is dropped.
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(5).unwrap();
    buf.write_u16::<LittleEndian>(tags::IMAGE_LENGTH).unwrap();
    buf.write_u16::<LittleEndian>(3).unwrap(); // SHORT
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(480).unwrap();
    buf.write_u16::<LittleEndian>(tags::IMAGE_WIDTH).unwrap(); // descending
    buf.write_u16::<LittleEndian>(3).unwrap();
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(640).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();

    let mut errors = ErrorList::new();
    let table = read_ifd(&buf, ByteOrder::LittleEndian, 0, &[], true, &mut errors).unwrap();
    std::assert_eq!(errors.len(), 1);
    std::assert_eq!(table.fields.len(), 1);
    std::assert_eq!(table.fields[0].tag, tags::IMAGE_LENGTH);
}

#[test]
fn test_field_data_out_of_range_is_skipped() {
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(2).unwrap();
    buf.write_u16::<LittleEndian>(tags::IMAGE_WIDTH).unwrap();
    buf.write_u16::<LittleEndian>(4).unwrap();
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(640).unwrap();
    buf.write_u16::<LittleEndian>(tags::IMAGE_LENGTH).unwrap();
    buf.write_u16::<LittleEndian>(4).unwrap();
    buf.write_u32::<LittleEndian>(4).unwrap(); // 16 bytes of data
    buf.write_u32::<LittleEndian>(9999).unwrap(); // far past the end
    buf.write_u32::<LittleEndian>(0).unwrap();

    let mut errors = ErrorList::new();
    let table = read_ifd(&buf, ByteOrder::LittleEndian, 0, &[], true, &mut errors).unwrap();
    std::assert_eq!(errors.len(), 1);
    std::assert!(matches!(
        errors.iter().next(),
        Some(TiffError::FieldDataOutOfRange { tag, .. }) if *tag == tags::IMAGE_LENGTH
    ));
    std::assert_eq!(table.fields.len(), 1);
    std::assert_eq!(table.fields[0].tag, tags::IMAGE_WIDTH);
}

#[test]
fn test_empty_ifd_keeps_next_pointer() {
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(0).unwrap();
    buf.write_u32::<LittleEndian>(0x44).unwrap();

    let mut errors = ErrorList::new();
    let table = read_ifd(&buf, ByteOrder::LittleEndian, 0, &[], true, &mut errors).unwrap();
    std::assert_eq!(errors.len(), 1);
    std::assert!(matches!(errors.iter().next(), Some(TiffError::EmptyIfd(0))));
    std::assert!(table.fields.is_empty());
    std::assert_eq!(table.next, 0x44);
}

#[test]
fn test_strip_image_data_extraction() {
    // StripOffsets and StripByteCounts with two segments.
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(2).unwrap();
    buf.write_u16::<LittleEndian>(tags::STRIP_OFFSETS).unwrap();
    buf.write_u16::<LittleEndian>(3).unwrap(); // SHORT
    buf.write_u32::<LittleEndian>(2).unwrap();
    buf.write_u16::<LittleEndian>(30).unwrap();
    buf.write_u16::<LittleEndian>(33).unwrap();
    buf.write_u16::<LittleEndian>(tags::STRIP_BYTE_COUNTS).unwrap();
    buf.write_u16::<LittleEndian>(3).unwrap();
    buf.write_u32::<LittleEndian>(2).unwrap();
    buf.write_u16::<LittleEndian>(3).unwrap();
    buf.write_u16::<LittleEndian>(2).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap(); // next, ends at 30
    buf.extend_from_slice(&[0xA, 0xB, 0xC, 0xD, 0xE]); // strip bytes

    let mut errors = ErrorList::new();
    let table =
        read_ifd(&buf, ByteOrder::LittleEndian, 0, &TIFF_IMAGE_DATA, true, &mut errors).unwrap();
    std::assert!(errors.is_empty());
    std::assert_eq!(table.image_data.len(), 1);
    let id = &table.image_data[0];
    std::assert_eq!(id.offset_tag, tags::STRIP_OFFSETS);
    std::assert_eq!(id.size_tag, tags::STRIP_BYTE_COUNTS);
    std::assert_eq!(id.segments, vec![vec![0xA, 0xB, 0xC], vec![0xD, 0xE]]);
}

#[test]
fn test_image_data_out_of_range() {
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(2).unwrap();
    buf.write_u16::<LittleEndian>(tags::STRIP_OFFSETS).unwrap();
    buf.write_u16::<LittleEndian>(3).unwrap();
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(1000).unwrap(); // past the end
    buf.write_u16::<LittleEndian>(0).unwrap();
    buf.write_u16::<LittleEndian>(tags::STRIP_BYTE_COUNTS).unwrap();
    buf.write_u16::<LittleEndian>(3).unwrap();
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(5).unwrap();
    buf.write_u16::<LittleEndian>(0).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();

    let mut errors = ErrorList::new();
    let table =
        read_ifd(&buf, ByteOrder::LittleEndian, 0, &TIFF_IMAGE_DATA, true, &mut errors).unwrap();
    std::assert_eq!(errors.len(), 1);
    std::assert!(matches!(
        errors.iter().next(),
        Some(TiffError::ImageDataOutOfRange { tag, .. }) if *tag == tags::STRIP_OFFSETS
    ));
    std::assert!(table.image_data.is_empty());
    // The fields themselves are still available.
    std::assert_eq!(table.fields.len(), 2);
}

#[test]
fn test_jpeg_dc_table_segment_size() {
    // Obsolete Huffman table fields have no size field: the segment is
    // the 16 BITS bytes plus as many values as they sum to.
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(tags::JPEG_DC_TABLES).unwrap();
    buf.write_u16::<LittleEndian>(4).unwrap(); // LONG
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(18).unwrap(); // table offset
    buf.write_u32::<LittleEndian>(0).unwrap(); // next, table ends at 18
    let mut bits = [0u8; 16];
    bits[0] = 2;
    bits[1] = 1;
    buf.extend_from_slice(&bits);
    buf.extend_from_slice(&[0x10, 0x20, 0x30]); // 3 Huffman values

    let mut errors = ErrorList::new();
    let table =
        read_ifd(&buf, ByteOrder::LittleEndian, 0, &TIFF_IMAGE_DATA, true, &mut errors).unwrap();
    std::assert!(errors.is_empty());
    std::assert_eq!(table.image_data.len(), 1);
    std::assert_eq!(table.image_data[0].size_tag, 0);
    std::assert_eq!(table.image_data[0].segments[0].len(), 16 + 3);
}

#[test]
fn test_jpeg_q_table_segment_size() {
    // Quantization tables are a fixed 64 bytes per segment.
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(tags::JPEG_Q_TABLES).unwrap();
    buf.write_u16::<LittleEndian>(4).unwrap();
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(18).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.extend_from_slice(&[7u8; 64]);

    let mut errors = ErrorList::new();
    let table =
        read_ifd(&buf, ByteOrder::LittleEndian, 0, &TIFF_IMAGE_DATA, true, &mut errors).unwrap();
    std::assert!(errors.is_empty());
    std::assert_eq!(table.image_data[0].segments, vec![vec![7u8; 64]]);
}
