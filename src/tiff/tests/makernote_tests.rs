//! Tests for maker note identification and the vendor dialects

extern crate std;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::{exif_tags, nikon2_tags, olympus1_tags, tags};
use crate::tiff::field::Field;
use crate::tiff::header::{get_header, put_header, HEADER_SIZE};
use crate::tiff::spaces::makernote::{detect_byte_order, identify_maker_note};
use crate::tiff::spaces::{olympus, Fujifilm1Rec, Nikon2Rec, SpaceRec, TagSpace};
use crate::tiff::tree::{get_ifd_tree, IfdNode, ParseCtx, SubIfd};
use crate::tiff::types::FieldType;

fn short_field(tag: u16, value: u16) -> Field {
    let mut field = Field::new(tag, FieldType::Short, 1);
    field.put_short(value, 0, ByteOrder::LittleEndian);
    field
}

fn ascii_field(tag: u16, text: &str) -> Field {
    let mut field = Field::new(tag, FieldType::Ascii, 0);
    field.put_ascii(text);
    field
}

#[test]
fn test_identify_labels() {
    let cases: &[(&[u8], TagSpace)] = &[
        (b"FUJIFILM\x0c\0\0\0", TagSpace::Fujifilm1),
        (b"GENERALE\x0c\0\0\0", TagSpace::Fujifilm1),
        (b"Nikon\0\x01\0data", TagSpace::Nikon1),
        (b"Nikon\0\x02\x10\0\0II*\0", TagSpace::Nikon2),
        (b"Panasonic\0\0\0data", TagSpace::Panasonic1),
        (b"OLYMP\0\x01\0data", TagSpace::Olympus1),
        (b"OLYMPUS\0II\x03\0", TagSpace::Olympus1),
        (b"SONY PI\0\0\0\0\0", TagSpace::Olympus1),
        (b"PREMI\0\0\0data", TagSpace::Olympus1),
        (b"CAMER\0\0\0data", TagSpace::Olympus1),
        (b"MINOL\0\0\0data", TagSpace::Olympus1),
        (b"SONY CAM \0\0\0", TagSpace::Sony1),
        (b"SONY DSC \0\0\0", TagSpace::Sony1),
        (b"\0\0SONY PIC\0\0", TagSpace::Sony1),
        (b"SONY MOBILE\0", TagSpace::Sony1),
        (b"VHAB     \0\0\0", TagSpace::Sony1),
    ];
    for (payload, expected) in cases {
        let space = identify_maker_note(payload, 0, "", "");
        std::assert_eq!(space, Some(*expected), "payload {:?}", payload);
    }
}

#[test]
fn test_identify_by_make_fallback() {
    let payload = [0u8; 16];
    std::assert_eq!(
        identify_maker_note(&payload, 0, "NIKON CORPORATION", "D500"),
        Some(TagSpace::Nikon2)
    );
    std::assert_eq!(identify_maker_note(&payload, 0, "Canon", ""), Some(TagSpace::Canon1));
    std::assert_eq!(identify_maker_note(&payload, 0, "Apple", "iPhone"), None);
}

#[test]
fn test_detect_byte_order() {
    // The order that reads the entry count as the smaller value wins.
    std::assert_eq!(detect_byte_order(&[0x00, 0x05]), ByteOrder::BigEndian);
    std::assert_eq!(detect_byte_order(&[0x05, 0x00]), ByteOrder::LittleEndian);
    // Ties go to big-endian.
    std::assert_eq!(detect_byte_order(&[0x01, 0x01]), ByteOrder::BigEndian);
}

/// Build a TIFF tree whose Exif IFD embeds the given maker note node,
/// serialize it, and return the bytes.
fn tiff_with_maker_note(make: &str, maker: IfdNode) -> Vec<u8> {
    let mut exif = IfdNode::new(TagSpace::Exif);
    exif.ifd.fields.push(Field::new(exif_tags::MAKER_NOTE, FieldType::Undefined, 4));
    exif.sub_ifds.push(SubIfd { tag: exif_tags::MAKER_NOTE, node: Box::new(maker) });

    let mut root = IfdNode::new(TagSpace::Tiff);
    root.ifd.fields.push(ascii_field(tags::MAKE, make));
    root.ifd.fields.push(Field::new(tags::EXIF_IFD, FieldType::Long, 1));
    root.sub_ifds.push(SubIfd { tag: tags::EXIF_IFD, node: Box::new(exif) });

    let mut buf = vec![0u8; (HEADER_SIZE + root.tree_size()) as usize];
    put_header(&mut buf, root.ifd.order, HEADER_SIZE).unwrap();
    let end = root.put_ifd_tree(&mut buf, HEADER_SIZE).unwrap();
    std::assert_eq!(end as usize, buf.len());
    buf
}

/// Parse a file built by `tiff_with_maker_note` and return the maker
/// note sub-node of the Exif IFD, if any.
fn parse_maker_note(buf: &[u8]) -> Option<IfdNode> {
    let (order, ifd_pos) = get_header(buf).unwrap();
    let (root, errors) = get_ifd_tree(buf, order, ifd_pos, TagSpace::Tiff).unwrap();
    std::assert!(errors.is_empty(), "unexpected soft errors: {}", errors);
    let exif = &root.sub_ifds[0].node;
    std::assert_eq!(exif.space(), TagSpace::Exif);
    exif.sub_ifds
        .iter()
        .find(|sub| sub.tag == exif_tags::MAKER_NOTE)
        .map(|sub| (*sub.node).clone())
}

#[test]
fn test_nikon2_labeled_round_trip() {
    // A labeled Nikon2 note wraps a complete TIFF block with offsets
    // relative to its inner header.
    let mut maker = IfdNode::new(TagSpace::Nikon2);
    maker.space_rec = SpaceRec::Nikon2(Nikon2Rec { label: b"Nikon\0\x02\x10\0\0".to_vec() });
    let mut version = Field::new(nikon2_tags::MAKER_NOTE_VERSION, FieldType::Undefined, 4);
    version.data.copy_from_slice(b"0210");
    maker.ifd.fields.push(version);
    maker.ifd.fields.push(short_field(0x02, 800)); // ISO

    let buf = tiff_with_maker_note("NIKON CORPORATION", maker);
    let parsed = parse_maker_note(&buf).expect("maker note not identified");
    std::assert_eq!(parsed.space(), TagSpace::Nikon2);
    match &parsed.space_rec {
        SpaceRec::Nikon2(rec) => std::assert_eq!(rec.label, b"Nikon\0\x02\x10\0\0".to_vec()),
        other => std::panic!("wrong space rec: {:?}", other),
    }
    std::assert_eq!(parsed.ifd.fields.len(), 2);
    std::assert_eq!(parsed.ifd.fields[1].short(0, parsed.ifd.order), 800);

    // The parsed tree re-serializes byte-identically.
    let (order, ifd_pos) = get_header(&buf).unwrap();
    let (root, _) = get_ifd_tree(&buf, order, ifd_pos, TagSpace::Tiff).unwrap();
    let mut again = vec![0u8; (HEADER_SIZE + root.tree_size()) as usize];
    put_header(&mut again, order, HEADER_SIZE).unwrap();
    root.put_ifd_tree(&mut again, HEADER_SIZE).unwrap();
    std::assert_eq!(again, buf);
}

#[test]
fn test_nikon2_unlabeled_round_trip() {
    // Early Nikon cameras use the Nikon2 tags without a label; the
    // note is only kept if the MakerNoteVersion field looks right.
    let mut maker = IfdNode::new(TagSpace::Nikon2);
    let mut version = Field::new(nikon2_tags::MAKER_NOTE_VERSION, FieldType::Undefined, 4);
    version.data.copy_from_slice(b"0100");
    maker.ifd.fields.push(version);

    let buf = tiff_with_maker_note("NIKON", maker);
    let parsed = parse_maker_note(&buf).expect("maker note not identified");
    std::assert_eq!(parsed.space(), TagSpace::Nikon2);
    match &parsed.space_rec {
        SpaceRec::Nikon2(rec) => std::assert!(rec.label.is_empty()),
        other => std::panic!("wrong space rec: {:?}", other),
    }
}

#[test]
fn test_nikon2_unlabeled_requires_version_field() {
    // Without a plausible MakerNoteVersion the payload stays opaque.
    let mut maker = IfdNode::new(TagSpace::Nikon2);
    maker.ifd.fields.push(short_field(0x02, 800));

    let buf = tiff_with_maker_note("NIKON", maker);
    std::assert!(parse_maker_note(&buf).is_none());
}

#[test]
fn test_canon_identified_by_make() {
    // Canon notes are bare IFDs; only the make gives them away.
    let mut maker = IfdNode::new(TagSpace::Canon1);
    maker.ifd.fields.push(short_field(0x01, 2));

    let buf = tiff_with_maker_note("Canon", maker);
    let parsed = parse_maker_note(&buf).expect("maker note not identified");
    std::assert_eq!(parsed.space(), TagSpace::Canon1);
    std::assert_eq!(parsed.ifd.fields[0].short(0, parsed.ifd.order), 2);
}

#[test]
fn test_fujifilm_relative_offsets_round_trip() {
    let mut maker = IfdNode::new(TagSpace::Fujifilm1);
    // An out-of-line field exercises the note-relative offsets.
    let mut serial = Field::new(0x10, FieldType::Ascii, 0);
    serial.put_ascii("FF123456");
    maker.ifd.fields.push(serial);

    let buf = tiff_with_maker_note("FUJIFILM", maker);
    let parsed = parse_maker_note(&buf).expect("maker note not identified");
    std::assert_eq!(parsed.space(), TagSpace::Fujifilm1);
    std::assert_eq!(parsed.ifd.order, ByteOrder::LittleEndian);
    match &parsed.space_rec {
        SpaceRec::Fujifilm1(rec) => std::assert_eq!(rec.label, Fujifilm1Rec::default().label),
        other => std::panic!("wrong space rec: {:?}", other),
    }
    std::assert_eq!(parsed.ifd.fields[0].ascii(), "FF123456");
}

#[test]
fn test_panasonic_round_trip() {
    let mut maker = IfdNode::new(TagSpace::Panasonic1);
    maker.ifd.fields.push(short_field(0x01, 4)); // Quality

    let buf = tiff_with_maker_note("Panasonic", maker);
    let parsed = parse_maker_note(&buf).expect("maker note not identified");
    std::assert_eq!(parsed.space(), TagSpace::Panasonic1);
    std::assert_eq!(parsed.ifd.fields[0].short(0, parsed.ifd.order), 4);
}

#[test]
fn test_sony_round_trip() {
    let mut maker = IfdNode::new(TagSpace::Sony1);
    maker.ifd.fields.push(short_field(0x102, 5));

    let buf = tiff_with_maker_note("SONY", maker);
    let parsed = parse_maker_note(&buf).expect("maker note not identified");
    std::assert_eq!(parsed.space(), TagSpace::Sony1);
    std::assert_eq!(parsed.ifd.fields[0].short(0, parsed.ifd.order), 5);
}

#[test]
fn test_olympus_round_trip_with_nested_space() {
    // Newer Olympus notes hold IFD-typed fields that open nested
    // namespaces such as Equipment.
    let mut equipment = IfdNode::new(TagSpace::Olympus1Equipment);
    equipment.ifd.fields.push(short_field(0x100, 1));

    let mut maker = IfdNode::new(TagSpace::Olympus1);
    maker.ifd.fields.push(Field::new(olympus1_tags::EQUIPMENT_IFD, FieldType::Ifd, 1));
    maker
        .sub_ifds
        .push(SubIfd { tag: olympus1_tags::EQUIPMENT_IFD, node: Box::new(equipment) });

    let buf = tiff_with_maker_note("OLYMPUS", maker);
    let parsed = parse_maker_note(&buf).expect("maker note not identified");
    std::assert_eq!(parsed.space(), TagSpace::Olympus1);
    std::assert_eq!(parsed.sub_ifds.len(), 1);
    let nested = &parsed.sub_ifds[0].node;
    std::assert_eq!(nested.space(), TagSpace::Olympus1Equipment);
    std::assert_eq!(nested.ifd.fields[0].short(0, nested.ifd.order), 1);
}

#[test]
fn test_focus_info_heuristic_accepts_embedded_ifd() {
    // A FocusInfo payload that starts with a plausible entry table is
    // unpacked as a directory.
    let mut inner = vec![0u8; 18];
    inner[0] = 1; // one entry
    inner[2] = 0x01; // tag
    inner[4] = 3; // SHORT
    inner[6] = 1; // count
    inner[10] = 9; // value

    let field = Field {
        tag: olympus1_tags::FOCUS_INFO,
        field_type: FieldType::Undefined,
        count: inner.len() as u32,
        data: inner.clone(),
    };
    let mut ctx = ParseCtx::default();
    let subs = olympus::take_field(&inner, ByteOrder::LittleEndian, &field, 0, &mut ctx);
    std::assert_eq!(subs.len(), 1);
    std::assert_eq!(subs[0].node.space(), TagSpace::Olympus1FocusInfo);
    std::assert_eq!(subs[0].node.ifd.fields.len(), 1);
    std::assert_eq!(subs[0].node.ifd.fields[0].short(0, ByteOrder::LittleEndian), 9);
}

#[test]
fn test_focus_info_heuristic_rejects_plain_data() {
    // A payload whose leading bytes cannot be an entry table stays
    // opaque.
    let data = vec![0u8; 18];
    let field = Field {
        tag: olympus1_tags::FOCUS_INFO,
        field_type: FieldType::Undefined,
        count: data.len() as u32,
        data: data.clone(),
    };
    let mut ctx = ParseCtx::default();
    let subs = olympus::take_field(&data, ByteOrder::LittleEndian, &field, 0, &mut ctx);
    std::assert!(subs.is_empty());

    // Implausible type codes are also rejected.
    let mut bad = vec![0u8; 18];
    bad[0] = 1;
    bad[4] = 0xFF; // type 255 is not a TIFF type
    let field = Field {
        tag: olympus1_tags::FOCUS_INFO,
        field_type: FieldType::Undefined,
        count: bad.len() as u32,
        data: bad.clone(),
    };
    let mut ctx = ParseCtx::default();
    std::assert!(olympus::take_field(&bad, ByteOrder::LittleEndian, &field, 0, &mut ctx).is_empty());
}
