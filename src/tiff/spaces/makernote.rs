//! Maker note identification
//!
//! The MakerNote field in an Exif IFD carries an opaque vendor blob,
//! usually itself an IFD with a vendor label in front. Classification
//! is by prefix-matching the payload against the known labels; when no
//! label matches, the camera make captured from the enclosing TIFF IFD
//! decides between the unlabeled dialects.

use log::debug;

use crate::io::byte_order::ByteOrder;
use crate::tiff::spaces::{fujifilm, nikon, olympus, panasonic, sony, TagSpace};

/// Identify a maker note payload and return its namespace, or `None`
/// if it is not recognized and should stay opaque. The camera model is
/// accepted alongside the make because some dialects can only be told
/// apart by model, though none of the supported ones need it yet.
pub fn identify_maker_note(buf: &[u8], pos: u32, make: &str, _model: &str) -> Option<TagSpace> {
    let payload = &buf[pos as usize..];
    if payload.starts_with(&fujifilm::FUJIFILM1_LABEL) || payload.starts_with(&fujifilm::GENERALE_LABEL)
    {
        return Some(TagSpace::Fujifilm1);
    }
    // Nikon1 carries the longer "Nikon\0\x01\0" label; it must be
    // tried before the plain Nikon2 prefix.
    if payload.starts_with(&nikon::NIKON1_LABEL) {
        return Some(TagSpace::Nikon1);
    }
    if payload.starts_with(&nikon::NIKON2_LABEL_PREFIX) {
        return Some(TagSpace::Nikon2);
    }
    if payload.starts_with(&panasonic::PANASONIC1_LABEL) {
        return Some(TagSpace::Panasonic1);
    }
    for label in &olympus::OLYMPUS1_LABELS {
        if payload.starts_with(label.prefix) {
            return Some(TagSpace::Olympus1);
        }
    }
    for label in &sony::SONY1_LABELS {
        if payload.starts_with(label) {
            return Some(TagSpace::Sony1);
        }
    }
    // No label was recognized; assume a maker note appropriate for the
    // camera make.
    let lc_make = make.to_lowercase();
    if lc_make.starts_with("nikon") {
        return Some(TagSpace::Nikon2);
    }
    if lc_make.starts_with("canon") {
        return Some(TagSpace::Canon1);
    }
    debug!("Maker note at {} not recognized (make {:?}); leaving opaque", pos, make);
    None
}

/// Guess the byte order of an IFD from its entry count
///
/// The number of entries is usually small, typically less than 256, so
/// the order that decodes the first two bytes to the smaller value is
/// the more plausible one.
pub fn detect_byte_order(buf: &[u8]) -> ByteOrder {
    if buf.len() < 2 {
        return ByteOrder::LittleEndian;
    }
    let big = ByteOrder::BigEndian.read_u16(buf);
    let little = ByteOrder::LittleEndian.read_u16(buf);
    if little < big {
        ByteOrder::LittleEndian
    } else {
        ByteOrder::BigEndian
    }
}
