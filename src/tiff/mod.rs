//! TIFF IFD tree codec
//!
//! Decodes a TIFF 6.0 byte stream into a tree of Image File
//! Directories, including the Exif, GPS, Interoperability and
//! Multi-Picture Format sub-trees and the vendor maker note dialects,
//! and serializes a tree back into a byte buffer that a compliant
//! reader will accept.

pub mod constants;
pub mod errors;
pub mod field;
pub mod header;
pub mod ifd;
pub mod image_data;
pub mod reader;
pub mod spaces;
pub mod tree;
pub mod types;
pub mod writer;

#[cfg(test)]
mod tests;

pub use errors::{ErrorList, TiffError, TiffResult};
pub use field::Field;
pub use header::{get_header, put_header, HEADER_SIZE};
pub use ifd::Ifd;
pub use image_data::{ImageData, ImageDataSpec, ImageSegment};
pub use spaces::{SpaceRec, TagSpace};
pub use tree::{get_ifd_tree, IfdNode, SubIfd};
pub use types::FieldType;
pub use writer::align;
