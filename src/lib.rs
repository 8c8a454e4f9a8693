pub mod commands;
pub mod io;
pub mod tiff;
pub mod utils;

pub use io::byte_order::ByteOrder;
pub use tiff::{get_header, get_ifd_tree, put_header, HEADER_SIZE};
pub use tiff::{ErrorList, TiffError, TiffResult};
pub use tiff::{Field, FieldType, Ifd, IfdNode, SubIfd, TagSpace};
