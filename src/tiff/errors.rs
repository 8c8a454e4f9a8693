//! Custom error types for TIFF processing
//!
//! The reader distinguishes hard errors, which abort an operation, from
//! soft errors, which are accumulated in an `ErrorList` while parsing
//! continues so that a damaged file still yields as much of the tree as
//! possible.

use std::fmt;
use std::io;

use crate::tiff::spaces::TagSpace;

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Buffer does not start with a valid TIFF header
    InvalidHeader,
    /// IFD header lies past the end of the buffer
    IfdPositionOutOfRange(u32),
    /// IFD table extends past the end of the buffer; salvage applies
    IfdTruncated { pos: u32, entries: u16 },
    /// Out-of-line field data lies past the end of the buffer
    FieldDataOutOfRange { pos: u32, tag: u16 },
    /// Strip, tile or JPEG table segment lies past the end of the buffer
    ImageDataOutOfRange { pos: u32, tag: u16 },
    /// An IFD reference resolves to an already-visited position
    CycleDetected { space: TagSpace, pos: u32 },
    /// IFD table with zero entries
    EmptyIfd(u32),
    /// A dialect that forbids the next pointer found a non-zero one
    UnexpectedNextPointer { space: TagSpace, pos: u32 },
    /// Writer precondition: field tags must be in ascending order
    TagsOutOfOrder { previous: u16, tag: u16 },
    /// Writer precondition: IFDs must start on a 2-byte boundary
    UnalignedPosition(u32),
    /// A SHORT offset field cannot hold a position of 65536 or above
    ShortOffsetOverflow(u32),
    /// A maker note was dispatched to a dialect whose label does not match
    MakerNoteLabelMismatch(TagSpace),
    /// Output buffer is smaller than the serialized tree
    BufferTooSmall { needed: usize, actual: usize },
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidHeader => write!(f, "Invalid TIFF header"),
            TiffError::IfdPositionOutOfRange(pos) => {
                write!(f, "Attempted to read IFD at position {}, past end of input", pos)
            }
            TiffError::IfdTruncated { pos, entries } => write!(
                f,
                "IFD at offset {} with {} fields extends past end of input",
                pos, entries
            ),
            TiffError::FieldDataOutOfRange { pos, tag } => write!(
                f,
                "When reading IFD at offset {}, data for tag {} extends past end of input",
                pos, tag
            ),
            TiffError::ImageDataOutOfRange { pos, tag } => write!(
                f,
                "When reading IFD at offset {}, image data for tag {} extends past end of input",
                pos, tag
            ),
            TiffError::CycleDetected { space, pos } => {
                write!(f, "IFD cycle detected in {} IFD at position {}", space.name(), pos)
            }
            TiffError::EmptyIfd(pos) => write!(f, "IFD at offset {} has no entries", pos),
            TiffError::UnexpectedNextPointer { space, pos } => write!(
                f,
                "{} IFD at position {} has a next pointer, which the dialect forbids",
                space.name(),
                pos
            ),
            TiffError::TagsOutOfOrder { previous, tag } => write!(
                f,
                "Tags are out of order: {}(0x{:X}) is followed by {}(0x{:X})",
                previous, previous, tag, tag
            ),
            TiffError::UnalignedPosition(pos) => {
                write!(f, "IFD position {} is not word aligned", pos)
            }
            TiffError::ShortOffsetOverflow(pos) => {
                write!(f, "Position {} is too large for a SHORT offset field", pos)
            }
            TiffError::MakerNoteLabelMismatch(space) => {
                write!(f, "Invalid label for {} maker note", space.name())
            }
            TiffError::BufferTooSmall { needed, actual } => write!(
                f,
                "Output buffer of {} bytes is too small for {} bytes of serialized data",
                actual, needed
            ),
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

impl From<String> for TiffError {
    fn from(msg: String) -> Self {
        TiffError::GenericError(msg)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;

/// Accumulator for soft errors encountered during a parse
///
/// The reader records recoverable problems here and keeps going, so the
/// caller receives both the partial tree and the full list of
/// diagnostics. No error is silently swallowed.
#[derive(Debug, Default)]
pub struct ErrorList {
    errors: Vec<TiffError>,
}

impl ErrorList {
    /// Create an empty list
    pub fn new() -> Self {
        ErrorList { errors: Vec::new() }
    }

    /// Record a soft error
    pub fn push(&mut self, error: TiffError) {
        self.errors.push(error);
    }

    /// True if no soft errors were recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the recorded errors
    pub fn iter(&self) -> std::slice::Iter<'_, TiffError> {
        self.errors.iter()
    }

    /// Consume the list, returning the underlying vector
    pub fn into_vec(self) -> Vec<TiffError> {
        self.errors
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}
