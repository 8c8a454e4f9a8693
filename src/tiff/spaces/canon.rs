//! Canon maker notes
//!
//! Canon notes have no label and no inner header: the payload is a
//! bare IFD at the start of the maker note, read with the byte order
//! of the enclosing Exif block and absolute offsets. They are only
//! recognized by the camera make, since there is nothing to
//! prefix-match.

/// Record for Canon1 maker notes; the dialect carries no state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Canon1Rec;
