//! IFD namespace dispatch
//!
//! Every IFD belongs to a tag namespace: the standard TIFF tree, the
//! Exif family, Multi-Picture Format, or one of the vendor maker note
//! dialects. The dialects differ in the label bytes preceding the
//! table, whether offsets are absolute or relative to the maker note,
//! the byte order, which tags open sub-directories, and whether the
//! table is followed by a next pointer. A `SpaceRec` captures that
//! behavior for one node; the set of dialects is closed, so dispatch
//! is a sum type rather than a trait object.

pub mod canon;
pub mod fujifilm;
pub mod makernote;
pub mod nikon;
pub mod olympus;
pub mod panasonic;
pub mod sony;

use crate::tiff::constants::{exif_tags, tags};
use crate::tiff::image_data::{ImageDataSpec, NIKON2_PREVIEW_IMAGE_DATA, TIFF_IMAGE_DATA};

pub use canon::Canon1Rec;
pub use fujifilm::Fujifilm1Rec;
pub use nikon::{Nikon1Rec, Nikon2PreviewRec, Nikon2Rec};
pub use olympus::Olympus1Rec;
pub use panasonic::Panasonic1Rec;
pub use sony::Sony1Rec;

/// IFD tag namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagSpace {
    Tiff,
    Unknown,
    Exif,
    Gps,
    Interop,
    /// Multi-Picture Format index IFD
    MpfIndex,
    /// Multi-Picture Format attribute IFD
    MpfAttribute,
    // Maker note namespaces below.
    Canon1,
    Fujifilm1,
    Nikon1,
    Nikon2,
    Nikon2Preview,
    Nikon2Scan,
    Olympus1,
    Olympus1Equipment,
    Olympus1CameraSettings,
    Olympus1RawDevelopment,
    Olympus1RawDev2,
    Olympus1ImageProcessing,
    Olympus1FocusInfo,
    Panasonic1,
    Sony1,
}

impl TagSpace {
    /// Return the name of this tag namespace
    pub fn name(&self) -> &'static str {
        match self {
            TagSpace::Tiff => "TIFF",
            TagSpace::Unknown => "Unknown",
            TagSpace::Exif => "Exif",
            TagSpace::Gps => "GPS",
            TagSpace::Interop => "Interop",
            TagSpace::MpfIndex => "MPFIndex",
            TagSpace::MpfAttribute => "MPFAttribute",
            TagSpace::Canon1 => "Canon1",
            TagSpace::Fujifilm1 => "Fujifilm1",
            TagSpace::Nikon1 => "Nikon1",
            TagSpace::Nikon2 => "Nikon2",
            TagSpace::Nikon2Preview => "Nikon2Preview",
            TagSpace::Nikon2Scan => "Nikon2Scan",
            TagSpace::Olympus1 => "Olympus1",
            TagSpace::Olympus1Equipment => "Olympus1Equipment",
            TagSpace::Olympus1CameraSettings => "Olympus1CameraSettings",
            TagSpace::Olympus1RawDevelopment => "Olympus1RawDevelopment",
            TagSpace::Olympus1RawDev2 => "Olympus1RawDev2",
            TagSpace::Olympus1ImageProcessing => "Olympus1ImageProcessing",
            TagSpace::Olympus1FocusInfo => "Olympus1FocusInfo",
            TagSpace::Panasonic1 => "Panasonic1",
            TagSpace::Sony1 => "Sony1",
        }
    }

    /// Given a pointer field `tag` in this namespace, return the
    /// namespace of the sub-IFD it refers to. Private IFDs need this
    /// because they use the LONG data type instead of the IFD type.
    pub fn sub_space(&self, tag: u16) -> TagSpace {
        match self {
            TagSpace::Tiff => match tag {
                tags::SUB_IFDS => TagSpace::Tiff,
                tags::EXIF_IFD => TagSpace::Exif,
                tags::GPS_IFD => TagSpace::Gps,
                _ => TagSpace::Unknown,
            },
            TagSpace::Exif if tag == exif_tags::INTEROP_IFD => TagSpace::Interop,
            _ => TagSpace::Unknown,
        }
    }

    /// Return the namespace of the IFD an IFD of this namespace chains
    /// to through its next pointer.
    pub fn next_space(&self) -> TagSpace {
        match self {
            // The IFD after an Exif IFD is a thumbnail encoded as TIFF.
            TagSpace::Exif => TagSpace::Tiff,
            TagSpace::MpfIndex => TagSpace::MpfAttribute,
            other => *other,
        }
    }
}

/// What a dialect does with the 4-byte slot after its IFD table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPolicy {
    /// Read the pointer and chain into `TagSpace::next_space`
    Chain,
    /// The slot exists but must be zero
    Forbidden,
    /// The slot does not exist and must not be read
    Ignored,
}

/// Record for namespaces without dialect-specific behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRec {
    pub space: TagSpace,
}

/// Node-space-specific behavior for one IFD node
///
/// Most nodes use the TIFF standard via `Generic`; maker notes carry
/// whatever label and offset-base state their dialect needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceRec {
    Generic(GenericRec),
    Canon1(Canon1Rec),
    Fujifilm1(Fujifilm1Rec),
    Nikon1(Nikon1Rec),
    Nikon2(Nikon2Rec),
    Nikon2Preview(Nikon2PreviewRec),
    Olympus1(Olympus1Rec),
    Panasonic1(Panasonic1Rec),
    Sony1(Sony1Rec),
}

impl SpaceRec {
    /// Create the record appropriate for a namespace
    ///
    /// Maker note dialects get their dedicated variants; everything
    /// else, including the Olympus nested spaces and Nikon Scan, uses
    /// the generic TIFF behavior.
    pub fn new(space: TagSpace) -> SpaceRec {
        match space {
            TagSpace::Canon1 => SpaceRec::Canon1(Canon1Rec),
            TagSpace::Fujifilm1 => SpaceRec::Fujifilm1(Fujifilm1Rec::default()),
            TagSpace::Nikon1 => SpaceRec::Nikon1(Nikon1Rec),
            TagSpace::Nikon2 => SpaceRec::Nikon2(Nikon2Rec::default()),
            TagSpace::Nikon2Preview => SpaceRec::Nikon2Preview(Nikon2PreviewRec),
            TagSpace::Olympus1 => SpaceRec::Olympus1(Olympus1Rec::default()),
            TagSpace::Panasonic1 => SpaceRec::Panasonic1(Panasonic1Rec),
            TagSpace::Sony1 => SpaceRec::Sony1(Sony1Rec::default()),
            other => SpaceRec::Generic(GenericRec { space: other }),
        }
    }

    /// The namespace this record implements
    pub fn space(&self) -> TagSpace {
        match self {
            SpaceRec::Generic(rec) => rec.space,
            SpaceRec::Canon1(_) => TagSpace::Canon1,
            SpaceRec::Fujifilm1(_) => TagSpace::Fujifilm1,
            SpaceRec::Nikon1(_) => TagSpace::Nikon1,
            SpaceRec::Nikon2(_) => TagSpace::Nikon2,
            SpaceRec::Nikon2Preview(_) => TagSpace::Nikon2Preview,
            SpaceRec::Olympus1(_) => TagSpace::Olympus1,
            SpaceRec::Panasonic1(_) => TagSpace::Panasonic1,
            SpaceRec::Sony1(_) => TagSpace::Sony1,
        }
    }

    /// Indicate if this node is a maker note
    pub fn is_maker_note(&self) -> bool {
        !matches!(self, SpaceRec::Generic(_) | SpaceRec::Nikon2Preview(_))
    }

    /// Serialized size of the label and header bytes preceding the
    /// IFD table
    pub fn prefix_size(&self) -> u32 {
        match self {
            SpaceRec::Generic(_) | SpaceRec::Canon1(_) | SpaceRec::Nikon2Preview(_) => 0,
            SpaceRec::Fujifilm1(rec) => rec.prefix_size(),
            SpaceRec::Nikon1(_) => nikon::NIKON1_LABEL.len() as u32,
            SpaceRec::Nikon2(rec) => rec.prefix_size(),
            SpaceRec::Olympus1(rec) => rec.label.len() as u32,
            SpaceRec::Panasonic1(_) => panasonic::PANASONIC1_LABEL.len() as u32,
            SpaceRec::Sony1(rec) => rec.label.len() as u32,
        }
    }

    /// The dialect's policy for the slot after the IFD table
    pub fn next_policy(&self) -> NextPolicy {
        match self {
            SpaceRec::Generic(_) => NextPolicy::Chain,
            SpaceRec::Canon1(_)
            | SpaceRec::Fujifilm1(_)
            | SpaceRec::Nikon1(_)
            | SpaceRec::Nikon2(_)
            | SpaceRec::Nikon2Preview(_)
            | SpaceRec::Olympus1(_) => NextPolicy::Forbidden,
            // The next pointer is generally missing or invalid in
            // these notes; don't try to read it.
            SpaceRec::Panasonic1(_) | SpaceRec::Sony1(_) => NextPolicy::Ignored,
        }
    }
}

/// The image data pairings recognized in a namespace
pub fn specs_for(space: TagSpace) -> &'static [ImageDataSpec] {
    match space {
        TagSpace::Tiff => &TIFF_IMAGE_DATA,
        TagSpace::Nikon2Preview => &NIKON2_PREVIEW_IMAGE_DATA,
        _ => &[],
    }
}

/// Where a dialect's IFD table lives relative to the enclosing buffer
#[derive(Debug, Clone, Copy)]
pub(crate) enum Base {
    /// Table at an absolute position in the current buffer
    Absolute(u32),
    /// Table inside the sub-slice starting at `start`; offsets within
    /// the dialect's block are relative to it
    Relative { start: u32, pos: u32 },
}
