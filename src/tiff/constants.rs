//! TIFF format constants
//!
//! Tag numbers and header constants used throughout the codec. Tags are
//! from TIFF 6.0 unless noted otherwise.

/// TIFF header constants
pub mod header {
    /// TIFF version magic number (42)
    pub const TIFF_MAGIC: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];
}

/// Tags that may be found in TIFF main IFDs (not alternative or private
/// IFDs such as Exif)
pub mod tags {
    pub const NEW_SUBFILE_TYPE: u16 = 0x0FE;
    pub const SUBFILE_TYPE: u16 = 0x0FF;
    pub const IMAGE_WIDTH: u16 = 0x100;
    pub const IMAGE_LENGTH: u16 = 0x101;
    pub const BITS_PER_SAMPLE: u16 = 0x102;
    pub const COMPRESSION: u16 = 0x103;
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 0x106;
    pub const THRESHHOLDING: u16 = 0x107;
    pub const CELL_WIDTH: u16 = 0x108;
    pub const CELL_LENGTH: u16 = 0x109;
    pub const FILL_ORDER: u16 = 0x10A;
    pub const DOCUMENT_NAME: u16 = 0x10D;
    pub const IMAGE_DESCRIPTION: u16 = 0x10E;
    pub const MAKE: u16 = 0x10F;
    pub const MODEL: u16 = 0x110;
    pub const STRIP_OFFSETS: u16 = 0x111;
    pub const ORIENTATION: u16 = 0x112;
    pub const SAMPLES_PER_PIXEL: u16 = 0x115;
    pub const ROWS_PER_STRIP: u16 = 0x116;
    pub const STRIP_BYTE_COUNTS: u16 = 0x117;
    pub const MIN_SAMPLE_VALUE: u16 = 0x118;
    pub const MAX_SAMPLE_VALUE: u16 = 0x119;
    pub const X_RESOLUTION: u16 = 0x11A;
    pub const Y_RESOLUTION: u16 = 0x11B;
    pub const PLANAR_CONFIGURATION: u16 = 0x11C;
    pub const PAGE_NAME: u16 = 0x11D;
    pub const X_POSITION: u16 = 0x11E;
    pub const Y_POSITION: u16 = 0x11F;
    pub const FREE_OFFSETS: u16 = 0x120;
    pub const FREE_BYTE_COUNTS: u16 = 0x121;
    pub const GRAY_RESPONSE_UNIT: u16 = 0x122;
    pub const GRAY_RESPONSE_CURVE: u16 = 0x123;
    pub const T4_OPTIONS: u16 = 0x124;
    pub const T6_OPTIONS: u16 = 0x125;
    pub const RESOLUTION_UNIT: u16 = 0x128;
    pub const PAGE_NUMBER: u16 = 0x129;
    pub const TRANSFER_FUNCTION: u16 = 0x12D;
    pub const SOFTWARE: u16 = 0x131;
    pub const DATE_TIME: u16 = 0x132;
    pub const ARTIST: u16 = 0x13B;
    pub const HOST_COMPUTER: u16 = 0x13C;
    pub const PREDICTOR: u16 = 0x13D;
    pub const WHITE_POINT: u16 = 0x13E;
    pub const PRIMARY_CHROMATICITIES: u16 = 0x13F;
    pub const COLOR_MAP: u16 = 0x140;
    pub const HALFTONE_HINTS: u16 = 0x141;
    pub const TILE_WIDTH: u16 = 0x142;
    pub const TILE_LENGTH: u16 = 0x143;
    pub const TILE_OFFSETS: u16 = 0x144;
    pub const TILE_BYTE_COUNTS: u16 = 0x145;
    /// TIFF F (RFC 2306)
    pub const BAD_FAX_LINES: u16 = 0x146;
    /// TIFF F (RFC 2306)
    pub const CLEAN_FAX_DATA: u16 = 0x147;
    /// TIFF F (RFC 2306)
    pub const CONSECUTIVE_BAD_FAX_LINES: u16 = 0x148;
    /// Supplement 1
    pub const SUB_IFDS: u16 = 0x14A;
    pub const INK_SET: u16 = 0x14C;
    pub const INK_NAMES: u16 = 0x14D;
    pub const NUMBER_OF_INKS: u16 = 0x14E;
    pub const DOT_RANGE: u16 = 0x150;
    pub const TARGET_PRINTER: u16 = 0x151;
    pub const EXTRA_SAMPLES: u16 = 0x152;
    pub const SAMPLE_FORMAT: u16 = 0x153;
    pub const S_MIN_SAMPLE_VALUE: u16 = 0x154;
    pub const S_MAX_SAMPLE_VALUE: u16 = 0x155;
    pub const TRANSFER_RANGE: u16 = 0x156;
    /// Supplement 1
    pub const CLIP_PATH: u16 = 0x157;
    /// Supplement 1
    pub const X_CLIP_PATH_UNITS: u16 = 0x158;
    /// Supplement 1
    pub const Y_CLIP_PATH_UNITS: u16 = 0x159;
    /// Supplement 1
    pub const INDEXED: u16 = 0x15A;
    /// Supplement 2
    pub const JPEG_TABLES: u16 = 0x15B;
    /// Supplement 1
    pub const OPI_PROXY: u16 = 0x15F;
    pub const JPEG_PROC: u16 = 0x200;
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x201;
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x202;
    pub const JPEG_RESTART_INTERVAL: u16 = 0x203;
    pub const JPEG_LOSSLESS_PREDICTORS: u16 = 0x205;
    pub const JPEG_POINT_TRANSFORMS: u16 = 0x206;
    pub const JPEG_Q_TABLES: u16 = 0x207;
    pub const JPEG_DC_TABLES: u16 = 0x208;
    pub const JPEG_AC_TABLES: u16 = 0x209;
    pub const YCBCR_COEFFICIENTS: u16 = 0x211;
    pub const YCBCR_SUB_SAMPLING: u16 = 0x212;
    pub const YCBCR_POSITIONING: u16 = 0x213;
    pub const REFERENCE_BLACK_WHITE: u16 = 0x214;
    /// XMP part 3
    pub const XMP: u16 = 0x2BC;
    /// Supplement 1
    pub const IMAGE_ID: u16 = 0x800;
    pub const COPYRIGHT: u16 = 0x8298;
    /// GeoTIFF
    pub const MODEL_PIXEL_SCALE: u16 = 0x830E;
    /// Mentioned in XMP part 3
    pub const IPTC: u16 = 0x83BB;
    /// GeoTIFF
    pub const MODEL_TIEPOINT: u16 = 0x8482;
    /// GeoTIFF
    pub const MODEL_TRANSFORMATION: u16 = 0x85D8;
    /// Photoshop Image Resources, mentioned in XMP part 3
    pub const PSIR: u16 = 0x8649;
    /// Exif 2.3
    pub const EXIF_IFD: u16 = 0x8769;
    /// ICC.1:2003-09
    pub const ICC_PROFILE: u16 = 0x8773;
    /// GeoTIFF
    pub const GEO_KEY_DIRECTORY: u16 = 0x87AF;
    /// GeoTIFF
    pub const GEO_DOUBLE_PARAMS: u16 = 0x87B0;
    /// GeoTIFF
    pub const GEO_ASCII_PARAMS: u16 = 0x87B1;
    /// Exif 2.3
    pub const GPS_IFD: u16 = 0x8825;
    /// Supplement 2
    pub const IMAGE_SOURCE_DATA: u16 = 0x935C;
    /// Epson print image matching
    pub const PRINT_IM: u16 = 0xC4A5;
}

/// Tags in Exif IFDs that affect IFD structure
pub mod exif_tags {
    /// Pointer to the Interoperability IFD
    pub const INTEROP_IFD: u16 = 0xA005;
    /// Vendor-defined maker note payload
    pub const MAKER_NOTE: u16 = 0x927C;
}

/// Tags in Nikon2 maker note IFDs that affect IFD structure
pub mod nikon2_tags {
    pub const MAKER_NOTE_VERSION: u16 = 0x1;
    pub const PREVIEW_IFD: u16 = 0x11;
    pub const NIKON_SCAN_IFD: u16 = 0xE10;
    /// Preview namespace: offset of the embedded preview image
    pub const PREVIEW_IMAGE_START: u16 = 0x201;
    /// Preview namespace: length of the embedded preview image
    pub const PREVIEW_IMAGE_LENGTH: u16 = 0x202;
}

/// Tags in Olympus1 maker note IFDs that open nested directories
pub mod olympus1_tags {
    pub const EQUIPMENT_IFD: u16 = 0x2010;
    pub const CAMERA_SETTINGS_IFD: u16 = 0x2020;
    pub const RAW_DEVELOPMENT_IFD: u16 = 0x2030;
    pub const RAW_DEV2_IFD: u16 = 0x2031;
    pub const IMAGE_PROCESSING_IFD: u16 = 0x2040;
    pub const FOCUS_INFO: u16 = 0x2050;
}
