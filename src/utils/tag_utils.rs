//! TIFF tag utilities
//!
//! Name lookup for tags, used by the print driver. Only the TIFF
//! namespace carries a dictionary; private namespaces such as Exif and
//! the maker note dialects print their tags numerically.

use crate::tiff::constants::tags;
use crate::tiff::spaces::TagSpace;

/// Get the name of a tag within a namespace
///
/// Returns `None` for namespaces without a dictionary and for tags
/// not in the dictionary.
pub fn tag_name(space: TagSpace, tag: u16) -> Option<&'static str> {
    match space {
        TagSpace::Tiff => tiff_tag_name(tag),
        _ => None,
    }
}

/// Get the name of a TIFF-space tag
///
/// Names are from TIFF 6.0, its supplements, and the related
/// specifications noted in `constants::tags`.
pub fn tiff_tag_name(tag: u16) -> Option<&'static str> {
    let name = match tag {
        tags::NEW_SUBFILE_TYPE => "NewSubfileType",
        tags::SUBFILE_TYPE => "SubfileType",
        tags::IMAGE_WIDTH => "ImageWidth",
        tags::IMAGE_LENGTH => "ImageLength",
        tags::BITS_PER_SAMPLE => "BitsPerSample",
        tags::COMPRESSION => "Compression",
        tags::PHOTOMETRIC_INTERPRETATION => "PhotometricInterpretation",
        tags::THRESHHOLDING => "Threshholding",
        tags::CELL_WIDTH => "CellWidth",
        tags::CELL_LENGTH => "CellLength",
        tags::FILL_ORDER => "FillOrder",
        tags::DOCUMENT_NAME => "DocumentName",
        tags::IMAGE_DESCRIPTION => "ImageDescription",
        tags::MAKE => "Make",
        tags::MODEL => "Model",
        tags::STRIP_OFFSETS => "StripOffsets",
        tags::ORIENTATION => "Orientation",
        tags::SAMPLES_PER_PIXEL => "SamplesPerPixel",
        tags::ROWS_PER_STRIP => "RowsPerStrip",
        tags::STRIP_BYTE_COUNTS => "StripByteCounts",
        tags::MIN_SAMPLE_VALUE => "MinSampleValue",
        tags::MAX_SAMPLE_VALUE => "MaxSampleValue",
        tags::X_RESOLUTION => "XResolution",
        tags::Y_RESOLUTION => "YResolution",
        tags::PLANAR_CONFIGURATION => "PlanarConfiguration",
        tags::PAGE_NAME => "PageName",
        tags::X_POSITION => "XPosition",
        tags::Y_POSITION => "YPosition",
        tags::FREE_OFFSETS => "FreeOffsets",
        tags::FREE_BYTE_COUNTS => "FreeByteCounts",
        tags::GRAY_RESPONSE_UNIT => "GrayResponseUnit",
        tags::GRAY_RESPONSE_CURVE => "GrayResponseCurve",
        tags::T4_OPTIONS => "T4Options",
        tags::T6_OPTIONS => "T6Options",
        tags::RESOLUTION_UNIT => "ResolutionUnit",
        tags::PAGE_NUMBER => "PageNumber",
        tags::TRANSFER_FUNCTION => "TransferFunction",
        tags::SOFTWARE => "Software",
        tags::DATE_TIME => "DateTime",
        tags::ARTIST => "Artist",
        tags::HOST_COMPUTER => "HostComputer",
        tags::PREDICTOR => "Predictor",
        tags::WHITE_POINT => "WhitePoint",
        tags::PRIMARY_CHROMATICITIES => "PrimaryChromaticities",
        tags::COLOR_MAP => "ColorMap",
        tags::HALFTONE_HINTS => "HalftoneHints",
        tags::TILE_WIDTH => "TileWidth",
        tags::TILE_LENGTH => "TileLength",
        tags::TILE_OFFSETS => "TileOffsets",
        tags::TILE_BYTE_COUNTS => "TileByteCounts",
        tags::BAD_FAX_LINES => "BadFaxLines",
        tags::CLEAN_FAX_DATA => "CleanFaxData",
        tags::CONSECUTIVE_BAD_FAX_LINES => "ConsecutiveBadFaxLines",
        tags::SUB_IFDS => "SubIFDs",
        tags::INK_SET => "InkSet",
        tags::INK_NAMES => "InkNames",
        tags::NUMBER_OF_INKS => "NumberOfInks",
        tags::DOT_RANGE => "DotRange",
        tags::TARGET_PRINTER => "TargetPrinter",
        tags::EXTRA_SAMPLES => "ExtraSamples",
        tags::SAMPLE_FORMAT => "SampleFormat",
        tags::S_MIN_SAMPLE_VALUE => "SMinSampleValue",
        tags::S_MAX_SAMPLE_VALUE => "SMaxSampleValue",
        tags::TRANSFER_RANGE => "TransferRange",
        tags::CLIP_PATH => "ClipPath",
        tags::X_CLIP_PATH_UNITS => "XClipPathUnits",
        tags::Y_CLIP_PATH_UNITS => "YClipPathUnits",
        tags::INDEXED => "Indexed",
        tags::JPEG_TABLES => "JPEGTables",
        tags::OPI_PROXY => "OPIProxy",
        tags::JPEG_PROC => "JPEGProc",
        tags::JPEG_INTERCHANGE_FORMAT => "JPEGInterchangeFormat",
        tags::JPEG_INTERCHANGE_FORMAT_LENGTH => "JPEGInterchangeFormatLength",
        tags::JPEG_RESTART_INTERVAL => "JPEGRestartInterval",
        tags::JPEG_LOSSLESS_PREDICTORS => "JPEGLosslessPredictors",
        tags::JPEG_POINT_TRANSFORMS => "JPEGPointTransforms",
        tags::JPEG_Q_TABLES => "JPEGQTables",
        tags::JPEG_DC_TABLES => "JPEGDCTables",
        tags::JPEG_AC_TABLES => "JPEGACTables",
        tags::YCBCR_COEFFICIENTS => "YCbCrCoefficients",
        tags::YCBCR_SUB_SAMPLING => "YCbCrSubSampling",
        tags::YCBCR_POSITIONING => "YCbCrPositioning",
        tags::REFERENCE_BLACK_WHITE => "ReferenceBlackWhite",
        tags::XMP => "XMP",
        tags::IMAGE_ID => "ImageID",
        tags::PRINT_IM => "PrintIM",
        tags::COPYRIGHT => "Copyright",
        tags::MODEL_PIXEL_SCALE => "ModelPixelScaleTag",
        tags::IPTC => "IPTC",
        tags::MODEL_TIEPOINT => "ModelTiepointTag",
        tags::MODEL_TRANSFORMATION => "ModelTransformationTag",
        tags::PSIR => "PSIR",
        tags::EXIF_IFD => "ExifIFD",
        tags::ICC_PROFILE => "ICCProfile",
        tags::GEO_KEY_DIRECTORY => "GeoKeyDirectoryTag",
        tags::GEO_DOUBLE_PARAMS => "GeoDoubleParamsTag",
        tags::GEO_ASCII_PARAMS => "GeoAsciiParamsTag",
        tags::GPS_IFD => "GPSIFD",
        tags::IMAGE_SOURCE_DATA => "ImageSourceData",
        _ => return None,
    };
    Some(name)
}
