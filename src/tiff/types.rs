//! TIFF field data types
//!
//! The twelve scalar types of TIFF 6.0 plus the IFD pointer type from
//! Supplement 1. Unknown type codes are preserved so that a single
//! exotic field does not abort parsing of an otherwise healthy
//! directory.

/// A TIFF field data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 8-bit unsigned integer
    Byte,
    /// 8-bit byte containing a 7-bit ASCII code, NUL terminated
    Ascii,
    /// 16-bit unsigned integer
    Short,
    /// 32-bit unsigned integer
    Long,
    /// Two LONGs: numerator and denominator
    Rational,
    /// 8-bit signed integer
    SByte,
    /// 8-bit byte with unspecified format
    Undefined,
    /// 16-bit signed integer
    SShort,
    /// 32-bit signed integer
    SLong,
    /// Two SLONGs: numerator and denominator
    SRational,
    /// Single precision IEEE floating point
    Float,
    /// Double precision IEEE floating point
    Double,
    /// 32-bit offset of a sub-IFD (Supplement 1)
    Ifd,
    /// Type code not defined by TIFF 6.0 or its supplements
    Unknown(u16),
}

impl FieldType {
    /// Decode a type code from an IFD entry
    pub fn from_code(code: u16) -> FieldType {
        match code {
            1 => FieldType::Byte,
            2 => FieldType::Ascii,
            3 => FieldType::Short,
            4 => FieldType::Long,
            5 => FieldType::Rational,
            6 => FieldType::SByte,
            7 => FieldType::Undefined,
            8 => FieldType::SShort,
            9 => FieldType::SLong,
            10 => FieldType::SRational,
            11 => FieldType::Float,
            12 => FieldType::Double,
            13 => FieldType::Ifd,
            other => FieldType::Unknown(other),
        }
    }

    /// The numeric code stored in an IFD entry
    pub fn code(&self) -> u16 {
        match self {
            FieldType::Byte => 1,
            FieldType::Ascii => 2,
            FieldType::Short => 3,
            FieldType::Long => 4,
            FieldType::Rational => 5,
            FieldType::SByte => 6,
            FieldType::Undefined => 7,
            FieldType::SShort => 8,
            FieldType::SLong => 9,
            FieldType::SRational => 10,
            FieldType::Float => 11,
            FieldType::Double => 12,
            FieldType::Ifd => 13,
            FieldType::Unknown(code) => *code,
        }
    }

    /// Byte size of a single value of this type
    ///
    /// Unknown types report zero, which makes fields of such types
    /// carry no data instead of being rejected.
    pub fn size(&self) -> u32 {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float | FieldType::Ifd => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
            FieldType::Unknown(_) => 0,
        }
    }

    /// Indicate if this is one of the TIFF integer types
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            FieldType::Byte
                | FieldType::Short
                | FieldType::Long
                | FieldType::SByte
                | FieldType::SShort
                | FieldType::SLong
        )
    }

    /// Indicate if this is one of the TIFF rational types
    pub fn is_rational(&self) -> bool {
        matches!(self, FieldType::Rational | FieldType::SRational)
    }

    /// Indicate if this is one of the TIFF floating point types
    pub fn is_float(&self) -> bool {
        matches!(self, FieldType::Float | FieldType::Double)
    }

    /// Human-readable name of this type
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Byte => "Byte",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "Short",
            FieldType::Long => "Long",
            FieldType::Rational => "Rational",
            FieldType::SByte => "SByte",
            FieldType::Undefined => "Undefined",
            FieldType::SShort => "SShort",
            FieldType::SLong => "SLong",
            FieldType::SRational => "SRational",
            FieldType::Float => "Float",
            FieldType::Double => "Double",
            FieldType::Ifd => "IFD",
            FieldType::Unknown(_) => "Unknown",
        }
    }
}
