//! Record type layouts.
//!
//! A [`Catalog`] maps the (major, minor) type codes of a record header to the
//! record's name and the ordered layout of its fields. Decoders borrow the
//! catalog for their whole lifetime and never mutate it.
//!
//! The built-in STDF V4-2007 layouts are available through [`Catalog::v4`].
//! Custom layouts can be assembled from format tags:
//!
//! ```
//! let mut catalog = Catalog::v4();
//! catalog.insert(RecordType::owned(
//!     180,
//!     1,
//!     "XYZ",
//!     vec![
//!         FieldSpec::parse("SITE_CNT", "U1")?,
//!         FieldSpec::parse("SITE_NUM", "KxU1")?,
//!     ],
//! ));
//! ```

use alloc::{borrow::Cow, collections::BTreeMap, string::String, vec::Vec};
use core::str::FromStr;

use thiserror::Error;

mod v4;

/// A fixed-width primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    U1,
    U2,
    U4,
    U8,
    I1,
    I2,
    I4,
    I8,
    R4,
    R8,
    /// A single character.
    C1,
    /// A single byte of flag bits.
    B1,
}

impl Primitive {
    /// The number of bytes occupied by this primitive.
    pub const fn width(self) -> usize {
        match self {
            Self::U1 | Self::I1 | Self::C1 | Self::B1 => 1,
            Self::U2 | Self::I2 => 2,
            Self::U4 | Self::I4 | Self::R4 => 4,
            Self::U8 | Self::I8 | Self::R8 => 8,
        }
    }
}

/// A length-prefixed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefixed {
    /// Text with a 1-byte length.
    Cn,
    /// Text with a 2-byte length.
    Sn,
    /// Bytes with a 1-byte length.
    Bn,
    /// Bytes with a 2-byte length counted in bits.
    Dn,
}

impl Prefixed {
    /// The number of bytes occupied by the length prefix.
    pub const fn prefix_width(self) -> usize {
        match self {
            Self::Cn | Self::Bn => 1,
            Self::Sn | Self::Dn => 2,
        }
    }

    /// Whether the prefix counts bits rather than bytes.
    pub const fn counts_bits(self) -> bool {
        matches!(self, Self::Dn)
    }

    /// Whether the payload is text rather than raw bytes.
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Cn | Self::Sn)
    }
}

/// A single value, usable on its own or as an array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Fixed(Primitive),
    /// A half-byte, two of which share one byte.
    Nibble,
    Prefixed(Prefixed),
}

/// The encoding of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatSpec {
    Scalar(Scalar),
    /// An array whose length is stored in an earlier field of the same record.
    Array(Scalar),
    /// An array of elements each preceded by a type tag.
    Variant,
}

impl FormatSpec {
    pub(crate) const fn is_nibble(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Nibble))
    }
}

/// An error parsing a format tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatSpecError {
    /// The tag is not part of the format grammar.
    #[error("Unknown format tag ({0}).")]
    Unknown(String),
}

impl FromStr for Scalar {
    type Err = FormatSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Primitive::*;

        let scalar = match s {
            "U1" => Self::Fixed(U1),
            "U2" => Self::Fixed(U2),
            "U4" => Self::Fixed(U4),
            "U8" => Self::Fixed(U8),
            "I1" => Self::Fixed(I1),
            "I2" => Self::Fixed(I2),
            "I4" => Self::Fixed(I4),
            "I8" => Self::Fixed(I8),
            "R4" => Self::Fixed(R4),
            "R8" => Self::Fixed(R8),
            "C1" => Self::Fixed(C1),
            "B1" => Self::Fixed(B1),
            "N1" => Self::Nibble,
            "Cn" => Self::Prefixed(Prefixed::Cn),
            "Sn" => Self::Prefixed(Prefixed::Sn),
            "Bn" => Self::Prefixed(Prefixed::Bn),
            "Dn" => Self::Prefixed(Prefixed::Dn),
            _ => Err(FormatSpecError::Unknown(s.into()))?,
        };

        Ok(scalar)
    }
}

impl FromStr for FormatSpec {
    type Err = FormatSpecError;

    /// Parse a format tag, such as `U4`, `Cn`, `KxU2` or `Vn`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Vn" {
            return Ok(Self::Variant);
        }

        let element = s
            .strip_prefix("Kx")
            .or_else(|| s.strip_prefix("Kn"))
            .or_else(|| s.strip_prefix("K0"));

        match element {
            Some(element) => element
                .parse()
                .map(Self::Array)
                .map_err(|_| FormatSpecError::Unknown(s.into())),
            None => s.parse().map(Self::Scalar),
        }
    }
}

/// A named field within a record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: Cow<'static, str>,
    pub format: FormatSpec,
}

impl FieldSpec {
    pub const fn new(name: &'static str, format: FormatSpec) -> Self {
        Self {
            name: Cow::Borrowed(name),
            format,
        }
    }

    /// Build a field from its name and format tag.
    pub fn parse(name: impl Into<String>, tag: &str) -> Result<Self, FormatSpecError> {
        Ok(Self {
            name: Cow::Owned(name.into()),
            format: tag.parse()?,
        })
    }
}

/// The layout of one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    pub major: u8,
    pub minor: u8,
    pub name: Cow<'static, str>,
    pub fields: Cow<'static, [FieldSpec]>,
}

impl RecordType {
    pub const fn new(
        major: u8,
        minor: u8,
        name: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            major,
            minor,
            name: Cow::Borrowed(name),
            fields: Cow::Borrowed(fields),
        }
    }

    pub fn owned(major: u8, minor: u8, name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            major,
            minor,
            name: Cow::Owned(name.into()),
            fields: Cow::Owned(fields),
        }
    }

    /// The number of body bytes needed to hold every fixed-width field,
    /// with empty strings and zero-length arrays.
    pub fn min_length(&self) -> usize {
        self.fields
            .iter()
            .map(|f| match f.format {
                FormatSpec::Scalar(Scalar::Fixed(p)) => p.width(),
                FormatSpec::Scalar(Scalar::Nibble) => 1,
                FormatSpec::Scalar(Scalar::Prefixed(p)) => p.prefix_width(),
                FormatSpec::Array(_) => 0,
                FormatSpec::Variant => 2,
            })
            .sum()
    }
}

/// A registry of record layouts keyed by type codes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: BTreeMap<(u8, u8), RecordType>,
}

impl Catalog {
    pub fn new(types: impl IntoIterator<Item = RecordType>) -> Self {
        let mut catalog = Self::default();
        types.into_iter().for_each(|t| {
            catalog.insert(t);
        });
        catalog
    }

    /// The layouts defined by STDF V4-2007.
    pub fn v4() -> Self {
        Self::new(v4::RECORD_TYPES.iter().cloned())
    }

    /// Register a layout, returning any layout it replaces.
    pub fn insert(&mut self, record_type: RecordType) -> Option<RecordType> {
        self.types
            .insert((record_type.major, record_type.minor), record_type)
    }

    pub fn get(&self, major: u8, minor: u8) -> Option<&RecordType> {
        self.types.get(&(major, minor))
    }

    pub fn by_name(&self, name: &str) -> Option<&RecordType> {
        self.types.values().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordType> {
        self.types.values()
    }
}
