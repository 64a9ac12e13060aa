//! Decoded values and records.

use alloc::{string::String, vec::Vec};
use core::{ops::Index, slice};

use thiserror::Error;

use super::header::RecordHeader;

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `U1`, `B1` and `N1` fields.
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),

    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),

    F32(f32),
    F64(f64),

    Char(char),
    /// `Cn` and `Sn` fields.
    Str(String),
    /// `Bn` and `Dn` fields.
    Bytes(Vec<u8>),
    /// `Kx` and `Vn` fields.
    Array(Vec<Value>),

    /// Marks a field not present in a shortened record body.
    Absent,
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The value as an unsigned integer, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::U8(x) => Some(x.into()),
            Self::U16(x) => Some(x.into()),
            Self::U32(x) => Some(x.into()),
            Self::U64(x) => Some(x),
            Self::I8(x) => u64::try_from(x).ok(),
            Self::I16(x) => u64::try_from(x).ok(),
            Self::I32(x) => u64::try_from(x).ok(),
            Self::I64(x) => u64::try_from(x).ok(),
            _ => None,
        }
    }

    /// The elements of an array, or the value itself otherwise.
    pub fn items(&self) -> slice::Iter<'_, Value> {
        match self {
            Self::Array(items) => items.iter(),
            _ => slice::from_ref(self).iter(),
        }
    }
}

/// An error converting a [`Value`] to a Rust type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// The field was not present in the record body.
    #[error("Field is absent.")]
    Absent,
    /// The value holds a different type.
    #[error("Value is not convertible to `{expected}`.")]
    Mismatch { expected: &'static str },
}

macro_rules! value_into {
    ($into:ty, $($variant:ident),+) => {
        impl TryFrom<&Value> for $into {
            type Error = ValueError;

            fn try_from(value: &Value) -> Result<Self, Self::Error> {
                match *value {
                    $(Value::$variant(x) => Ok(x.into()),)+
                    Value::Absent => Err(ValueError::Absent),
                    _ => Err(ValueError::Mismatch {
                        expected: stringify!($into),
                    }),
                }
            }
        }
    };
}

value_into!(u8, U8);
value_into!(u16, U8, U16);
value_into!(u32, U8, U16, U32);
value_into!(u64, U8, U16, U32, U64);

value_into!(i8, I8);
value_into!(i16, I8, I16);
value_into!(i32, I8, I16, I32);
value_into!(i64, I8, I16, I32, I64);

value_into!(f32, F32);
value_into!(f64, F32, F64);

value_into!(char, Char);

impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            Value::Absent => Err(ValueError::Absent),
            _ => Err(ValueError::Mismatch { expected: "String" }),
        }
    }
}

/// Arrays convert element-wise. Byte fields convert as arrays of `U8`.
impl<T> TryFrom<&Value> for Vec<T>
where
    T: for<'v> TryFrom<&'v Value, Error = ValueError>,
{
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items.iter().map(T::try_from).collect(),
            Value::Bytes(bytes) => bytes.iter().map(|b| T::try_from(&Value::U8(*b))).collect(),
            Value::Absent => Err(ValueError::Absent),
            _ => Err(ValueError::Mismatch { expected: "Vec" }),
        }
    }
}

/// Field values of a record, in layout order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields<'c>(Vec<(&'c str, Value)>);

impl<'c> Fields<'c> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub(crate) fn push(&mut self, name: &'c str, value: Value) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'c str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'c str, &Value)> {
        self.0.iter().map(|(n, v)| (*n, v))
    }
}

impl Index<&str> for Fields<'_> {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if the record has no field of this name.
    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no field named `{name}`"),
        }
    }
}

impl<'c> IntoIterator for Fields<'c> {
    type Item = (&'c str, Value);
    type IntoIter = alloc::vec::IntoIter<(&'c str, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A decoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'c> {
    /// The record's name, or `"UNK"` for types missing from the catalog.
    pub name: &'c str,
    pub header: RecordHeader,
    /// Offset of the record header from the start of the stream.
    pub offset: usize,
    pub fields: Fields<'c>,
}
