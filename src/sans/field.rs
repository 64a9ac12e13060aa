//! Decoding of individual field values.

use alloc::{string::String, vec::Vec};

use log::warn;
use tartan_bitfield::bitfield;

use crate::catalog::{Prefixed, Primitive, Scalar};

use super::{data::Value, header::ByteOrder};

bitfield! {
    struct NibblePair(u8) {
        [0..4] low: u8,
        [4..8] high: u8,
    }
}

/// Element kinds of a `Vn` field, indexed by type tag. Tag 9 is unassigned.
const VARIANT_TAGS: [Option<VariantKind>; 14] = {
    use Primitive::*;
    use VariantKind::{Pad, Value as V};

    [
        Some(Pad),
        Some(V(Scalar::Fixed(U1))),
        Some(V(Scalar::Fixed(U2))),
        Some(V(Scalar::Fixed(U4))),
        Some(V(Scalar::Fixed(I1))),
        Some(V(Scalar::Fixed(I2))),
        Some(V(Scalar::Fixed(I4))),
        Some(V(Scalar::Fixed(R4))),
        Some(V(Scalar::Fixed(R8))),
        None,
        Some(V(Scalar::Prefixed(Prefixed::Cn))),
        Some(V(Scalar::Prefixed(Prefixed::Bn))),
        Some(V(Scalar::Prefixed(Prefixed::Dn))),
        Some(V(Scalar::Nibble)),
    ]
};

#[derive(Debug, Clone, Copy)]
enum VariantKind {
    /// `B0`, which occupies no bytes.
    Pad,
    Value(Scalar),
}

/// Whether the next nibble starts a new byte, or completes the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    Fresh,
    Pending,
}

/// Cursor over a single record body.
///
/// The cursor never reads past the end of the body slice. Reads near the end
/// return as many bytes as remain, and callers decide how to interpret a
/// short result.
#[derive(Debug)]
pub struct Context<'b> {
    body: &'b [u8],
    position: usize,
    order: ByteOrder,
    parity: Parity,
}

impl<'b> Context<'b> {
    pub fn new(body: &'b [u8], order: ByteOrder) -> Self {
        Self {
            body,
            position: 0,
            order,
            parity: Parity::Fresh,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.body.len()
    }

    /// Whether a nibble was taken from the high half of the last byte, so
    /// that the next nibble reuses it.
    pub fn is_nibble_pending(&self) -> bool {
        self.parity == Parity::Pending
    }

    /// Decode one scalar value.
    pub fn scalar(&mut self, scalar: Scalar) -> Value {
        match scalar {
            Scalar::Fixed(p) => self.fixed(p),
            Scalar::Nibble => self.nibble(),
            Scalar::Prefixed(p) => self.prefixed(p),
        }
    }

    /// Decode a fixed-width primitive.
    ///
    /// If the body ends early, integers are read from the bytes that remain,
    /// and an `R8` with at least 4 bytes remaining is read as an `R4`.
    pub fn fixed(&mut self, primitive: Primitive) -> Value {
        self.parity = Parity::Fresh;

        let width = primitive.width();
        let r = self.take(width);

        if r.is_empty() {
            return Value::Absent;
        }

        if r.len() < width {
            warn!(
                "Field {primitive:?} truncated to {} of {width} bytes at offset {}.",
                r.len(),
                self.position - r.len(),
            );
        }

        let u = self.unsigned(r);
        let i = self.signed(r);

        match primitive {
            Primitive::U1 | Primitive::B1 => Value::U8(u as u8),
            Primitive::U2 => Value::U16(u as u16),
            Primitive::U4 => Value::U32(u as u32),
            Primitive::U8 => Value::U64(u),
            Primitive::I1 => Value::I8(i as i8),
            Primitive::I2 => Value::I16(i as i16),
            Primitive::I4 => Value::I32(i as i32),
            Primitive::I8 => Value::I64(i),
            Primitive::C1 => Value::Char(char::from(r[0])),
            Primitive::R4 if r.len() == 4 => Value::F32(f32::from_bits(u as u32)),
            Primitive::R8 if r.len() == 8 => Value::F64(f64::from_bits(u)),
            Primitive::R8 if r.len() >= 4 => {
                let u = self.unsigned(&r[..4]);
                Value::F64(f32::from_bits(u as u32).into())
            }
            Primitive::R4 | Primitive::R8 => Value::Absent,
        }
    }

    /// Decode a length-prefixed string or byte array.
    pub fn prefixed(&mut self, prefixed: Prefixed) -> Value {
        self.parity = Parity::Fresh;

        let prefix = self.take(prefixed.prefix_width());
        let n = self.unsigned(prefix) as usize;
        let n = if prefixed.counts_bits() {
            n.div_ceil(8)
        } else {
            n
        };

        let r: &[u8] = if n != 0 { self.take(n) } else { &[] };

        if r.len() < n {
            warn!(
                "Field {prefixed:?} truncated to {} of {n} bytes at offset {}.",
                r.len(),
                self.position - r.len(),
            );
        }

        if prefixed.is_text() {
            Value::Str(String::from_utf8_lossy(r).into_owned())
        } else {
            Value::Bytes(r.to_vec())
        }
    }

    /// Decode a nibble.
    ///
    /// The first of a pair reads a byte and returns its high half. The second
    /// steps back over the same byte and returns its low half.
    pub fn nibble(&mut self) -> Value {
        if self.parity == Parity::Pending {
            self.position = self.position.saturating_sub(1);
        }

        let Some(&b) = self.take(1).first() else {
            return Value::Absent;
        };

        let pair = NibblePair(b);

        match self.parity {
            Parity::Fresh => {
                self.parity = Parity::Pending;
                Value::U8(pair.high())
            }
            Parity::Pending => {
                self.parity = Parity::Fresh;
                Value::U8(pair.low())
            }
        }
    }

    /// Decode `count` elements of the same kind.
    pub fn array(&mut self, element: Scalar, count: usize) -> Value {
        let items = (0..count).map(|_| self.scalar(element)).collect();
        self.parity = Parity::Fresh;
        Value::Array(items)
    }

    /// Decode an array of elements each preceded by a type tag.
    ///
    /// Elements with an unassigned tag are dropped. Tags do not reset nibble
    /// parity, so an `N1` element directly after another steps back onto its
    /// own tag byte.
    pub fn variant(&mut self) -> Value {
        let count = self.take(2);
        let count = self.unsigned(count) as usize;
        let mut items = Vec::new();

        for _ in 0..count {
            let Some(&tag) = self.take(1).first() else {
                warn!("Variant field ends after {} of {count} elements.", items.len());
                break;
            };

            match VARIANT_TAGS.get(tag as usize).copied().flatten() {
                Some(VariantKind::Pad) => {}
                Some(VariantKind::Value(scalar)) => items.push(self.scalar(scalar)),
                None => warn!(
                    "Dropping variant element with unassigned tag {tag} at offset {}.",
                    self.position - 1,
                ),
            }
        }

        self.parity = Parity::Fresh;
        Value::Array(items)
    }

    /// Take up to `n` bytes from the body, advancing the cursor.
    fn take(&mut self, n: usize) -> &'b [u8] {
        let s = self.position.min(self.body.len());
        let e = s.saturating_add(n).min(self.body.len());
        self.position = e;

        &self.body[s..e]
    }

    /// Read an unsigned integer of any width up to 8 bytes.
    fn unsigned(&self, r: &[u8]) -> u64 {
        let fold = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);

        match self.order {
            ByteOrder::Little => r.iter().rev().fold(0, fold),
            ByteOrder::Big => r.iter().fold(0, fold),
        }
    }

    /// Read a sign-extended integer of any width up to 8 bytes.
    fn signed(&self, r: &[u8]) -> i64 {
        if r.is_empty() {
            return 0;
        }

        let shift = 64 - 8 * r.len().min(8) as u32;
        ((self.unsigned(r) << shift) as i64) >> shift
    }
}
