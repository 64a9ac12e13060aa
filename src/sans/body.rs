//! States processing record bodies.

use log::debug;

use crate::catalog::{FormatSpec, RecordType};

use super::{
    count::{self, CountError},
    data::{Fields, Value},
    field::Context,
    header::{AwaitingHeader, ByteOrder, RecordHeader},
};

/// State token to decode the body of a record of a known type.
#[derive(Debug)]
pub struct DecodingBody<'c> {
    pub(super) header: RecordHeader,
    pub(super) record_type: &'c RecordType,
    pub(super) order: ByteOrder,
}

impl<'c> DecodingBody<'c> {
    pub fn header(&self) -> RecordHeader {
        self.header
    }

    pub fn name(&self) -> &'c str {
        &self.record_type.name
    }

    /// Transition to another state by decoding a record body.
    ///
    /// Bytes beyond the header's declared length are ignored. Fields not
    /// reached before the body ends are marked [`Value::Absent`].
    ///
    /// Returns the decoded fields, and a successor state token.
    pub fn advance(self, r: &[u8]) -> Result<(Fields<'c>, AwaitingHeader), CountError> {
        let record_type = self.record_type;
        let r = r.get(..self.header.length as usize).unwrap_or(r);

        let mut context = Context::new(r, self.order);
        let mut fields = Fields::with_capacity(record_type.fields.len());

        for spec in record_type.fields.iter() {
            // The second nibble of a pair reuses the last byte.
            let is_second_nibble = spec.format.is_nibble() && context.is_nibble_pending();

            if !is_second_nibble && context.is_exhausted() {
                break;
            }

            let value = match spec.format {
                FormatSpec::Scalar(scalar) => context.scalar(scalar),
                FormatSpec::Array(element) => {
                    let n = count::resolve(&record_type.name, &spec.name, &fields)?;
                    context.array(element, n)
                }
                FormatSpec::Variant => context.variant(),
            };

            fields.push(&spec.name, value);
        }

        if fields.len() < record_type.fields.len() {
            debug!(
                "{} body ended after {} of {} fields.",
                record_type.name,
                fields.len(),
                record_type.fields.len(),
            );

            for spec in record_type.fields.iter().skip(fields.len()) {
                fields.push(&spec.name, Value::Absent);
            }
        }

        Ok((fields, AwaitingHeader { order: self.order }))
    }

    /// Transition to another state without decoding the record body.
    pub fn skip(self) -> AwaitingHeader {
        AwaitingHeader { order: self.order }
    }
}

/// State token to pass over the body of a record of an unknown type.
#[derive(Debug)]
pub struct SkippingBody {
    pub(super) order: ByteOrder,
}

impl SkippingBody {
    /// Transition to another state, discarding the record body.
    pub fn advance(self) -> AwaitingHeader {
        AwaitingHeader { order: self.order }
    }
}
