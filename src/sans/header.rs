//! States processing record headers.

use either::Either::{self, Left, Right};
use log::{debug, warn};
use zerocopy::FromBytes;

use crate::catalog::Catalog;

use super::body::{DecodingBody, SkippingBody};

/// The number of bytes in a record header.
pub const HEADER_SIZE: usize = 4;

/// The name given to records whose type is missing from the catalog.
pub const UNKNOWN: &str = "UNK";

/// Byte order of multi-byte values in a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Used when a stream does not begin with an identification record.
    #[default]
    Little,
    Big,
}

/// A decoded record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHeader {
    /// The number of bytes in the record body.
    pub length: u16,
    pub major: u8,
    pub minor: u8,
}

/// State token to decode a record header.
#[derive(Debug)]
pub struct AwaitingHeader {
    pub(super) order: ByteOrder,
}

impl AwaitingHeader {
    pub fn new(order: ByteOrder) -> Self {
        Self { order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Transition to another state by decoding a record header.
    ///
    /// Returns the header, and a successor state token: one decoding the body
    /// if the catalog knows the record type, or one skipping it otherwise.
    pub fn advance<'c>(
        self,
        r: [u8; HEADER_SIZE],
        catalog: &'c Catalog,
    ) -> (RecordHeader, Either<DecodingBody<'c>, SkippingBody>) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawHeader {
            length: [u8; 2],
            major: u8,
            minor: u8,
        }

        let RawHeader {
            length,
            major,
            minor,
        } = zerocopy::transmute!(r);

        let length = match self.order {
            ByteOrder::Little => u16::from_le_bytes(length),
            ByteOrder::Big => u16::from_be_bytes(length),
        };

        let header = RecordHeader {
            length,
            major,
            minor,
        };

        let successor = match catalog.get(major, minor) {
            Some(record_type) => {
                debug!("Header of {} with {length} body bytes.", record_type.name);
                Left(DecodingBody {
                    header,
                    record_type,
                    order: self.order,
                })
            }
            None => {
                warn!("Record type ({major}, {minor}) not found in catalog, skipping {length} bytes.");
                Right(SkippingBody { order: self.order })
            }
        };

        (header, successor)
    }
}
