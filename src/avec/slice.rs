//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use log::{debug, info};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    sans::{
        AwaitingHeader,
        count::CountError,
        data::{Fields, Record},
        endian::{self, ByteOrderError},
        header::{ByteOrder, HEADER_SIZE, UNKNOWN},
    },
};

use super::FromRecords;

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The byte order could not be determined.
    #[error("Invalid identification record: {0}")]
    ByteOrder(#[from] ByteOrderError),
    /// An array length could not be resolved.
    #[error("Unresolved array length: {0}")]
    Count(#[from] CountError),
}

/// Iterator of the records in a slice.
///
/// Iteration ends cleanly once fewer bytes than a record header remain, and
/// ends after yielding the first error.
#[derive(Debug)]
pub struct Records<'d, 'c> {
    r: &'d [u8],
    catalog: &'c Catalog,
    i: usize, // Offset of the next header.
    state: Option<AwaitingHeader>,
}

impl<'d, 'c> Records<'d, 'c> {
    /// Begin decoding a slice, detecting its byte order.
    pub fn new(r: &'d [u8], catalog: &'c Catalog) -> Result<Self, Error> {
        let order = endian::detect(r, catalog)?;
        Ok(Self::with_byte_order(r, catalog, order))
    }

    /// Begin decoding a slice of a known byte order.
    pub fn with_byte_order(r: &'d [u8], catalog: &'c Catalog, order: ByteOrder) -> Self {
        Self {
            r,
            catalog,
            i: 0,
            state: Some(AwaitingHeader::new(order)),
        }
    }

    /// Offset of the next record header.
    pub fn offset(&self) -> usize {
        self.i
    }
}

impl<'c> Iterator for Records<'_, 'c> {
    type Item = Result<Record<'c>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        let offset = self.i;

        let Some(r) = take_header(self.r, &mut self.i) else {
            info!("End of stream at offset {offset:08}.");
            return None;
        };

        let (header, successor) = state.advance(r, self.catalog);
        let body = take_body(self.r, &mut self.i, header.length);

        let (name, fields) = match successor {
            Left(state) => {
                let name = state.name();

                debug!("Body of {name} from offset {:08}.", offset + HEADER_SIZE);

                match state.advance(body) {
                    Ok((fields, state)) => {
                        self.state = Some(state);
                        (name, fields)
                    }
                    Err(err) => return Some(Err(err.into())),
                }
            }
            Right(state) => {
                self.state = Some(state.advance());
                (UNKNOWN, Fields::default())
            }
        };

        Some(Ok(Record {
            name,
            header,
            offset,
            fields,
        }))
    }
}

/// The name and position of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'c> {
    pub name: &'c str,
    /// Offset of the record header from the start of the stream.
    pub offset: usize,
}

/// Iterator of the names and positions of the records in a slice.
///
/// Record bodies are skipped without being decoded.
#[derive(Debug)]
pub struct Index<'d, 'c> {
    r: &'d [u8],
    catalog: &'c Catalog,
    i: usize,
    state: Option<AwaitingHeader>,
}

impl<'d, 'c> Index<'d, 'c> {
    /// Begin indexing a slice, detecting its byte order.
    pub fn new(r: &'d [u8], catalog: &'c Catalog) -> Result<Self, Error> {
        let order = endian::detect(r, catalog)?;
        Ok(Self::with_byte_order(r, catalog, order))
    }

    /// Begin indexing a slice of a known byte order.
    pub fn with_byte_order(r: &'d [u8], catalog: &'c Catalog, order: ByteOrder) -> Self {
        Self {
            r,
            catalog,
            i: 0,
            state: Some(AwaitingHeader::new(order)),
        }
    }
}

impl<'c> Iterator for Index<'_, 'c> {
    type Item = Entry<'c>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        let offset = self.i;

        let r = take_header(self.r, &mut self.i)?;
        let (header, successor) = state.advance(r, self.catalog);
        take_body(self.r, &mut self.i, header.length);

        let (name, state) = match successor {
            Left(state) => (state.name(), state.skip()),
            Right(state) => (UNKNOWN, state.advance()),
        };

        self.state = Some(state);

        Some(Entry { name, offset })
    }
}

/// Decode records from a slice of a stream, publishing to a receiver.
///
/// This method is also re-exported as `stdf_reader::avec::decode_slice`.
pub fn decode(r: &[u8], catalog: &Catalog, o: &mut impl FromRecords) -> Result<(), Error> {
    for record in Records::new(r, catalog)? {
        let record = record?;

        // Shadow the stream receiver with that of a single record.
        let Some(o) = o.add_record(record.name) else {
            continue;
        };

        o.add_header(&record.header);

        for (field, value) in record.fields.iter() {
            o.add_value(field, value);
        }
    }

    Ok(())
}

/// Take a header from an offset in a slice, advancing the offset.
fn take_header(r: &[u8], i: &mut usize) -> Option<[u8; HEADER_SIZE]> {
    let header = *r.get(*i..)?.first_chunk::<HEADER_SIZE>()?;
    *i += HEADER_SIZE;

    Some(header)
}

/// Take up to `length` body bytes from an offset in a slice, advancing the
/// offset past the bytes taken.
fn take_body<'d>(r: &'d [u8], i: &mut usize, length: u16) -> &'d [u8] {
    let s = (*i).min(r.len());
    let e = s.saturating_add(length as usize).min(r.len());
    *i = e;

    &r[s..e]
}
