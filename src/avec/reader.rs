//! Reader-based decoder implementation.
//!
//! Streams are read to the end before decoding begins.
//!
//! _Requires Cargo feature `std`._

extern crate std;

use alloc::vec::Vec;
use std::{fs::File, io::Read, path::Path};

use log::info;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    sans::{endian, header::ByteOrder},
};

use super::{
    FromRecords,
    slice::{self, Index, Records},
};

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error decoding the stream.
    #[error(transparent)]
    Decode(#[from] slice::Error),
    /// A gzip-compressed file was opened without the `gzip` feature.
    #[error("Decompressing gzip files requires the `gzip` feature.")]
    Gzip,
}

/// A fully materialised stream of records.
///
/// The byte order is detected once, when the stream is created.
#[derive(Debug)]
pub struct Stream<'c> {
    data: Vec<u8>,
    catalog: &'c Catalog,
    order: ByteOrder,
}

impl<'c> Stream<'c> {
    /// Take ownership of a buffer holding a stream.
    pub fn new(data: Vec<u8>, catalog: &'c Catalog) -> Result<Self, Error> {
        info!("Buffered {} bytes of stream data.", data.len());

        let order = endian::detect(&data, catalog).map_err(slice::Error::from)?;

        Ok(Self {
            data,
            catalog,
            order,
        })
    }

    /// Read a stream to its end.
    pub fn from_reader(r: &mut impl Read, catalog: &'c Catalog) -> Result<Self, Error> {
        let mut data = Vec::new();
        r.read_to_end(&mut data)?;

        Self::new(data, catalog)
    }

    /// Read a stream from a file.
    ///
    /// Files with a `.gz` extension are decompressed (_requires Cargo feature
    /// `gzip`_). Other files are read as they are.
    pub fn open(path: impl AsRef<Path>, catalog: &'c Catalog) -> Result<Self, Error> {
        let path = path.as_ref();
        info!("Reading stream from {}.", path.display());

        let mut file = File::open(path)?;

        if path.extension().is_some_and(|e| e == "gz") {
            #[cfg(feature = "gzip")]
            return Self::from_reader(&mut flate2::read::GzDecoder::new(file), catalog);

            #[cfg(not(feature = "gzip"))]
            return Err(Error::Gzip);
        }

        Self::from_reader(&mut file, catalog)
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over the records of the stream from its start.
    pub fn records(&self) -> Records<'_, 'c> {
        Records::with_byte_order(&self.data, self.catalog, self.order)
    }

    /// Iterate over the names and positions of the records of the stream from
    /// its start.
    pub fn index(&self) -> Index<'_, 'c> {
        Index::with_byte_order(&self.data, self.catalog, self.order)
    }
}

/// Decode records from a reader of a stream, publishing to a receiver.
///
/// This method is also re-exported as `stdf_reader::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, catalog: &Catalog, o: &mut impl FromRecords) -> Result<(), Error> {
    let mut data = Vec::new();
    r.read_to_end(&mut data)?;

    slice::decode(&data, catalog, o)?;

    Ok(())
}
