//! Byte order detection.

use either::Either::{Left, Right};
use log::{debug, error, info};
use thiserror::Error;

use crate::catalog::Catalog;

use super::{
    count::CountError,
    header::{AwaitingHeader, ByteOrder, HEADER_SIZE},
};

/// Type codes of the identification record (`FAR`).
pub const IDENTIFICATION: (u8, u8) = (0, 10);

/// An error detecting the byte order of a stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ByteOrderError {
    /// The identification record names an unknown CPU type.
    #[error("CPU type {0} is neither 1 (big-endian) nor 2 (little-endian).")]
    InvalidCpuType(u8),
    /// The identification record holds no CPU type.
    #[error("Identification record holds no CPU type.")]
    MissingCpuType,
    /// The identification record could not be decoded.
    #[error(transparent)]
    Count(#[from] CountError),
}

/// Detect the byte order of a stream from its first record.
///
/// The first record is decoded as little-endian. If it is the identification
/// record, its `CPU_TYPE` field selects the byte order. Otherwise, including
/// for empty streams, the default little-endian order is returned.
pub fn detect(r: &[u8], catalog: &Catalog) -> Result<ByteOrder, ByteOrderError> {
    let Some(header) = r.first_chunk::<HEADER_SIZE>() else {
        debug!("Stream holds no records, assuming {:?} byte order.", ByteOrder::default());
        return Ok(ByteOrder::default());
    };

    let (header, successor) = AwaitingHeader::new(ByteOrder::default()).advance(*header, catalog);

    let state = match successor {
        Left(state) if (header.major, header.minor) == IDENTIFICATION => state,
        Left(_) | Right(_) => {
            debug!(
                "First record ({}, {}) is not an identification record, assuming {:?} byte order.",
                header.major,
                header.minor,
                ByteOrder::default(),
            );
            return Ok(ByteOrder::default());
        }
    };

    let (fields, _) = state.advance(&r[HEADER_SIZE..])?;

    let order = match fields.get("CPU_TYPE").and_then(|v| u8::try_from(v).ok()) {
        Some(1) => ByteOrder::Big,
        Some(2) => ByteOrder::Little,
        Some(cpu_type) => {
            error!("Value of FAR CPU_TYPE ({cpu_type}) is not 1 or 2.");
            Err(ByteOrderError::InvalidCpuType(cpu_type))?
        }
        None => Err(ByteOrderError::MissingCpuType)?,
    };

    info!("Detected {order:?} byte order.");

    Ok(order)
}
