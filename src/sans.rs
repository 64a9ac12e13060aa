//! Internal state machine for implementing decoders.
//!
//! This module is intended for applications that need control over how bytes
//! reach the decoder. See [`crate::avec`] for iterators covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! Every record passes through the same states. An [`AwaitingHeader`] token
//! consumes the 4 header bytes and resolves the record's type against a
//! [`Catalog`](crate::catalog::Catalog), yielding either a
//! [`DecodingBody`](body::DecodingBody) token for known types or a
//! [`SkippingBody`](body::SkippingBody) token for unknown ones. Both consume
//! the record body and return a fresh [`AwaitingHeader`].
//!
//! The byte order is chosen once, before the first header, by
//! [`endian::detect`], and is carried by each token from then on.
//!
//! Some parts of the decoding process are not represented in the state
//! machine and must be written carefully by the caller:
//!
//! - Supplying the body as a slice of at most `header.length` bytes, taken
//! from directly after the header. Supplying fewer bytes is allowed, trailing
//! fields are then marked [`Value::Absent`](data::Value::Absent).
//!
//! - Ending decoding once fewer than 4 bytes remain for a header.

pub mod body;
pub mod count;
pub mod data;
pub mod endian;
pub mod field;
pub mod header;

pub use header::AwaitingHeader;
