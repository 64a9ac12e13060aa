#![no_std]

//! A decoder for the Standard Test Data Format (STDF V4), the record stream
//! written by semiconductor automatic test equipment.
//!
//! A stream is a sequence of records, each a 4-byte header followed by a body
//! whose fields are laid out according to the record's type. The crate turns
//! such a stream into records of named, typed values, using a [`Catalog`] of
//! record layouts.
//!
//! Most users should begin with the iterators and derive macros in the
//! [`avec`] module. If these prove insufficient, consider driving the state
//! machine in the [`sans`] module directly.
//!
//! ```
//! let catalog = Catalog::v4();
//! let stream = Stream::open("lot.stdf.gz", &catalog)?;
//!
//! for record in stream.records() {
//!     let record = record?;
//!     if record.name == "PTR" {
//!         println!("{:?}", record.fields["RESULT"]);
//!     }
//! }
//! ```
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader and file based streams (default).
//! - `gzip`: decompress `.gz` files when opening streams (default).
//!
//! [`Catalog`]: catalog::Catalog

extern crate alloc;

pub mod avec;
pub mod catalog;
pub mod sans;
