//! Derive macros for the `stdf-reader` record receiver traits.
//!
//! Generated implementations refer to items by their `::stdf_reader` path, so
//! the main crate must be a direct dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod container;
mod from_record;
mod from_records;

/// Implement `FromRecord` from `#[field("NAME")]` and `#[field(header)]`
/// attributes.
#[proc_macro_derive(FromRecord, attributes(field))]
pub fn derive_from_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_record::expand_from_record(&input).unwrap_or_else(|err| err.to_compile_error().into())
}

/// Implement `FromRecords` from `#[record("NAME")]` attributes.
#[proc_macro_derive(FromRecords, attributes(record))]
pub fn derive_from_records(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_records::expand_from_records(&input).unwrap_or_else(|err| err.to_compile_error().into())
}
