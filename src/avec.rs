//! Convenience interfaces for common decoding patterns.
//!
//! The iterators in this module decode records from data slices and files.
//! Records can also be published to the [`FromRecords`] and [`FromRecord`]
//! traits.
//!
//! In many cases (when records are of a known shape), these traits can be
//! derived. See the [`FromRecords`](macro@FromRecords) and
//! [`FromRecord`](macro@FromRecord) macros for details.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::sans::{data::Value, header::RecordHeader};

/// Derive [`FromRecords`] for a struct holding a collection of records.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single record, add the `record("NAME")` attribute to an
/// `Option<T>` struct field, where `NAME` is the record name and `T` is a type
/// implementing [`FromRecord`] and [`Default`]. Additional records of the same
/// name overwrite earlier ones. To collect every occurrence of a record, apply
/// the attribute to a `Vec<T>` instead.
///
/// ```
/// #[derive(Debug, Default, FromRecords)]
/// struct Lot {
///     #[record("MIR")]
///     info: Option<MasterInformation>,
///     #[record("PTR")]
///     results: Vec<ParametricTest>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use stdf_reader_derive::FromRecords;

/// Produce record receivers for a stream.
///
/// See the [`FromRecords`](macro@FromRecords) derive macro for an automatic
/// implementation of this trait.
pub trait FromRecords {
    /// Retrieve a receiver for a record, if one exists.
    fn add_record(&mut self, name: &str) -> Option<&mut dyn FromRecord>;
}

/// Derive [`FromRecord`] for a struct representing a single record.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a field, add the `field("NAME")` attribute to an `Option<T>`
/// struct field, where `T` implements `TryFrom<&Value>`. Values that are
/// absent or of another type are skipped. To receive the record header,
/// supply `header` in place of a field name.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct ParametricTest {
///     #[field(header)]
///     header: Option<RecordHeader>,
///     #[field("TEST_NUM")]
///     test_num: Option<u32>,
///     #[field("RESULT")]
///     result: Option<f32>,
///     #[field("TEST_TXT")]
///     test_txt: Option<String>,
/// }
/// ```
///
/// To receive arrays item-by-item, or to convert into arbitrary types, supply
/// an accumulator closure. Since the element type cannot be inferred, the
/// second argument must be typed. Scalar fields call the closure once.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct SiteDescription {
///     #[field("SITE_NUM", |v, s: u8| v.push(s))]
///     sites: Vec<u8>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use stdf_reader_derive::FromRecord;

/// Receive field values for a record.
///
/// Fields are published in layout order, including those marked
/// [`Value::Absent`].
///
/// The default implementation of each method ignores received values.
///
/// See the [`FromRecord`](macro@FromRecord) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromRecord {
    /// Add the record header to the record.
    fn add_header(&mut self, header: &RecordHeader) {}
    /// Add a field value to the record.
    fn add_value(&mut self, field: &str, value: &Value) {}
}
