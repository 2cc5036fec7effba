//! # luxem
//!
//! A streaming codec for luxem, a typed data serialization format similar
//! to JSON.
//!
//! ## What is luxem?
//!
//! luxem looks like relaxed JSON with type annotations: primitives don't
//! need quotes unless they contain structural characters, any value can be
//! prefixed with a `(type)` annotation, commas are trailing-friendly, and
//! `*comments*` are allowed between tokens.
//!
//! ```text
//! {
//!     path: /usr/bin,
//!     iterations: (int) 10,
//!     inputs: [batch001, batch002, (optional) batch003],
//! },
//! ```
//!
//! ## Key Features
//!
//! - **Streaming tokenizer**: [`Reader`] is a resumable state machine; feed
//!   it arbitrarily small chunks and get an identical event sequence
//! - **Generic trees**: [`from_slice`] loads whole documents into
//!   [`Value`] trees; [`to_string`] and friends write them back
//! - **Structural extraction**: describe a schema with [`Extract`] and
//!   receive converted values through callbacks, no intermediate tree
//! - **Serde Compatible**: convert any `Serialize` type into a [`Value`]
//!   tree with [`to_value`]; enum variants become luxem type annotations
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use luxem::{from_slice, to_string, Value};
//!
//! let doc = from_slice(b"{key: 7}").unwrap();
//! assert_eq!(
//!     doc[0].as_mapping().unwrap().get("key"),
//!     Some(&Value::from("7")),
//! );
//!
//! assert_eq!(to_string(&doc).unwrap(), "{key:7,},");
//! ```
//!
//! ### Streaming
//!
//! ```rust
//! use luxem::{Reader, TreeBuilder};
//!
//! let mut reader = Reader::new(TreeBuilder::new());
//! for chunk in [&b"[a"[..], &b"b, "[..], &b"cd]"[..]] {
//!     reader.feed(chunk, false).unwrap();
//! }
//! reader.feed(b"", true).unwrap();
//! let doc = reader.into_sink().finish().unwrap();
//! assert_eq!(doc[0].as_sequence().unwrap().len(), 2);
//! ```
//!
//! ### Extraction
//!
//! ```rust
//! use luxem::{extract, Extract, ObjectShape};
//!
//! let mut iterations = 0;
//! extract(
//!     b"{iterations: (int) 10}",
//!     Extract::object(ObjectShape::new().field(
//!         "iterations",
//!         Extract::int(|n| {
//!             iterations = n;
//!             Ok(())
//!         }),
//!     )),
//! )
//! .unwrap();
//! assert_eq!(iterations, 10);
//! ```
//!
//! ### Building values with the luxem! macro
//!
//! ```rust
//! use luxem::{luxem, to_string_pretty};
//!
//! let doc = luxem!({
//!     "key1": "val1"
//! });
//! assert_eq!(to_string_pretty(&[doc]).unwrap(), "{\n    key1: val1,\n},\n");
//! ```
//!
//! ## Format Reference
//!
//! See the [`spec`] module for the full text-format description.

pub mod coerce;
pub mod dsl;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod read;
pub mod spec;
pub mod tree;
pub mod value;
pub mod write;

pub use dsl::{extract, extract_from, ArrayShape, Extract, ObjectShape, StructValue};
pub use error::{Error, Result};
pub use map::ObjectMap;
pub use options::WriteOptions;
pub use read::{Event, EventSink, Reader};
pub use tree::TreeBuilder;
pub use value::{to_value, Typed, Value, ValueSerializer};
pub use write::Writer;

use std::io;

/// Parse a whole luxem document from bytes.
///
/// The top level of a document is an implicit sequence, so the result is a
/// `Vec<Value>` — empty input yields an empty vector.
///
/// # Examples
///
/// ```rust
/// use luxem::{from_slice, Typed, Value};
///
/// assert_eq!(
///     from_slice(b"(b)a").unwrap(),
///     vec![Value::Typed(Typed::new("b", Value::from("a")))],
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid luxem or leaves containers
/// open.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(data: &[u8]) -> Result<Vec<Value>> {
    let mut reader = Reader::new(TreeBuilder::new());
    reader.feed(data, true)?;
    reader.into_sink().finish()
}

/// Parse a whole luxem document from a string.
///
/// # Errors
///
/// Returns an error if the input is not valid luxem.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(text: &str) -> Result<Vec<Value>> {
    from_slice(text.as_bytes())
}

/// Parse a whole luxem document from an I/O stream, reading it in
/// bounded-size chunks.
///
/// # Examples
///
/// ```rust
/// use luxem::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"[a, b]")).unwrap();
/// assert_eq!(doc[0].as_sequence().unwrap().len(), 2);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid luxem.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(source: R) -> Result<Vec<Value>> {
    let mut reader = Reader::new(TreeBuilder::new());
    reader.feed_all(source)?;
    reader.into_sink().finish()
}

/// Serialize document values to a compact luxem string.
///
/// # Examples
///
/// ```rust
/// use luxem::{luxem, to_string};
///
/// let doc = vec![luxem!({"dig": "wombat"})];
/// assert_eq!(to_string(&doc).unwrap(), "{dig:wombat,},");
/// ```
///
/// # Errors
///
/// Returns an error only if the underlying sink fails, which cannot happen
/// for the in-memory buffer used here.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(doc: &[Value]) -> Result<String> {
    to_string_with_options(doc, WriteOptions::new())
}

/// Serialize document values to a pretty-printed luxem string.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(doc: &[Value]) -> Result<String> {
    to_string_with_options(doc, WriteOptions::pretty())
}

/// Serialize document values to a luxem string with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(doc: &[Value], options: WriteOptions) -> Result<String> {
    let mut writer = Writer::new(Vec::new(), options);
    for value in doc {
        writer.write(value)?;
    }
    let bytes = writer.into_inner();
    String::from_utf8(bytes).map_err(|err| Error::custom(err.to_string()))
}

/// Serialize document values to an I/O sink in compact form.
///
/// Output is streamed as it is produced and is byte-identical to the
/// buffered form.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(sink: W, doc: &[Value]) -> Result<()> {
    to_writer_with_options(sink, doc, WriteOptions::new())
}

/// Serialize document values to an I/O sink with custom options.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W: io::Write>(
    sink: W,
    doc: &[Value],
    options: WriteOptions,
) -> Result<()> {
    let mut writer = Writer::new(sink, options);
    for value in doc {
        writer.write(value)?;
    }
    Ok(())
}
