//! Structural extraction driven directly by tokenizer events.
//!
//! This layer lets a caller describe the shape of a document and receive
//! converted values through callbacks, without materializing a generic
//! tree first. An [`Extract`] describes what to do with one value slot;
//! [`ObjectShape`] and [`ArrayShape`] compose extracts per object key and
//! per array position, nesting to any depth.
//!
//! ## Access modes
//!
//! - **Typed accessors** ([`Extract::int`], [`Extract::float`],
//!   [`Extract::bool`], [`Extract::string`], [`Extract::base64`],
//!   [`Extract::ascii16`], and the pluggable [`Extract::element`]): the
//!   accessor's conversion always applies, whether or not the source value
//!   carried a matching type annotation — the annotation is informational
//!   at this layer.
//! - **[`Extract::tree`]** (struct mode): auto-builds a [`StructValue`]
//!   tree, converting any value whose annotation names a built-in type
//!   (`int`, `float`, `bool`, `string`, `ascii16`, `base64`); values with
//!   unrecognized annotations keep their [`StructValue::Typed`] wrapper
//!   unconverted.
//! - **[`Extract::passthrough`]**: hands over the raw
//!   `(annotation, text)` pair with no conversion at all.
//!
//! ## Example
//!
//! ```rust
//! use luxem::{extract, ArrayShape, Extract, ObjectShape};
//!
//! let source = b"{iterations: (int) 10, inputs: [batch001, batch002]}";
//!
//! let mut iterations = 0;
//! let mut inputs = Vec::new();
//! extract(
//!     source,
//!     Extract::object(
//!         ObjectShape::new()
//!             .field("iterations", Extract::int(|n| {
//!                 iterations = n;
//!                 Ok(())
//!             }))
//!             .field("inputs", Extract::array(
//!                 ArrayShape::new().element(Extract::string(|s| {
//!                     inputs.push(s);
//!                     Ok(())
//!                 })),
//!             )),
//!     ),
//! )
//! .unwrap();
//!
//! assert_eq!(iterations, 10);
//! assert_eq!(inputs, vec!["batch001", "batch002"]);
//! ```
//!
//! The root extract applies to each top-level document value in turn.
//! Keys and positions with nothing registered are skipped. Callbacks run
//! synchronously inside `feed`; an error returned from one aborts the
//! parse immediately.

use crate::read::{EventSink, Reader};
use crate::{coerce, Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io;

/// A coerced value tree produced by struct mode ([`Extract::tree`]).
///
/// Unlike [`crate::Value`], leaves here carry converted data: a value
/// annotated `(int)` arrives as [`StructValue::Int`] rather than primitive
/// text.
#[derive(Debug, Clone, PartialEq)]
pub enum StructValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Sequence(Vec<StructValue>),
    Mapping(IndexMap<String, StructValue>),
    /// Unrecognized annotation, value left unconverted
    Typed(String, Box<StructValue>),
}

impl StructValue {
    /// If this is an integer, returns it.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StructValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// If this is a string, returns it.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StructValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If this is a mapping, returns it.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&IndexMap<String, StructValue>> {
        match self {
            StructValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// If this is a sequence, returns it.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<StructValue>> {
        match self {
            StructValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Per-key handlers for an object.
#[derive(Default)]
pub struct ObjectShape<'h> {
    fields: IndexMap<String, Extract<'h>>,
}

impl<'h> ObjectShape<'h> {
    pub fn new() -> Self {
        ObjectShape {
            fields: IndexMap::new(),
        }
    }

    /// Registers a handler for one key.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, extract: Extract<'h>) -> Self {
        self.fields.insert(key.into(), extract);
        self
    }
}

/// Per-position handlers for an array.
#[derive(Default)]
pub struct ArrayShape<'h> {
    each: Option<Box<Extract<'h>>>,
    at: HashMap<usize, Extract<'h>>,
}

impl<'h> ArrayShape<'h> {
    pub fn new() -> Self {
        ArrayShape {
            each: None,
            at: HashMap::new(),
        }
    }

    /// Registers a handler applied to every element.
    #[must_use]
    pub fn element(mut self, extract: Extract<'h>) -> Self {
        self.each = Some(Box::new(extract));
        self
    }

    /// Registers a handler for one position, overriding
    /// [`ArrayShape::element`] there.
    #[must_use]
    pub fn nth(mut self, index: usize, extract: Extract<'h>) -> Self {
        self.at.insert(index, extract);
        self
    }
}

enum Kind<'h> {
    Scalar {
        expected: &'static str,
        apply: Box<dyn FnMut(&str) -> Result<()> + 'h>,
    },
    Passthrough(Box<dyn FnMut(Option<&str>, &str) -> Result<()> + 'h>),
    Tree(Box<dyn FnMut(StructValue) -> Result<()> + 'h>),
    Object(ObjectShape<'h>),
    Array(ArrayShape<'h>),
}

/// Describes what to do with one value slot.
///
/// Built from the constructors below and composed through [`ObjectShape`]
/// and [`ArrayShape`]; consumed by [`extract`] / [`extract_from`].
pub struct Extract<'h> {
    kind: Kind<'h>,
}

impl<'h> Extract<'h> {
    /// Integer accessor: base-10 conversion, then the callback.
    pub fn int(mut callback: impl FnMut(i64) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Scalar {
                expected: "integer",
                apply: Box::new(move |text| callback(coerce::int_from_text(text)?)),
            },
        }
    }

    /// Float accessor.
    pub fn float(mut callback: impl FnMut(f64) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Scalar {
                expected: "float",
                apply: Box::new(move |text| callback(coerce::float_from_text(text)?)),
            },
        }
    }

    /// Boolean accessor: `true`/`yes`/`1` and `false`/`no`/`0`,
    /// case-insensitive.
    pub fn bool(mut callback: impl FnMut(bool) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Scalar {
                expected: "boolean",
                apply: Box::new(move |text| callback(coerce::bool_from_text(text)?)),
            },
        }
    }

    /// String accessor: the primitive text, unconverted.
    pub fn string(mut callback: impl FnMut(String) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Scalar {
                expected: "string",
                apply: Box::new(move |text| callback(text.to_string())),
            },
        }
    }

    /// Binary accessor decoding base64 text.
    pub fn base64(mut callback: impl FnMut(Vec<u8>) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Scalar {
                expected: "base64",
                apply: Box::new(move |text| callback(coerce::base64_decode(text)?)),
            },
        }
    }

    /// Binary accessor decoding ascii16 text.
    pub fn ascii16(mut callback: impl FnMut(Vec<u8>) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Scalar {
                expected: "ascii16",
                apply: Box::new(move |text| callback(coerce::ascii16_decode(text)?)),
            },
        }
    }

    /// Generic accessor with a pluggable conversion function.
    ///
    /// ```rust
    /// use luxem::{extract, Extract};
    ///
    /// let mut parsed = None;
    /// extract(
    ///     b"0x1f",
    ///     Extract::element(
    ///         |text| {
    ///             i64::from_str_radix(text.trim_start_matches("0x"), 16)
    ///                 .map_err(|_| luxem::Error::coercion("hex integer", text))
    ///         },
    ///         |n| {
    ///             parsed = Some(n);
    ///             Ok(())
    ///         },
    ///     ),
    /// )
    /// .unwrap();
    /// assert_eq!(parsed, Some(31));
    /// ```
    pub fn element<T>(
        mut convert: impl FnMut(&str) -> Result<T> + 'h,
        mut callback: impl FnMut(T) -> Result<()> + 'h,
    ) -> Self {
        Extract {
            kind: Kind::Scalar {
                expected: "value",
                apply: Box::new(move |text| callback(convert(text)?)),
            },
        }
    }

    /// Raw access: the callback receives the annotation (if any) and the
    /// unconverted primitive text.
    pub fn passthrough(callback: impl FnMut(Option<&str>, &str) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Passthrough(Box::new(callback)),
        }
    }

    /// Struct mode: auto-builds a [`StructValue`] for this slot, applying
    /// built-in conversions for recognized annotations.
    pub fn tree(callback: impl FnMut(StructValue) -> Result<()> + 'h) -> Self {
        Extract {
            kind: Kind::Tree(Box::new(callback)),
        }
    }

    /// Descends into an object with per-key handlers.
    pub fn object(shape: ObjectShape<'h>) -> Self {
        Extract {
            kind: Kind::Object(shape),
        }
    }

    /// Descends into an array with per-element handlers.
    pub fn array(shape: ArrayShape<'h>) -> Self {
        Extract {
            kind: Kind::Array(shape),
        }
    }
}

/// Struct-mode conversion for a leaf.
fn coerce_leaf(annotation: Option<&str>, text: &str) -> Result<StructValue> {
    match annotation {
        None | Some("string") => Ok(StructValue::String(text.to_string())),
        Some("int") => Ok(StructValue::Int(coerce::int_from_text(text)?)),
        Some("float") => Ok(StructValue::Float(coerce::float_from_text(text)?)),
        Some("bool") => Ok(StructValue::Bool(coerce::bool_from_text(text)?)),
        Some("ascii16") => Ok(StructValue::Bytes(coerce::ascii16_decode(text)?)),
        Some("base64") => Ok(StructValue::Bytes(coerce::base64_decode(text)?)),
        Some(other) => Ok(StructValue::Typed(
            other.to_string(),
            Box::new(StructValue::String(text.to_string())),
        )),
    }
}

/// What a built-in annotation expects, or `None` for unrecognized names.
fn scalar_expectation(name: &str) -> Option<&'static str> {
    match name {
        "int" => Some("integer"),
        "float" => Some("float"),
        "bool" => Some("boolean"),
        "string" => Some("string"),
        "ascii16" => Some("ascii16"),
        "base64" => Some("base64"),
        _ => None,
    }
}

/// Frame for struct-mode subtree building.
enum SFrame {
    Mapping {
        map: IndexMap<String, StructValue>,
        key: Option<String>,
        label: Option<String>,
    },
    Sequence {
        items: Vec<StructValue>,
        label: Option<String>,
    },
}

/// Builds one `StructValue` subtree from events; same cursor machinery as
/// the generic tree builder, with coercion at the leaves.
#[derive(Default)]
struct StructBuilder {
    frames: Vec<SFrame>,
    pending_type: Option<String>,
    done: Option<StructValue>,
}

impl StructBuilder {
    fn attach(&mut self, value: StructValue) -> Result<()> {
        match self.frames.last_mut() {
            None => {
                self.done = Some(value);
                Ok(())
            }
            Some(SFrame::Sequence { items, .. }) => {
                items.push(value);
                Ok(())
            }
            Some(SFrame::Mapping { map, key, .. }) => match key.take() {
                Some(key) => {
                    map.insert(key, value);
                    Ok(())
                }
                None => Err(Error::structure("value without a key inside an object")),
            },
        }
    }

    fn wrap(label: Option<String>, value: StructValue) -> Result<StructValue> {
        match label {
            None => Ok(value),
            Some(name) => match scalar_expectation(&name) {
                Some(expected) => {
                    let found = match value {
                        StructValue::Mapping(_) => "object",
                        _ => "array",
                    };
                    Err(Error::coercion(expected, found))
                }
                None => Ok(StructValue::Typed(name, Box::new(value))),
            },
        }
    }

    fn object_begin(&mut self) -> Result<()> {
        let label = self.pending_type.take();
        self.frames.push(SFrame::Mapping {
            map: IndexMap::new(),
            key: None,
            label,
        });
        Ok(())
    }

    fn object_end(&mut self) -> Result<()> {
        match self.frames.pop() {
            Some(SFrame::Mapping { key: Some(_), .. }) => {
                Err(Error::structure("key without a value at object end"))
            }
            Some(SFrame::Mapping { map, label, .. }) => {
                let value = Self::wrap(label, StructValue::Mapping(map))?;
                self.attach(value)
            }
            _ => Err(Error::structure("object end with no open object")),
        }
    }

    fn array_begin(&mut self) -> Result<()> {
        let label = self.pending_type.take();
        self.frames.push(SFrame::Sequence {
            items: Vec::new(),
            label,
        });
        Ok(())
    }

    fn array_end(&mut self) -> Result<()> {
        match self.frames.pop() {
            Some(SFrame::Sequence { items, label }) => {
                let value = Self::wrap(label, StructValue::Sequence(items))?;
                self.attach(value)
            }
            _ => Err(Error::structure("array end with no open array")),
        }
    }

    fn key(&mut self, text: &str) -> Result<()> {
        match self.frames.last_mut() {
            Some(SFrame::Mapping { key: key @ None, .. }) => {
                *key = Some(text.to_string());
                Ok(())
            }
            Some(SFrame::Mapping { .. }) => Err(Error::structure("key while a key is pending")),
            _ => Err(Error::structure("key event outside an object")),
        }
    }

    fn primitive(&mut self, text: &str) -> Result<()> {
        let annotation = self.pending_type.take();
        let value = coerce_leaf(annotation.as_deref(), text)?;
        self.attach(value)
    }
}

/// Cursor step selecting a child slot within a shape.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Key(String),
    Index(usize),
}

enum Cursor {
    Seq(usize),
    Map(Option<String>),
}

struct Frame {
    /// Step that selected this container in the parent shape; `None` only
    /// for the document frame
    entry: Option<Step>,
    cursor: Cursor,
}

/// Subtree capture in progress for a struct-mode container.
struct Capture {
    step: Step,
    depth: usize,
    builder: StructBuilder,
}

fn descend<'a, 'h>(extract: &'a mut Extract<'h>, step: &Step) -> Option<&'a mut Extract<'h>> {
    match (&mut extract.kind, step) {
        (Kind::Object(shape), Step::Key(key)) => shape.fields.get_mut(key.as_str()),
        (Kind::Array(shape), Step::Index(index)) => {
            if shape.at.contains_key(index) {
                shape.at.get_mut(index)
            } else {
                shape.each.as_deref_mut()
            }
        }
        _ => None,
    }
}

fn resolve<'a, 'h>(
    root: &'a mut Extract<'h>,
    frames: &[Frame],
    step: &Step,
) -> Option<&'a mut Extract<'h>> {
    let mut extract = root;
    for frame in frames.iter().skip(1) {
        extract = descend(extract, frame.entry.as_ref()?)?;
    }
    descend(extract, step)
}

/// Slot classification with all borrows released.
enum Slot {
    Unregistered,
    Object,
    Array,
    Scalar(&'static str),
    Passthrough,
    Tree,
}

/// Event consumer dispatching into the registered shapes.
struct Driver<'h> {
    /// User root wrapped in an every-element array shape; the document top
    /// level is an implicit sequence
    root: Extract<'h>,
    frames: Vec<Frame>,
    capture: Option<Capture>,
    pending_type: Option<String>,
}

impl<'h> Driver<'h> {
    fn new(root: Extract<'h>) -> Self {
        Driver {
            root: Extract::array(ArrayShape::new().element(root)),
            frames: vec![Frame {
                entry: None,
                cursor: Cursor::Seq(0),
            }],
            capture: None,
            pending_type: None,
        }
    }

    fn take_step(&mut self) -> Result<Step> {
        match self.frames.last_mut() {
            Some(Frame {
                cursor: Cursor::Seq(index),
                ..
            }) => {
                let step = Step::Index(*index);
                *index += 1;
                Ok(step)
            }
            Some(Frame {
                cursor: Cursor::Map(key),
                ..
            }) => match key.take() {
                Some(key) => Ok(Step::Key(key)),
                None => Err(Error::structure("value without a key inside an object")),
            },
            None => Err(Error::structure("no open document")),
        }
    }

    fn classify(&mut self, step: &Step) -> Slot {
        match resolve(&mut self.root, &self.frames, step) {
            None => Slot::Unregistered,
            Some(extract) => match &extract.kind {
                Kind::Object(_) => Slot::Object,
                Kind::Array(_) => Slot::Array,
                Kind::Scalar { expected, .. } => Slot::Scalar(*expected),
                Kind::Passthrough(_) => Slot::Passthrough,
                Kind::Tree(_) => Slot::Tree,
            },
        }
    }

    fn begin_container(&mut self, is_object: bool) -> Result<()> {
        let annotation = self.pending_type.take();
        let step = self.take_step()?;
        let found = if is_object { "object" } else { "array" };
        match self.classify(&step) {
            Slot::Object if !is_object => Err(Error::coercion("object", found)),
            Slot::Array if is_object => Err(Error::coercion("array", found)),
            Slot::Object | Slot::Array | Slot::Unregistered => {
                let cursor = if is_object {
                    Cursor::Map(None)
                } else {
                    Cursor::Seq(0)
                };
                self.frames.push(Frame {
                    entry: Some(step),
                    cursor,
                });
                Ok(())
            }
            Slot::Scalar(expected) => Err(Error::coercion(expected, found)),
            Slot::Passthrough => Err(Error::coercion("primitive", found)),
            Slot::Tree => {
                let mut builder = StructBuilder {
                    pending_type: annotation,
                    ..Default::default()
                };
                if is_object {
                    builder.object_begin()?;
                } else {
                    builder.array_begin()?;
                }
                self.capture = Some(Capture {
                    step,
                    depth: 1,
                    builder,
                });
                Ok(())
            }
        }
    }

    fn end_container(&mut self, is_object: bool) -> Result<()> {
        if self.capture.is_some() {
            return self.end_capture(is_object);
        }

        if self.pending_type.is_some() {
            return Err(Error::structure("type annotation without a value"));
        }
        if self.frames.len() <= 1 {
            return Err(Error::structure("close with no open container"));
        }
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return Err(Error::structure("close with no open container")),
        };
        match frame.cursor {
            Cursor::Map(Some(_)) => Err(Error::structure("key without a value at object end")),
            Cursor::Map(None) if !is_object => {
                Err(Error::structure("array end while an object is open"))
            }
            Cursor::Seq(_) if is_object => {
                Err(Error::structure("object end while an array is open"))
            }
            _ => Ok(()),
        }
    }

    fn end_capture(&mut self, is_object: bool) -> Result<()> {
        let finished = {
            let capture = match self.capture.as_mut() {
                Some(capture) => capture,
                None => return Err(Error::structure("no capture in progress")),
            };
            if is_object {
                capture.builder.object_end()?;
            } else {
                capture.builder.array_end()?;
            }
            capture.depth -= 1;
            capture.depth == 0
        };
        if finished {
            let capture = match self.capture.take() {
                Some(capture) => capture,
                None => return Err(Error::structure("no capture in progress")),
            };
            let value = capture
                .builder
                .done
                .ok_or_else(|| Error::structure("capture finished without a value"))?;
            match resolve(&mut self.root, &self.frames, &capture.step) {
                Some(Extract {
                    kind: Kind::Tree(callback),
                }) => callback(value)?,
                _ => return Err(Error::structure("extraction slot is gone")),
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.capture.is_some() || self.frames.len() > 1 {
            return Err(Error::structure("unclosed container at end of input"));
        }
        if self.pending_type.is_some() {
            return Err(Error::structure("type annotation without a value"));
        }
        Ok(())
    }
}

impl<'h> EventSink for Driver<'h> {
    fn object_begin(&mut self) -> Result<()> {
        if let Some(capture) = &mut self.capture {
            capture.depth += 1;
            return capture.builder.object_begin();
        }
        self.begin_container(true)
    }

    fn object_end(&mut self) -> Result<()> {
        self.end_container(true)
    }

    fn array_begin(&mut self) -> Result<()> {
        if let Some(capture) = &mut self.capture {
            capture.depth += 1;
            return capture.builder.array_begin();
        }
        self.begin_container(false)
    }

    fn array_end(&mut self) -> Result<()> {
        self.end_container(false)
    }

    fn key(&mut self, text: &str) -> Result<()> {
        if let Some(capture) = &mut self.capture {
            return capture.builder.key(text);
        }
        match self.frames.last_mut() {
            Some(Frame {
                cursor: Cursor::Map(key),
                ..
            }) => {
                if key.is_some() {
                    Err(Error::structure("key while a key is pending"))
                } else {
                    *key = Some(text.to_string());
                    Ok(())
                }
            }
            _ => Err(Error::structure("key event outside an object")),
        }
    }

    fn type_name(&mut self, text: &str) -> Result<()> {
        if let Some(capture) = &mut self.capture {
            capture.builder.pending_type = Some(text.to_string());
            return Ok(());
        }
        self.pending_type = Some(text.to_string());
        Ok(())
    }

    fn primitive(&mut self, text: &str) -> Result<()> {
        if let Some(capture) = &mut self.capture {
            return capture.builder.primitive(text);
        }
        let annotation = self.pending_type.take();
        let step = self.take_step()?;
        match resolve(&mut self.root, &self.frames, &step).map(|extract| &mut extract.kind) {
            None => Ok(()),
            Some(Kind::Scalar { apply, .. }) => apply(text),
            Some(Kind::Passthrough(callback)) => callback(annotation.as_deref(), text),
            Some(Kind::Tree(callback)) => callback(coerce_leaf(annotation.as_deref(), text)?),
            Some(Kind::Object(_)) => Err(Error::coercion("object", text)),
            Some(Kind::Array(_)) => Err(Error::coercion("array", text)),
        }
    }
}

/// Runs the extraction described by `root` over an in-memory buffer.
///
/// The root extract applies to each top-level document value.
///
/// # Errors
///
/// Syntax, structure, and coercion errors, plus anything returned by the
/// registered callbacks, propagate directly.
pub fn extract(data: &[u8], root: Extract<'_>) -> Result<()> {
    let mut reader = Reader::new(Driver::new(root));
    reader.feed(data, true)?;
    reader.into_sink().finish()
}

/// Runs the extraction described by `root` over a byte stream, feeding it
/// in bounded-size chunks.
pub fn extract_from<R: io::Read>(source: R, root: Extract<'_>) -> Result<()> {
    let mut reader = Reader::new(Driver::new(root));
    reader.feed_all(source)?;
    reader.into_sink().finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_at_root() {
        let mut got = None;
        extract(
            b"(int) 7",
            Extract::int(|n| {
                got = Some(n);
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(got, Some(7));
    }

    #[test]
    fn test_coercion_without_annotation() {
        let mut got = None;
        extract(
            b"7",
            Extract::int(|n| {
                got = Some(n);
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(got, Some(7));
    }

    #[test]
    fn test_mismatched_annotation_still_coerces() {
        let mut got = None;
        extract(
            b"(float) 7",
            Extract::int(|n| {
                got = Some(n);
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(got, Some(7));
    }

    #[test]
    fn test_coercion_failure() {
        let err = extract(b"seven", Extract::int(|_| Ok(()))).unwrap_err();
        assert!(matches!(err, Error::Coercion { .. }));
    }

    #[test]
    fn test_root_applies_per_element() {
        let mut total = 0;
        extract(
            b"1, 2, 3",
            Extract::int(|n| {
                total += n;
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_bool_words() {
        let mut seen = Vec::new();
        extract(
            b"true, YES, 0, no",
            Extract::bool(|b| {
                seen.push(b);
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(seen, vec![true, true, false, false]);
    }

    #[test]
    fn test_binary_accessors() {
        let mut out = Vec::new();
        extract(
            b"epba",
            Extract::ascii16(|bytes| {
                out = bytes;
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(out, vec![0x4f, 0x10]);

        let mut out = Vec::new();
        extract(
            b"aGV5,",
            Extract::base64(|bytes| {
                out = bytes;
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(out, b"hey");
    }

    #[test]
    fn test_object_fields() {
        let mut name = String::new();
        let mut count = 0;
        extract(
            b"{name: Alice, count: 3, ignored: x}",
            Extract::object(
                ObjectShape::new()
                    .field("name", Extract::string(|s| {
                        name = s;
                        Ok(())
                    }))
                    .field("count", Extract::int(|n| {
                        count = n;
                        Ok(())
                    })),
            ),
        )
        .unwrap();
        assert_eq!(name, "Alice");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_array_positions() {
        let mut first = None;
        let mut rest = Vec::new();
        extract(
            b"[10, 20, 30]",
            Extract::array(
                ArrayShape::new()
                    .nth(0, Extract::int(|n| {
                        first = Some(n);
                        Ok(())
                    }))
                    .element(Extract::int(|n| {
                        rest.push(n);
                        Ok(())
                    })),
            ),
        )
        .unwrap();
        assert_eq!(first, Some(10));
        assert_eq!(rest, vec![20, 30]);
    }

    #[test]
    fn test_nested_shapes() {
        let mut leaves = Vec::new();
        extract(
            b"{rows: [[1, 2], [3]]}",
            Extract::object(ObjectShape::new().field(
                "rows",
                Extract::array(ArrayShape::new().element(Extract::array(
                    ArrayShape::new().element(Extract::int(|n| {
                        leaves.push(n);
                        Ok(())
                    })),
                ))),
            )),
        )
        .unwrap();
        assert_eq!(leaves, vec![1, 2, 3]);
    }

    #[test]
    fn test_unregistered_subtree_skipped() {
        let mut hits = 0;
        extract(
            b"{skip: {deep: [a, b]}, take: 1}",
            Extract::object(ObjectShape::new().field("take", Extract::int(|_| {
                hits += 1;
                Ok(())
            }))),
        )
        .unwrap();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_passthrough() {
        let mut seen = Vec::new();
        extract(
            b"(int) 7, raw",
            Extract::passthrough(|annotation, text| {
                seen.push((annotation.map(str::to_string), text.to_string()));
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(
            seen,
            vec![
                (Some("int".to_string()), "7".to_string()),
                (None, "raw".to_string()),
            ]
        );
    }

    #[test]
    fn test_tree_mode_coerces_known_annotations() {
        let mut got = None;
        extract(
            b"{n: (int) 7, f: (float) 1.5, ok: (bool) yes, b: (ascii16) pp, other: (custom) x, plain: word}",
            Extract::tree(|value| {
                got = Some(value);
                Ok(())
            }),
        )
        .unwrap();

        let map = match got.unwrap() {
            StructValue::Mapping(map) => map,
            other => panic!("expected mapping, got {:?}", other),
        };
        assert_eq!(map["n"], StructValue::Int(7));
        assert_eq!(map["f"], StructValue::Float(1.5));
        assert_eq!(map["ok"], StructValue::Bool(true));
        assert_eq!(map["b"], StructValue::Bytes(vec![0xff]));
        assert_eq!(
            map["other"],
            StructValue::Typed(
                "custom".to_string(),
                Box::new(StructValue::String("x".to_string()))
            )
        );
        assert_eq!(map["plain"], StructValue::String("word".to_string()));
    }

    #[test]
    fn test_tree_mode_typed_container() {
        let mut got = None;
        extract(
            b"(config) {path: /usr/bin}",
            Extract::tree(|value| {
                got = Some(value);
                Ok(())
            }),
        )
        .unwrap();

        match got.unwrap() {
            StructValue::Typed(name, value) => {
                assert_eq!(name, "config");
                assert!(matches!(*value, StructValue::Mapping(_)));
            }
            other => panic!("expected typed wrapper, got {:?}", other),
        }
    }

    #[test]
    fn test_tree_mode_scalar_at_root() {
        let mut got = None;
        extract(
            b"(int) 9",
            Extract::tree(|value| {
                got = Some(value);
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(got, Some(StructValue::Int(9)));
    }

    #[test]
    fn test_tree_mode_bad_coercion() {
        let err = extract(b"(int) pear", Extract::tree(|_| Ok(()))).unwrap_err();
        assert!(matches!(err, Error::Coercion { .. }));
    }

    #[test]
    fn test_container_for_scalar_accessor() {
        let err = extract(b"[1]", Extract::int(|_| Ok(()))).unwrap_err();
        assert!(matches!(err, Error::Coercion { .. }));
    }

    #[test]
    fn test_scalar_for_object_shape() {
        let err = extract(b"7", Extract::object(ObjectShape::new())).unwrap_err();
        assert!(matches!(err, Error::Coercion { .. }));
    }

    #[test]
    fn test_callback_error_propagates() {
        let err = extract(
            b"1, 2",
            Extract::int(|_| Err(Error::custom("stop right there"))),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "stop right there");
    }

    #[test]
    fn test_extract_from_stream() {
        let mut words = Vec::new();
        extract_from(
            &b"[alpha, beta]"[..],
            Extract::array(ArrayShape::new().element(Extract::string(|s| {
                words.push(s);
                Ok(())
            }))),
        )
        .unwrap();
        assert_eq!(words, vec!["alpha", "beta"]);
    }
}
