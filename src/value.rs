//! Generic value tree for luxem documents.
//!
//! This module provides the [`Value`] enum which represents any luxem value,
//! and the [`Typed`] wrapper pairing a type annotation with the value it
//! annotates. It's the output of whole-document loading and the input of
//! tree-driven writing.
//!
//! ## Core Types
//!
//! - [`Value`]: a closed variant type over exactly the four luxem cases —
//!   primitive, sequence, mapping, typed wrapper
//! - [`Typed`]: a `(type-name, value)` pair; the inner value is never itself
//!   typed
//!
//! Primitives are opaque text: the format never infers numeric or boolean
//! type on its own. Converting `"7"` into `7` is the extraction layer's job
//! (see [`crate::dsl`]).
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use luxem::{luxem, Typed, Value};
//!
//! // From primitives (numbers and bools become their primitive text)
//! let word = Value::from("hello");
//! let number = Value::from(42);
//!
//! // Typed wrappers
//! let typed = Value::Typed(Typed::new("int", Value::from(7)));
//!
//! // Using the luxem! macro
//! let doc = luxem!({
//!     "name": "Alice",
//!     "tags": ["rust", "codec"]
//! });
//! # let _ = (word, number, typed, doc);
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use luxem::Value;
//!
//! let value = Value::from("42");
//! assert_eq!(value.as_primitive(), Some("42"));
//! assert!(value.as_sequence().is_none());
//! ```
//!
//! ### Converting from Rust Types
//!
//! ```rust
//! use luxem::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 10, y: 20 }).unwrap();
//! assert!(value.is_mapping());
//! ```

use crate::{coerce, Error, ObjectMap, Result};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A type annotation paired with the value it annotates.
///
/// The annotation name is plain text; the inner value is a primitive,
/// sequence, or mapping, never another `Typed`.
///
/// # Examples
///
/// ```rust
/// use luxem::{Typed, Value};
///
/// let t = Typed::new("int", Value::from(7));
/// assert_eq!(t.name, "int");
/// assert_eq!(t.value.as_primitive(), Some("7"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Typed {
    pub name: String,
    pub value: Box<Value>,
}

impl Typed {
    /// Creates a typed wrapper around a value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Typed {
            name: name.into(),
            value: Box::new(value.into()),
        }
    }
}

/// A dynamically-typed representation of any luxem value.
///
/// # Examples
///
/// ```rust
/// use luxem::{ObjectMap, Value};
///
/// let word = Value::Primitive("hello".to_string());
/// let list = Value::Sequence(vec![Value::from("a"), Value::from("b")]);
/// let map = Value::Mapping(ObjectMap::new());
///
/// assert!(word.is_primitive());
/// assert!(list.is_sequence());
/// assert!(map.is_mapping());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Opaque primitive text
    Primitive(String),
    /// Ordered list of values
    Sequence(Vec<Value>),
    /// Insertion-ordered object
    Mapping(ObjectMap),
    /// Type-annotated value
    Typed(Typed),
}

impl Default for Value {
    fn default() -> Self {
        Value::Primitive(String::new())
    }
}

impl Value {
    /// Returns `true` if the value is a primitive.
    #[inline]
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Value::Primitive(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns `true` if the value carries a type annotation.
    #[inline]
    #[must_use]
    pub const fn is_typed(&self) -> bool {
        matches!(self, Value::Typed(_))
    }

    /// If the value is a primitive, returns its text. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luxem::Value;
    ///
    /// assert_eq!(Value::from("hello").as_primitive(), Some("hello"));
    /// assert_eq!(Value::Sequence(vec![]).as_primitive(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_primitive(&self) -> Option<&str> {
        match self {
            Value::Primitive(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&ObjectMap> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// If the value carries a type annotation, returns the wrapper. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_typed(&self) -> Option<&Typed> {
        match self {
            Value::Typed(t) => Some(t),
            _ => None,
        }
    }

    /// Strips a type annotation, if any, yielding the annotated value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luxem::{Typed, Value};
    ///
    /// let typed = Value::Typed(Typed::new("int", Value::from(7)));
    /// assert_eq!(typed.untyped().as_primitive(), Some("7"));
    /// assert_eq!(Value::from("7").untyped().as_primitive(), Some("7"));
    /// ```
    #[must_use]
    pub fn untyped(&self) -> &Value {
        match self {
            Value::Typed(t) => &t.value,
            other => other,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value as compact luxem text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = crate::Writer::new(Vec::new(), crate::WriteOptions::new());
        writer.write(self).map_err(|_| fmt::Error)?;
        let bytes = writer.into_inner();
        f.write_str(&String::from_utf8(bytes).map_err(|_| fmt::Error)?)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Primitive(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Primitive(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Primitive(if value { "true" } else { "false" }.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Primitive(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Primitive(value.to_string())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Primitive(value.to_string())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Primitive(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Primitive(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<ObjectMap> for Value {
    fn from(value: ObjectMap) -> Self {
        Value::Mapping(value)
    }
}

impl From<Typed> for Value {
    fn from(value: Typed) -> Self {
        Value::Typed(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Primitive(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            // Externally tagged, the same shape serde gives enums
            Value::Typed(t) => {
                let mut out = serializer.serialize_map(Some(1))?;
                out.serialize_entry(&t.name, t.value.as_ref())?;
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    /// Builds a tree from any self-describing serde source.
    ///
    /// Foreign data has no luxem type annotations, so this never produces
    /// `Value::Typed`; scalars arrive as their primitive text.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any luxem value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::Primitive(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Primitive(String::new()))
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Primitive(String::new()))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::Sequence(items))
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut map = ObjectMap::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(Value::Mapping(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Convert any `T: Serialize` into a [`Value`] tree.
///
/// Scalars become their primitive text, sequences become [`Value::Sequence`],
/// maps and structs become [`Value::Mapping`], and enum variants become
/// [`Value::Typed`] with the variant name as the annotation. Byte slices are
/// ascii16-encoded. `None` and unit become the empty primitive.
///
/// # Examples
///
/// ```rust
/// use luxem::{to_string, to_value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// enum Batch {
///     Optional(String),
/// }
///
/// let value = to_value(&Batch::Optional("batch003".to_string())).unwrap();
/// assert_eq!(to_string(&[value]).unwrap(), "(Optional) batch003,");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. a map with a
/// non-primitive key).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializer that builds a [`Value`] tree instead of text.
pub struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = TaggedSeqCollector;
    type SerializeMap = MapCollector;
    type SerializeStruct = MapCollector;
    type SerializeStructVariant = TaggedMapCollector;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Primitive(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Primitive(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Primitive(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Primitive(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Primitive(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Typed(Typed::new(
            "ascii16",
            Value::Primitive(coerce::ascii16_encode(v)),
        )))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Primitive(String::new()))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Primitive(String::new()))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Primitive(String::new()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Typed(Typed::new(variant, Value::default())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Typed(Typed::new(variant, value.serialize(self)?)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqCollector {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(TaggedSeqCollector {
            name: variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapCollector {
            map: ObjectMap::with_capacity(len.unwrap_or(0)),
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(TaggedMapCollector {
            name: variant,
            map: ObjectMap::with_capacity(len),
        })
    }
}

fn key_text(key: Value) -> Result<String> {
    match key {
        Value::Primitive(s) => Ok(s),
        other => Err(Error::custom(format!(
            "mapping keys must be primitives, found {:?}",
            other
        ))),
    }
}

pub struct SeqCollector {
    items: Vec<Value>,
}

impl serde::ser::SerializeSeq for SeqCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.items))
    }
}

impl serde::ser::SerializeTuple for SeqCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        serde::ser::SerializeSeq::end(self)
    }
}

impl serde::ser::SerializeTupleStruct for SeqCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        serde::ser::SerializeSeq::end(self)
    }
}

pub struct TaggedSeqCollector {
    name: &'static str,
    items: Vec<Value>,
}

impl serde::ser::SerializeTupleVariant for TaggedSeqCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Typed(Typed::new(
            self.name,
            Value::Sequence(self.items),
        )))
    }
}

pub struct MapCollector {
    map: ObjectMap,
    key: Option<String>,
}

impl serde::ser::SerializeMap for MapCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key_text(key.serialize(ValueSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("map value without a key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl serde::ser::SerializeStruct for MapCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

pub struct TaggedMapCollector {
    name: &'static str,
    map: ObjectMap,
}

impl serde::ser::SerializeStructVariant for TaggedMapCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Typed(Typed::new(self.name, Value::Mapping(self.map))))
    }
}
