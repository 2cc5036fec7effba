//! Tree building layered over the streaming tokenizer.
//!
//! [`TreeBuilder`] consumes tokenizer events and materializes the generic
//! [`Value`] tree. The document's top level is an implicit sequence, so a
//! finished build yields `Vec<Value>`.
//!
//! Most users go through [`crate::from_slice`] / [`crate::from_reader`];
//! the builder is public for callers that produce their own event streams.
//!
//! ```rust
//! use luxem::{Reader, TreeBuilder, Value};
//!
//! let mut reader = Reader::new(TreeBuilder::new());
//! reader.feed(b"{key: 7}", true).unwrap();
//! let doc = reader.into_sink().finish().unwrap();
//!
//! assert_eq!(doc.len(), 1);
//! assert_eq!(
//!     doc[0].as_mapping().unwrap().get("key"),
//!     Some(&Value::from("7")),
//! );
//! ```

use crate::read::EventSink;
use crate::{Error, ObjectMap, Result, Typed, Value};

/// An in-progress container plus its cursor state.
enum Frame {
    Mapping {
        map: ObjectMap,
        /// Key awaiting its value
        key: Option<String>,
        /// The container's own type annotation
        label: Option<String>,
    },
    Sequence {
        items: Vec<Value>,
        label: Option<String>,
    },
}

/// Builds a document tree from tokenizer events.
///
/// Maintains an explicit stack of open frames; a frame is created on an
/// open-bracket event and attached to its parent (or the document root) on
/// the matching close. A pending type annotation applies to the next
/// completed value, or to a new frame itself when a container follows it.
#[derive(Default)]
pub struct TreeBuilder {
    root: Vec<Value>,
    frames: Vec<Frame>,
    pending_type: Option<String>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes the build, returning the document's top-level values.
    ///
    /// # Errors
    ///
    /// Returns a structure error if containers are still open or a type
    /// annotation never received its value.
    pub fn finish(self) -> Result<Vec<Value>> {
        if !self.frames.is_empty() {
            return Err(Error::structure("unclosed container at end of input"));
        }
        if self.pending_type.is_some() {
            return Err(Error::structure("type annotation without a value"));
        }
        Ok(self.root)
    }

    /// Attaches a completed value at the current cursor, wrapping it if a
    /// type annotation is pending, and advances the cursor.
    fn attach(&mut self, value: Value) -> Result<()> {
        let value = match self.pending_type.take() {
            Some(name) => Value::Typed(Typed {
                name,
                value: Box::new(value),
            }),
            None => value,
        };
        match self.frames.last_mut() {
            None => self.root.push(value),
            Some(Frame::Sequence { items, .. }) => items.push(value),
            Some(Frame::Mapping { map, key, .. }) => match key.take() {
                Some(key) => {
                    map.insert(key, value);
                }
                None => return Err(Error::structure("value without a key inside an object")),
            },
        }
        Ok(())
    }
}

impl EventSink for TreeBuilder {
    fn object_begin(&mut self) -> Result<()> {
        let label = self.pending_type.take();
        self.frames.push(Frame::Mapping {
            map: ObjectMap::new(),
            key: None,
            label,
        });
        Ok(())
    }

    fn object_end(&mut self) -> Result<()> {
        if self.pending_type.is_some() {
            return Err(Error::structure("type annotation without a value"));
        }
        match self.frames.pop() {
            Some(Frame::Mapping { key: Some(_), .. }) => {
                Err(Error::structure("key without a value at object end"))
            }
            Some(Frame::Mapping { map, label, .. }) => {
                self.pending_type = label;
                self.attach(Value::Mapping(map))
            }
            Some(frame @ Frame::Sequence { .. }) => {
                self.frames.push(frame);
                Err(Error::structure("object end while an array is open"))
            }
            None => Err(Error::structure("object end with no open object")),
        }
    }

    fn array_begin(&mut self) -> Result<()> {
        let label = self.pending_type.take();
        self.frames.push(Frame::Sequence {
            items: Vec::new(),
            label,
        });
        Ok(())
    }

    fn array_end(&mut self) -> Result<()> {
        if self.pending_type.is_some() {
            return Err(Error::structure("type annotation without a value"));
        }
        match self.frames.pop() {
            Some(Frame::Sequence { items, label }) => {
                self.pending_type = label;
                self.attach(Value::Sequence(items))
            }
            Some(frame @ Frame::Mapping { .. }) => {
                self.frames.push(frame);
                Err(Error::structure("array end while an object is open"))
            }
            None => Err(Error::structure("array end with no open array")),
        }
    }

    fn key(&mut self, text: &str) -> Result<()> {
        match self.frames.last_mut() {
            Some(Frame::Mapping { key: key @ None, .. }) => {
                *key = Some(text.to_string());
                Ok(())
            }
            Some(Frame::Mapping { .. }) => Err(Error::structure("key while a key is pending")),
            _ => Err(Error::structure("key event outside an object")),
        }
    }

    fn type_name(&mut self, text: &str) -> Result<()> {
        self.pending_type = Some(text.to_string());
        Ok(())
    }

    fn primitive(&mut self, text: &str) -> Result<()> {
        self.attach(Value::Primitive(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_slice;

    #[test]
    fn test_empty() {
        assert_eq!(from_slice(b"").unwrap(), vec![]);
    }

    #[test]
    fn test_primitive() {
        assert_eq!(from_slice(b"a").unwrap(), vec![Value::from("a")]);
    }

    #[test]
    fn test_primitive_trailing_comma() {
        assert_eq!(from_slice(b"a,").unwrap(), vec![Value::from("a")]);
    }

    #[test]
    fn test_root_sequence() {
        assert_eq!(
            from_slice(b"a, a").unwrap(),
            vec![Value::from("a"), Value::from("a")]
        );
    }

    #[test]
    fn test_typed() {
        assert_eq!(
            from_slice(b"(b)a").unwrap(),
            vec![Value::Typed(Typed::new("b", Value::from("a")))]
        );
    }

    #[test]
    fn test_array() {
        assert_eq!(from_slice(b"[]").unwrap(), vec![Value::Sequence(vec![])]);
        assert_eq!(from_slice(b"[],").unwrap(), vec![Value::Sequence(vec![])]);
    }

    #[test]
    fn test_typed_array() {
        assert_eq!(
            from_slice(b"(b)[]").unwrap(),
            vec![Value::Typed(Typed::new("b", Value::Sequence(vec![])))]
        );
    }

    #[test]
    fn test_array_element() {
        assert_eq!(
            from_slice(b"[a]").unwrap(),
            vec![Value::Sequence(vec![Value::from("a")])]
        );
    }

    #[test]
    fn test_object() {
        assert_eq!(from_slice(b"{}").unwrap(), vec![Value::Mapping(ObjectMap::new())]);
        assert_eq!(from_slice(b"{},").unwrap(), vec![Value::Mapping(ObjectMap::new())]);
    }

    #[test]
    fn test_typed_object() {
        assert_eq!(
            from_slice(b"(b){}").unwrap(),
            vec![Value::Typed(Typed::new("b", Value::Mapping(ObjectMap::new())))]
        );
    }

    #[test]
    fn test_object_element() {
        let doc = from_slice(b"{k: a}").unwrap();
        assert_eq!(
            doc[0].as_mapping().unwrap().get("k"),
            Some(&Value::from("a"))
        );
    }

    #[test]
    fn test_duplicate_key_replaces() {
        let doc = from_slice(b"{k: a, k: b}").unwrap();
        let map = doc[0].as_mapping().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&Value::from("b")));
    }

    #[test]
    fn test_key_outside_object() {
        assert!(matches!(
            from_slice(b"k: a"),
            Err(Error::Structure(_))
        ));
        assert!(matches!(
            from_slice(b"[k: a]"),
            Err(Error::Structure(_))
        ));
    }

    #[test]
    fn test_value_without_key() {
        assert!(matches!(from_slice(b"{7}"), Err(Error::Structure(_))));
    }

    #[test]
    fn test_key_without_value() {
        assert!(matches!(from_slice(b"{k:}"), Err(Error::Structure(_))));
    }

    #[test]
    fn test_unclosed_container() {
        assert!(matches!(from_slice(b"[a, b"), Err(Error::Structure(_))));
        assert!(matches!(from_slice(b"{k: v"), Err(Error::Structure(_))));
    }

    #[test]
    fn test_nested() {
        let doc = from_slice(b"[[a], {k: [b]}]").unwrap();
        let outer = doc[0].as_sequence().unwrap();
        assert_eq!(outer[0], Value::Sequence(vec![Value::from("a")]));
        let map = outer[1].as_mapping().unwrap();
        assert_eq!(
            map.get("k"),
            Some(&Value::Sequence(vec![Value::from("b")]))
        );
    }
}
