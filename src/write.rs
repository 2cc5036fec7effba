//! luxem output.
//!
//! [`Writer`] is an imperative, stateful emitter whose calls mirror the
//! tokenizer's event set, plus a tree-driven [`Writer::write`] that
//! decomposes a [`Value`] recursively into the same calls. Every call
//! returns the writer again, so sequences chain:
//!
//! ```rust
//! use luxem::{WriteOptions, Writer};
//!
//! let mut writer = Writer::new(Vec::new(), WriteOptions::new());
//! writer
//!     .object_begin().unwrap()
//!     .key("key").unwrap()
//!     .type_name("int").unwrap()
//!     .primitive("7").unwrap()
//!     .object_end().unwrap();
//!
//! assert_eq!(writer.into_inner(), b"{key:(int) 7,},");
//! ```
//!
//! Output goes to any [`io::Write`] sink as each call is made; writing to a
//! `Vec<u8>` and retrieving it at the end produces byte-identical output.
//!
//! ## Separators
//!
//! Every emitted value and every container close is followed by a comma,
//! including the last element. The trailing comma is part of the grammar,
//! not an artifact.

use crate::{Result, Value, WriteOptions};
use std::io;

/// Characters that force a word into quoted form.
fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.chars().any(|c| {
            matches!(
                c,
                ' ' | '\t' | '\n' | '\r'
                    | '{' | '}' | '[' | ']' | '(' | ')'
                    | ':' | ',' | '*' | '"' | '\\'
            )
        })
}

/// Streaming luxem emitter.
///
/// See the [module docs](self) for the call contract, and
/// [`WriteOptions`] for pretty/compact configuration.
pub struct Writer<W: io::Write> {
    out: W,
    options: WriteOptions,
    depth: usize,
    /// The next value continues the current line (it follows a key or a
    /// type annotation)
    inline: bool,
}

impl<W: io::Write> Writer<W> {
    /// Creates a writer emitting to `out`.
    pub fn new(out: W, options: WriteOptions) -> Self {
        Writer {
            out,
            options,
            depth: 0,
            inline: false,
        }
    }

    /// Consumes the writer, returning the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Emits `{` and opens a nesting level.
    pub fn object_begin(&mut self) -> Result<&mut Self> {
        self.start_value()?;
        self.out.write_all(b"{")?;
        self.open()?;
        Ok(self)
    }

    /// Closes the current object with `},`.
    pub fn object_end(&mut self) -> Result<&mut Self> {
        self.close(b"},")?;
        Ok(self)
    }

    /// Emits `[` and opens a nesting level.
    pub fn array_begin(&mut self) -> Result<&mut Self> {
        self.start_value()?;
        self.out.write_all(b"[")?;
        self.open()?;
        Ok(self)
    }

    /// Closes the current array with `],`.
    pub fn array_end(&mut self) -> Result<&mut Self> {
        self.close(b"],")?;
        Ok(self)
    }

    /// Emits an object key; the next value shares its line.
    pub fn key(&mut self, text: &str) -> Result<&mut Self> {
        self.indent()?;
        self.write_word(text)?;
        let separator: &[u8] = if self.options.pretty { b": " } else { b":" };
        self.out.write_all(separator)?;
        self.inline = true;
        Ok(self)
    }

    /// Emits a type annotation; the annotated value follows after a single
    /// space.
    pub fn type_name(&mut self, text: &str) -> Result<&mut Self> {
        self.start_value()?;
        self.out.write_all(b"(")?;
        // A name is safe bare inside parens unless it could end the
        // annotation early or start a quoted form.
        if text.is_empty() || text.starts_with('"') || text.contains(')') || text.contains('\\') {
            self.write_quoted(text)?;
        } else {
            self.out.write_all(text.as_bytes())?;
        }
        self.out.write_all(b") ")?;
        self.inline = true;
        Ok(self)
    }

    /// Emits a primitive value, bare when possible, quoted otherwise.
    pub fn primitive(&mut self, text: &str) -> Result<&mut Self> {
        self.start_value()?;
        self.write_word(text)?;
        self.end_value()?;
        Ok(self)
    }

    /// Decomposes a value tree depth-first, pre-order: annotation before its
    /// value, key before its value, open bracket before children.
    pub fn write(&mut self, value: &Value) -> Result<&mut Self> {
        match value {
            Value::Primitive(text) => {
                self.primitive(text)?;
            }
            Value::Typed(typed) => {
                self.type_name(&typed.name)?;
                self.write(&typed.value)?;
            }
            Value::Sequence(items) => {
                self.array_begin()?;
                for item in items {
                    self.write(item)?;
                }
                self.array_end()?;
            }
            Value::Mapping(map) => {
                self.object_begin()?;
                for (key, item) in map.iter() {
                    self.key(key)?;
                    self.write(item)?;
                }
                self.object_end()?;
            }
        }
        Ok(self)
    }

    fn start_value(&mut self) -> Result<()> {
        self.indent()?;
        Ok(())
    }

    fn end_value(&mut self) -> Result<()> {
        self.out.write_all(b",")?;
        if self.options.pretty {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        if self.options.pretty {
            self.out.write_all(b"\n")?;
        }
        self.depth += 1;
        self.inline = false;
        Ok(())
    }

    fn close(&mut self, bracket: &[u8]) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.indent()?;
        self.out.write_all(bracket)?;
        if self.options.pretty {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn indent(&mut self) -> Result<()> {
        if self.inline {
            self.inline = false;
            return Ok(());
        }
        if self.options.pretty {
            let mut unit = [0u8; 4];
            let unit = self.options.indent_char.encode_utf8(&mut unit).as_bytes();
            for _ in 0..self.depth * self.options.indent_width {
                self.out.write_all(unit)?;
            }
        }
        Ok(())
    }

    fn write_word(&mut self, text: &str) -> Result<()> {
        if needs_quotes(text) {
            self.write_quoted(text)
        } else {
            self.out.write_all(text.as_bytes())?;
            Ok(())
        }
    }

    fn write_quoted(&mut self, text: &str) -> Result<()> {
        self.out.write_all(b"\"")?;
        for ch in text.chars() {
            match ch {
                '"' => self.out.write_all(b"\\\"")?,
                '\\' => self.out.write_all(b"\\\\")?,
                _ => {
                    let mut buf = [0u8; 4];
                    self.out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
                }
            }
        }
        self.out.write_all(b"\"")?;
        Ok(())
    }
}
