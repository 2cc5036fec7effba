//! Streaming luxem tokenizer.
//!
//! This is a SAX-style event model: [`Reader`] scans raw bytes and pushes
//! structural events into a registered [`EventSink`] as they complete, with
//! no tree accumulation. Structure is represented by begin/end event pairs;
//! no event carries coordinates, so nesting is reconstructed by counting.
//!
//! ## Event Sequences
//!
//! Input `{key: (int) 7}` emits:
//!
//! ```text
//! object_begin
//! key("key")
//! type_name("int")
//! primitive("7")
//! object_end
//! ```
//!
//! ## Chunked feeding
//!
//! The reader is a resumable state machine. All scan state, including any
//! partially-read token, lives inside the `Reader`, so input may arrive in
//! arbitrarily small chunks:
//!
//! ```rust
//! use luxem::{Event, Reader};
//!
//! let mut reader = Reader::new(Vec::new());
//! reader.feed(b"[a, ", false).unwrap();
//! reader.feed(b"b]", true).unwrap();
//! assert_eq!(
//!     reader.into_sink(),
//!     vec![
//!         Event::ArrayBegin,
//!         Event::Primitive("a".to_string()),
//!         Event::Primitive("b".to_string()),
//!         Event::ArrayEnd,
//!     ],
//! );
//! ```
//!
//! Feeding the same bytes in one final call or in any sequence of chunks
//! produces the identical event sequence. A non-final call defers emission
//! of a trailing token that more bytes could still extend (a bare word, or
//! a completed word not yet known to be a key or a primitive).

use crate::{Error, Result};
use std::io;

/// A single tokenizer event, owned form.
///
/// Handy for buffering or inspecting event streams; `Vec<Event>` implements
/// [`EventSink`] by appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    Key(String),
    Type(String),
    Primitive(String),
}

/// Receiver for tokenizer events.
///
/// Every method defaults to a no-op returning `Ok(())`, so sinks only
/// implement the events they care about. An error returned from any method
/// aborts the current [`Reader::feed`] call immediately and propagates
/// unmodified.
pub trait EventSink {
    fn object_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn object_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn array_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn key(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn type_name(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn primitive(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

impl EventSink for Vec<Event> {
    fn object_begin(&mut self) -> Result<()> {
        self.push(Event::ObjectBegin);
        Ok(())
    }

    fn object_end(&mut self) -> Result<()> {
        self.push(Event::ObjectEnd);
        Ok(())
    }

    fn array_begin(&mut self) -> Result<()> {
        self.push(Event::ArrayBegin);
        Ok(())
    }

    fn array_end(&mut self) -> Result<()> {
        self.push(Event::ArrayEnd);
        Ok(())
    }

    fn key(&mut self, text: &str) -> Result<()> {
        self.push(Event::Key(text.to_string()));
        Ok(())
    }

    fn type_name(&mut self, text: &str) -> Result<()> {
        self.push(Event::Type(text.to_string()));
        Ok(())
    }

    fn primitive(&mut self, text: &str) -> Result<()> {
        self.push(Event::Primitive(text.to_string()));
        Ok(())
    }
}

/// Scanner state between bytes.
///
/// Suspension only ever happens at the `feed` call boundary, so the whole
/// resumable-parse problem reduces to this enum plus the partial-token
/// buffer held by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Between tokens
    Ground,
    /// Inside `*...*`; `resume_word` returns to `AfterWord` (comment between
    /// a word and its `:`)
    Comment { escape: bool, resume_word: bool },
    /// Accumulating a bare word
    Bare { escape: bool },
    /// Accumulating a quoted word
    Quoted { escape: bool },
    /// Word complete; key vs. primitive decided by the next `:` or its absence
    AfterWord,
    /// Just after `(`
    TypeStart,
    /// Accumulating a bare type name, terminated by `)`
    TypeBare { escape: bool },
    /// Accumulating a quoted type name
    TypeQuoted { escape: bool },
    /// Quoted type name complete, expecting `)`
    TypeClose,
}

/// Streaming luxem tokenizer.
///
/// Owns its event sink and all scan state. See the [module docs](self) for
/// the event contract and chunked-feeding behavior.
pub struct Reader<S: EventSink> {
    sink: S,
    mode: Mode,
    /// Partial-token byte buffer, held across feed calls
    word: Vec<u8>,
    /// Open bracket kinds, for rejecting unmatched closes
    brackets: Vec<u8>,
    /// A type annotation has been emitted and awaits its value
    annotated: bool,
    /// Total bytes consumed by previous feed calls
    offset: u64,
    poisoned: bool,
}

impl<S: EventSink> Reader<S> {
    /// Creates a reader pushing events into `sink`.
    pub fn new(sink: S) -> Self {
        Reader {
            sink,
            mode: Mode::Ground,
            word: Vec::new(),
            brackets: Vec::new(),
            annotated: false,
            offset: 0,
            poisoned: false,
        }
    }

    /// Borrows the event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrows the event sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the reader, returning the event sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Total bytes consumed so far across all feed calls.
    pub fn consumed(&self) -> u64 {
        self.offset
    }

    /// Scans a chunk of input, emitting events to the sink.
    ///
    /// With `finish` false the reader holds any trailing token that more
    /// bytes could still extend; pass the remaining input in later calls.
    /// With `finish` true a pending bare word is flushed as a completed
    /// primitive and unterminated constructs are reported as errors.
    ///
    /// On success the whole buffer has been consumed (partial tokens are
    /// buffered internally, never re-presented by the caller) and
    /// `Ok(data.len())` is returned.
    ///
    /// # Errors
    ///
    /// Syntax errors carry the approximate byte offset in the overall
    /// stream. Errors returned by the sink propagate unmodified. After any
    /// error the reader is poisoned and later calls fail fast.
    pub fn feed(&mut self, data: &[u8], finish: bool) -> Result<usize> {
        if self.poisoned {
            return Err(Error::structure("reader is unusable after a previous error"));
        }
        match self.scan(data, finish) {
            Ok(()) => {
                self.offset += data.len() as u64;
                Ok(data.len())
            }
            Err(err) => {
                self.poisoned = true;
                Err(err)
            }
        }
    }

    /// Feeds an entire byte stream in bounded-size chunks, finishing at EOF.
    ///
    /// Returns the total number of bytes consumed.
    pub fn feed_all<R: io::Read>(&mut self, mut source: R) -> Result<u64> {
        let mut buf = [0u8; 8192];
        let mut total = 0u64;
        loop {
            let n = source.read(&mut buf)?;
            if n == 0 {
                self.feed(&[], true)?;
                return Ok(total);
            }
            total += self.feed(&buf[..n], false)? as u64;
        }
    }

    fn scan(&mut self, data: &[u8], finish: bool) -> Result<()> {
        let mut i = 0;
        while i < data.len() {
            let c = data[i];
            let pos = self.offset + i as u64;
            match self.mode {
                Mode::Ground => {
                    i += 1;
                    match c {
                        b' ' | b'\t' | b'\n' | b'\r' => {}
                        b',' => self.flush_annotation()?,
                        b'*' => {
                            self.mode = Mode::Comment {
                                escape: false,
                                resume_word: false,
                            }
                        }
                        b'"' => {
                            self.word.clear();
                            self.mode = Mode::Quoted { escape: false };
                        }
                        b'(' => {
                            self.flush_annotation()?;
                            self.word.clear();
                            self.mode = Mode::TypeStart;
                        }
                        b'{' => {
                            self.annotated = false;
                            self.brackets.push(b'{');
                            self.sink.object_begin()?;
                        }
                        b'[' => {
                            self.annotated = false;
                            self.brackets.push(b'[');
                            self.sink.array_begin()?;
                        }
                        b'}' => {
                            self.flush_annotation()?;
                            match self.brackets.pop() {
                                Some(b'{') => self.sink.object_end()?,
                                Some(_) => {
                                    return Err(Error::syntax(pos, "'}' closing an array"))
                                }
                                None => {
                                    return Err(Error::syntax(pos, "'}' with no matching '{'"))
                                }
                            }
                        }
                        b']' => {
                            self.flush_annotation()?;
                            match self.brackets.pop() {
                                Some(b'[') => self.sink.array_end()?,
                                Some(_) => {
                                    return Err(Error::syntax(pos, "']' closing an object"))
                                }
                                None => {
                                    return Err(Error::syntax(pos, "']' with no matching '['"))
                                }
                            }
                        }
                        b':' => return Err(Error::syntax(pos, "':' without a preceding key")),
                        b')' => return Err(Error::syntax(pos, "')' outside a type annotation")),
                        b'\\' => {
                            self.word.clear();
                            self.mode = Mode::Bare { escape: true };
                        }
                        _ => {
                            self.word.clear();
                            self.word.push(c);
                            self.mode = Mode::Bare { escape: false };
                        }
                    }
                }
                Mode::Bare { escape } => {
                    if escape {
                        self.word.push(c);
                        self.mode = Mode::Bare { escape: false };
                        i += 1;
                    } else {
                        match c {
                            b'\\' => {
                                self.mode = Mode::Bare { escape: true };
                                i += 1;
                            }
                            b' ' | b'\t' | b'\n' | b'\r' => {
                                self.mode = Mode::AfterWord;
                                i += 1;
                            }
                            b':' => {
                                self.emit_key(pos)?;
                                self.mode = Mode::Ground;
                                i += 1;
                            }
                            b',' | b'{' | b'}' | b'[' | b']' | b'(' | b')' | b'*' | b'"' => {
                                // terminator belongs to the next token
                                self.emit_primitive(pos)?;
                                self.mode = Mode::Ground;
                            }
                            _ => {
                                self.word.push(c);
                                i += 1;
                            }
                        }
                    }
                }
                Mode::Quoted { escape } => {
                    i += 1;
                    if escape {
                        match c {
                            b'"' => self.word.push(b'"'),
                            b'\\' => self.word.push(b'\\'),
                            other => {
                                self.word.push(b'\\');
                                self.word.push(other);
                            }
                        }
                        self.mode = Mode::Quoted { escape: false };
                    } else {
                        match c {
                            b'"' => self.mode = Mode::AfterWord,
                            b'\\' => self.mode = Mode::Quoted { escape: true },
                            _ => self.word.push(c),
                        }
                    }
                }
                Mode::AfterWord => match c {
                    b' ' | b'\t' | b'\n' | b'\r' => i += 1,
                    b':' => {
                        self.emit_key(pos)?;
                        self.mode = Mode::Ground;
                        i += 1;
                    }
                    b'*' => {
                        self.mode = Mode::Comment {
                            escape: false,
                            resume_word: true,
                        };
                        i += 1;
                    }
                    _ => {
                        self.emit_primitive(pos)?;
                        self.mode = Mode::Ground;
                    }
                },
                Mode::Comment { escape, resume_word } => {
                    i += 1;
                    if escape {
                        self.mode = Mode::Comment {
                            escape: false,
                            resume_word,
                        };
                    } else {
                        match c {
                            b'*' => {
                                self.mode = if resume_word {
                                    Mode::AfterWord
                                } else {
                                    Mode::Ground
                                };
                            }
                            b'\\' => {
                                self.mode = Mode::Comment {
                                    escape: true,
                                    resume_word,
                                };
                            }
                            _ => {}
                        }
                    }
                }
                Mode::TypeStart => {
                    if c == b'"' {
                        self.mode = Mode::TypeQuoted { escape: false };
                        i += 1;
                    } else {
                        self.mode = Mode::TypeBare { escape: false };
                    }
                }
                Mode::TypeBare { escape } => {
                    i += 1;
                    if escape {
                        self.word.push(c);
                        self.mode = Mode::TypeBare { escape: false };
                    } else {
                        match c {
                            b')' => {
                                self.emit_type(pos)?;
                                self.mode = Mode::Ground;
                            }
                            b'\\' => self.mode = Mode::TypeBare { escape: true },
                            _ => self.word.push(c),
                        }
                    }
                }
                Mode::TypeQuoted { escape } => {
                    i += 1;
                    if escape {
                        match c {
                            b'"' => self.word.push(b'"'),
                            b'\\' => self.word.push(b'\\'),
                            other => {
                                self.word.push(b'\\');
                                self.word.push(other);
                            }
                        }
                        self.mode = Mode::TypeQuoted { escape: false };
                    } else {
                        match c {
                            b'"' => self.mode = Mode::TypeClose,
                            b'\\' => self.mode = Mode::TypeQuoted { escape: true },
                            _ => self.word.push(c),
                        }
                    }
                }
                Mode::TypeClose => match c {
                    b' ' | b'\t' | b'\n' | b'\r' => i += 1,
                    b')' => {
                        self.emit_type(pos)?;
                        self.mode = Mode::Ground;
                        i += 1;
                    }
                    _ => return Err(Error::syntax(pos, "expected ')' after quoted type name")),
                },
            }
        }

        if !finish {
            return Ok(());
        }

        let pos = self.offset + data.len() as u64;
        match self.mode {
            Mode::Ground => self.flush_annotation(),
            Mode::Bare { escape: false } | Mode::AfterWord => {
                self.emit_primitive(pos)?;
                self.mode = Mode::Ground;
                Ok(())
            }
            Mode::Bare { escape: true } => {
                Err(Error::syntax(pos, "dangling escape at end of input"))
            }
            Mode::Quoted { .. } => Err(Error::syntax(pos, "unterminated quoted word")),
            Mode::Comment { .. } => Err(Error::syntax(pos, "unterminated comment")),
            Mode::TypeStart
            | Mode::TypeBare { .. }
            | Mode::TypeQuoted { .. }
            | Mode::TypeClose => Err(Error::syntax(pos, "unterminated type annotation")),
        }
    }

    /// A type annotation with no following value defaults to the empty
    /// primitive.
    fn flush_annotation(&mut self) -> Result<()> {
        if self.annotated {
            self.annotated = false;
            self.sink.primitive("")?;
        }
        Ok(())
    }

    fn take_word(&mut self, pos: u64) -> Result<String> {
        let bytes = std::mem::take(&mut self.word);
        String::from_utf8(bytes).map_err(|_| Error::syntax(pos, "invalid UTF-8 in token"))
    }

    fn emit_primitive(&mut self, pos: u64) -> Result<()> {
        let text = self.take_word(pos)?;
        self.annotated = false;
        self.sink.primitive(&text)
    }

    fn emit_key(&mut self, pos: u64) -> Result<()> {
        let text = self.take_word(pos)?;
        self.sink.key(&text)
    }

    fn emit_type(&mut self, pos: u64) -> Result<()> {
        let text = self.take_word(pos)?;
        self.annotated = true;
        self.sink.type_name(&text)
    }
}
