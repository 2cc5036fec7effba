//! Error types for luxem reading, writing, and extraction.
//!
//! Everything in this crate reports failure through the single [`Error`]
//! enum and the crate-wide [`Result`] alias.
//!
//! ## Error Categories
//!
//! - **Syntax**: malformed luxem text (unterminated quote or comment,
//!   dangling escape, unmatched close bracket), with the approximate byte
//!   offset in the input stream
//! - **Structure**: an event sequence that violates container rules (a key
//!   outside an object, a close with no matching open, an unclosed
//!   container at end of input)
//! - **Coercion**: primitive text that an accessor could not convert
//!   (non-numeric text for an integer accessor, odd-length ascii16, ...)
//! - **I/O**: reading from or writing to an underlying stream failed
//!
//! Errors raised by caller-supplied callbacks travel through `feed`/`extract`
//! unmodified; nothing is swallowed or retried internally.
//!
//! ## Examples
//!
//! ```rust
//! use luxem::{from_slice, Error};
//!
//! let result = from_slice(b"\"unterminated");
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while reading, writing, or
/// extracting luxem data.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed luxem text, with the approximate byte offset in the stream
    #[error("syntax error at byte {offset}: {msg}")]
    Syntax { offset: u64, msg: String },

    /// Event sequence violated container expectations
    #[error("structure error: {0}")]
    Structure(String),

    /// Primitive text rejected by an accessor's conversion
    #[error("cannot convert {text:?} to {expected}")]
    Coercion { expected: String, text: String },

    /// Generic message, typically produced by caller-supplied callbacks
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error at the given stream offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luxem::Error;
    ///
    /// let err = Error::syntax(12, "unterminated comment");
    /// assert!(err.to_string().contains("byte 12"));
    /// ```
    pub fn syntax(offset: u64, msg: &str) -> Self {
        Error::Syntax {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates a structure error for an event arriving in the wrong context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luxem::Error;
    ///
    /// let err = Error::structure("key event outside an object");
    /// assert!(err.to_string().contains("key event"));
    /// ```
    pub fn structure(msg: &str) -> Self {
        Error::Structure(msg.to_string())
    }

    /// Creates a coercion error recording the expected target and the raw
    /// text that failed to convert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luxem::Error;
    ///
    /// let err = Error::coercion("integer", "seven");
    /// assert!(err.to_string().contains("integer"));
    /// ```
    pub fn coercion(expected: &str, text: &str) -> Self {
        Error::Coercion {
            expected: expected.to_string(),
            text: text.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// Useful from inside extraction callbacks.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
