//! Configuration options for luxem output.
//!
//! [`WriteOptions`] controls whether the [`Writer`](crate::Writer) emits
//! compact or pretty-printed text, and what the indent unit looks like.
//!
//! ## Examples
//!
//! ```rust
//! use luxem::{to_string_with_options, Value, WriteOptions};
//!
//! let doc = vec![Value::from("hello")];
//!
//! // Compact output
//! let compact = to_string_with_options(&doc, WriteOptions::new()).unwrap();
//! assert_eq!(compact, "hello,");
//!
//! // Pretty output with a tab indent
//! let options = WriteOptions::pretty().with_indent_char('\t').with_indent_width(1);
//! let pretty = to_string_with_options(&doc, options).unwrap();
//! assert_eq!(pretty, "hello,\n");
//! ```

/// Configuration options for luxem serialization.
///
/// Compact mode emits no whitespace beyond the single mandatory space
/// between a type annotation and its value. Pretty mode puts every value on
/// its own line, indenting each nesting level by `indent_width` copies of
/// `indent_char`.
///
/// # Examples
///
/// ```rust
/// use luxem::WriteOptions;
///
/// // Default compact options
/// let options = WriteOptions::new();
/// assert!(!options.pretty);
///
/// // Pretty-printed with 4-space indentation
/// let options = WriteOptions::pretty();
/// assert_eq!(options.indent_width, 4);
/// ```
#[derive(Clone, Debug)]
pub struct WriteOptions {
    pub pretty: bool,
    /// Indent character, conventionally `' '` or `'\t'`
    pub indent_char: char,
    /// Repeats of `indent_char` per nesting level
    pub indent_width: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            pretty: false,
            indent_char: ' ',
            indent_width: 4,
        }
    }
}

impl WriteOptions {
    /// Creates default options (compact output).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output (4-space indent).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luxem::WriteOptions;
    ///
    /// let options = WriteOptions::pretty();
    /// assert!(options.pretty);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        WriteOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indent character. Only affects pretty output.
    #[must_use]
    pub fn with_indent_char(mut self, indent_char: char) -> Self {
        self.indent_char = indent_char;
        self
    }

    /// Sets the number of indent characters per nesting level.
    /// Only affects pretty output.
    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }
}
