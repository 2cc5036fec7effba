//! luxem format reference
//!
//! This module documents the luxem text format as implemented by this
//! library. luxem is a typed data serialization format similar to JSON,
//! with explicit type annotations, relaxed quoting, and comments.
//!
//! # Overview
//!
//! A document is a sequence of zero or more values; the top level is not
//! itself bracketed:
//!
//! ```text
//! first, second, {key: value}, [a, b],
//! ```
//!
//! Commas separate sibling values and entries. A trailing comma before a
//! closing bracket (or at the end of the document) is permitted and has no
//! meaning; the writer always emits one.
//!
//! # Values
//!
//! | Form | Syntax | Example |
//! |------|--------|---------|
//! | Primitive | bare or quoted word | `7`, `"has spaces"` |
//! | Object | `{ key: value, ... }` | `{name: Alice}` |
//! | Array | `[ value, ... ]` | `[a, b, c]` |
//! | Typed value | `(name)` before a value | `(int) 7`, `(config) {...}` |
//!
//! Primitives are opaque text. The format never decides that `7` is a
//! number; type annotations carry that intent, and conversion happens in
//! the extraction layer ([`crate::dsl`]).
//!
//! ## Words
//!
//! A **bare word** is any run of characters outside whitespace and the
//! structural set `{ } [ ] ( ) : , * "`. A backslash escapes the next
//! character verbatim, so `goob\,er` is the single primitive `goob,er`.
//!
//! A **quoted word** is delimited by `"`. Inside, `\"` is a literal quote
//! and `\\` a literal backslash; everything else passes through verbatim,
//! including newlines. `""` is a valid empty primitive.
//!
//! ## Type annotations
//!
//! `(name)` immediately before a value annotates it. The name runs to the
//! closing `)` (backslash escapes apply, and a quoted form is accepted),
//! so `(has spaces)` is a legal annotation. An annotation with no
//! following value, as in `(x),` or `(x)` at end of input, annotates the
//! empty primitive.
//!
//! ## Objects
//!
//! Keys are words (bare or quoted) followed by `:`. Keys are unique;
//! entry order is preserved on round trips but does not affect equality.
//!
//! ## Comments
//!
//! `*` opens a comment and the next unescaped `*` closes it; `\*` is a
//! literal asterisk inside. Comments do not nest, produce nothing, and may
//! appear between any two tokens:
//!
//! ```text
//! * header * {key: *inline note* value},
//! ```
//!
//! # Built-in annotation names
//!
//! Struct-mode extraction converts values annotated with these names:
//!
//! | Annotation | Conversion |
//! |------------|------------|
//! | `int` | base-10 integer |
//! | `float` | base-10 floating point |
//! | `bool` | `true`/`yes`/`1`, `false`/`no`/`0` (case-insensitive) |
//! | `string` | text, unconverted |
//! | `ascii16` | two chars per byte from `a`-`p`, high nibble first |
//! | `base64` | standard alphabet with `=` padding |
//!
//! Any other annotation is preserved as a typed wrapper. The `ascii16`
//! encoding exists so binary data can always travel as a bare word.
//!
//! # Pretty and compact output
//!
//! Compact output has no whitespace beyond the single space between an
//! annotation and its value: `{key:(int) 7,},`. Pretty output puts each
//! value on its own line, indents children one level deeper than their
//! container, and closes brackets at the container's own depth:
//!
//! ```text
//! {
//!     key: (int) 7,
//! },
//! ```
//!
//! There is no version header and no magic bytes; a luxem stream is just
//! its values.
