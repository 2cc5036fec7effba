//! Primitive-text conversions used by the extraction layer.
//!
//! luxem primitives are opaque text; these functions turn that text into
//! Rust values and back. Two binary encodings are supported:
//!
//! - **ascii16**: two characters per byte from the alphabet `a`-`p`
//!   (nibble values 0-15, high nibble first). Encoded bytes never need
//!   quoting or escaping as a bare word.
//! - **base64**: the standard alphabet with `=` padding.
//!
//! ## Examples
//!
//! ```rust
//! use luxem::coerce;
//!
//! assert_eq!(coerce::ascii16_encode(&[0x12, 0xab]), "bckl");
//! assert_eq!(coerce::ascii16_decode("bckl").unwrap(), vec![0x12, 0xab]);
//! assert!(coerce::bool_from_text("Yes").unwrap());
//! ```

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Parses boolean text.
///
/// Accepted true words: `true`, `yes`, `1`; false words: `false`, `no`,
/// `0`. Matching is case-insensitive.
///
/// # Errors
///
/// Returns a coercion error for any other text.
pub fn bool_from_text(text: &str) -> Result<bool> {
    if text.eq_ignore_ascii_case("true")
        || text.eq_ignore_ascii_case("yes")
        || text == "1"
    {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false")
        || text.eq_ignore_ascii_case("no")
        || text == "0"
    {
        Ok(false)
    } else {
        Err(Error::coercion("boolean", text))
    }
}

/// Parses base-10 integer text.
///
/// # Errors
///
/// Returns a coercion error if the text is not a valid integer.
pub fn int_from_text(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| Error::coercion("integer", text))
}

/// Parses base-10 floating point text.
///
/// # Errors
///
/// Returns a coercion error if the text is not a valid number.
pub fn float_from_text(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| Error::coercion("float", text))
}

/// Encodes bytes as ascii16 text, high nibble first.
///
/// The output uses only the characters `a`-`p`, so it is always a valid
/// bare word.
#[must_use]
pub fn ascii16_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push((b'a' + (byte >> 4)) as char);
        out.push((b'a' + (byte & 0x0f)) as char);
    }
    out
}

/// Decodes ascii16 text back into bytes.
///
/// # Errors
///
/// Returns a coercion error for odd-length input or characters outside
/// `a`-`p`.
pub fn ascii16_decode(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(Error::coercion("ascii16", text));
    }
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks_exact(2) {
        let hi = nibble(pair[0]).ok_or_else(|| Error::coercion("ascii16", text))?;
        let lo = nibble(pair[1]).ok_or_else(|| Error::coercion("ascii16", text))?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn nibble(ch: u8) -> Option<u8> {
    if (b'a'..=b'p').contains(&ch) {
        Some(ch - b'a')
    } else {
        None
    }
}

/// Encodes bytes as standard base64 with padding.
#[must_use]
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes standard base64 text (with padding) into bytes.
///
/// # Errors
///
/// Returns a coercion error for malformed base64.
pub fn base64_decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|_| Error::coercion("base64", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_words() {
        for word in ["true", "TRUE", "Yes", "1"] {
            assert!(bool_from_text(word).unwrap());
        }
        for word in ["false", "False", "NO", "0"] {
            assert!(!bool_from_text(word).unwrap());
        }
        assert!(bool_from_text("maybe").is_err());
        assert!(bool_from_text("").is_err());
    }

    #[test]
    fn test_int() {
        assert_eq!(int_from_text("7").unwrap(), 7);
        assert_eq!(int_from_text("-42").unwrap(), -42);
        assert!(int_from_text("7.5").is_err());
        assert!(int_from_text("seven").is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(float_from_text("7.9").unwrap(), 7.9);
        assert_eq!(float_from_text("-1e3").unwrap(), -1000.0);
        assert!(float_from_text("pie").is_err());
    }

    #[test]
    fn test_ascii16_alphabet() {
        assert_eq!(ascii16_encode(&[0x00]), "aa");
        assert_eq!(ascii16_encode(&[0xff]), "pp");
        assert_eq!(ascii16_encode(&[0x4f, 0x10]), "epba");
        assert!(ascii16_encode(&(0..=255u8).collect::<Vec<_>>())
            .chars()
            .all(|c| ('a'..='p').contains(&c)));
    }

    #[test]
    fn test_ascii16_round_trip() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(ascii16_decode(&ascii16_encode(&data)).unwrap(), data);
    }

    #[test]
    fn test_ascii16_rejects() {
        assert!(ascii16_decode("abc").is_err());
        assert!(ascii16_decode("zz").is_err());
        assert!(ascii16_decode("aA").is_err());
        assert_eq!(ascii16_decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_base64_round_trip() {
        let data = b"any carnal pleasure";
        assert_eq!(base64_decode(&base64_encode(data)).unwrap(), data);
        assert!(base64_decode("not base64!!!").is_err());
    }
}
