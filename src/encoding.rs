//! Character encoding support for MARC records.
//!
//! Field bodies can arrive in two encodings:
//! - **UTF-8** (modern) — decoded strictly; invalid bytes are reported
//! - **MARC-8** (legacy) — decoded through the ANSEL mapping table
//!
//! The encoding is indicated in position 9 of the MARC leader:
//! - Space character = MARC-8
//! - `a` = UTF-8
//!
//! The decoder is a strategy value carried by the reader; records built in
//! memory and the binary writer always use UTF-8.

use crate::error::{MarcError, Result};
use crate::marc8::Marc8Mapping;

/// Character encoding for MARC field bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarcEncoding {
    /// MARC-8 encoding (legacy ANSEL character set)
    Marc8,
    /// UTF-8 encoding (modern standard)
    #[default]
    Utf8,
}

impl MarcEncoding {
    /// Detect the encoding from leader position 9.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::Encoding`] if the character is not a valid
    /// encoding indicator.
    pub fn from_leader_char(c: char) -> Result<Self> {
        match c {
            ' ' => Ok(MarcEncoding::Marc8),
            'a' => Ok(MarcEncoding::Utf8),
            _ => Err(MarcError::Encoding(format!(
                "unknown character coding scheme: {c}"
            ))),
        }
    }

    /// The leader character for this encoding.
    #[must_use]
    pub fn as_leader_char(&self) -> char {
        match self {
            MarcEncoding::Marc8 => ' ',
            MarcEncoding::Utf8 => 'a',
        }
    }
}

/// Decode raw field bytes using the given encoding.
///
/// # Errors
///
/// Returns [`MarcError::Encoding`] when the bytes are not valid in the
/// chosen encoding. Callers treat this per subfield: the offending subfield
/// is skipped and a decode warning recorded.
pub fn decode_bytes(bytes: &[u8], encoding: MarcEncoding) -> Result<String> {
    match encoding {
        MarcEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(ToString::to_string)
            .map_err(|e| MarcError::Encoding(format!("invalid UTF-8: {e}"))),
        MarcEncoding::Marc8 => Ok(decode_marc8(bytes)),
    }
}

/// Decode MARC-8 bytes to a UTF-8 string.
///
/// ASCII bytes pass through. High bytes are looked up in the ANSEL table;
/// combining marks precede their base character in MARC-8 and are reordered
/// to follow it, as Unicode requires. Unmapped bytes become U+FFFD.
fn decode_marc8(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    // Combining marks seen before their base character.
    let mut pending: Vec<char> = Vec::new();

    for &byte in bytes {
        if byte < 0x80 {
            if byte < 0x20 || byte == 0x7F {
                // Control characters carry no text content.
                continue;
            }
            result.push(byte as char);
            result.extend(pending.drain(..));
        } else {
            match crate::marc8::lookup(byte) {
                Some(Marc8Mapping::Spacing(c)) => {
                    result.push(c);
                    result.extend(pending.drain(..));
                },
                Some(Marc8Mapping::Combining(c)) => pending.push(c),
                None => {
                    result.push('\u{FFFD}');
                    result.extend(pending.drain(..));
                },
            }
        }
    }

    // Combining marks with no base character left to attach to.
    result.extend(pending.drain(..));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_char_roundtrip() {
        assert_eq!(MarcEncoding::from_leader_char(' ').unwrap(), MarcEncoding::Marc8);
        assert_eq!(MarcEncoding::from_leader_char('a').unwrap(), MarcEncoding::Utf8);
        assert!(MarcEncoding::from_leader_char('x').is_err());
        assert_eq!(MarcEncoding::Marc8.as_leader_char(), ' ');
        assert_eq!(MarcEncoding::Utf8.as_leader_char(), 'a');
    }

    #[test]
    fn utf8_is_strict() {
        assert_eq!(
            decode_bytes("déjà".as_bytes(), MarcEncoding::Utf8).unwrap(),
            "déjà"
        );
        assert!(decode_bytes(&[0xC3, 0x28], MarcEncoding::Utf8).is_err());
    }

    #[test]
    fn marc8_ascii_passthrough() {
        let decoded = decode_bytes(b"plain text", MarcEncoding::Marc8).unwrap();
        assert_eq!(decoded, "plain text");
    }

    #[test]
    fn marc8_spacing_characters() {
        // 0xB2 = o with stroke, 0xA5 = AE ligature
        let decoded = decode_bytes(&[0xB2, b'l', 0xA5], MarcEncoding::Marc8).unwrap();
        assert_eq!(decoded, "ølÆ");
    }

    #[test]
    fn marc8_combining_marks_follow_their_base() {
        // MARC-8 places the acute accent (0xE2) before the base letter.
        let decoded = decode_bytes(&[b'd', 0xE2, b'e', b'j', 0xE1, b'a'], MarcEncoding::Marc8)
            .unwrap();
        assert_eq!(decoded, "de\u{301}ja\u{300}");
    }

    #[test]
    fn marc8_trailing_combining_mark_is_kept() {
        let decoded = decode_bytes(&[b'a', 0xE2], MarcEncoding::Marc8).unwrap();
        assert_eq!(decoded, "a\u{301}");
    }
}
