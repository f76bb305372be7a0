//! Free-text normalization for record values.
//!
//! [`clean`] canonicalizes text pulled out of bibliographic fields: quote
//! variants collapse to an apostrophe, control characters and stray leading
//! and trailing punctuation are stripped, whitespace runs collapse, and the
//! result is NFC-normalized. [`unescape_entities`] reverses XML/HTML entity
//! escaping in decoded subfield values.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref QUOTE_LIKE: Regex = Regex::new(
        "[\u{0022}\u{055A}\u{05F4}\u{2018}-\u{201F}\u{275B}-\u{275E}\u{FF07}]"
    )
    .unwrap();
    static ref CONTROL_CHARS: Regex =
        Regex::new("[\u{0000}-\u{001F}\u{0080}-\u{009F}\u{2028}\u{2029}]").unwrap();
    static ref LEADING_JUNK: Regex = Regex::new(r"^[:;/\s?$.,\]})]+").unwrap();
    static ref TRAILING_JUNK: Regex = Regex::new(r"[;/\s$.,\[({]+$").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a free-text value.
///
/// Returns `None` when nothing survives normalization. Idempotent:
/// `clean(&clean(s)?) == clean(s)` for every input.
///
/// # Examples
///
/// ```
/// use marclint::clean;
///
/// assert_eq!(clean("  “Quoted”  title /"), Some("'Quoted' title".to_string()));
/// assert_eq!(clean(" ;, "), None);
/// ```
#[must_use]
pub fn clean(text: &str) -> Option<String> {
    let s = QUOTE_LIKE.replace_all(text, "'");
    let s = CONTROL_CHARS.replace_all(&s, "");
    let s = LEADING_JUNK.replace_all(&s, "");
    let s = TRAILING_JUNK.replace_all(&s, "");
    let s = WHITESPACE_RUN.replace_all(&s, " ");
    let s: String = s.trim().nfc().collect();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Decode XML/HTML character entities in a subfield value.
///
/// Values that fail to unescape (stray `&` without a terminating `;`) are
/// returned unchanged.
#[must_use]
pub fn unescape_entities(value: &str) -> String {
    match quick_xml::escape::unescape(value) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_quote_variants_to_apostrophe() {
        assert_eq!(clean("\u{201C}x\u{201D}"), Some("'x'".to_string()));
        assert_eq!(clean("rock \u{2019}n\u{2019} roll"), Some("rock 'n' roll".to_string()));
        assert_eq!(clean("\"double\""), Some("'double'".to_string()));
    }

    #[test]
    fn strips_control_characters() {
        assert_eq!(clean("a\u{0001}b\u{0085}c"), Some("abc".to_string()));
        assert_eq!(clean("a\u{2028}b"), Some("ab".to_string()));
    }

    #[test]
    fn strips_leading_and_trailing_punctuation() {
        assert_eq!(clean(": title /"), Some("title".to_string()));
        assert_eq!(clean("?]}) x ,.[({"), Some("x".to_string()));
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean("a \t  b\n c"), Some("a b c".to_string()));
    }

    #[test]
    fn empty_results_are_absent() {
        assert_eq!(clean(""), None);
        assert_eq!(clean("  ;/., "), None);
    }

    #[test]
    fn applies_nfc() {
        // e + combining acute composes to a single code point
        assert_eq!(clean("e\u{0301}"), Some("\u{00E9}".to_string()));
    }

    #[test]
    fn is_idempotent() {
        for input in [": “A  title” /", "x\u{0002}y", " already clean ", "é"] {
            let once = clean(input).unwrap();
            assert_eq!(clean(&once), Some(once.clone()));
        }
    }

    #[test]
    fn unescapes_entities() {
        assert_eq!(unescape_entities("Dombey &amp; Son"), "Dombey & Son");
        assert_eq!(unescape_entities("&#233;tude"), "étude");
        assert_eq!(unescape_entities("no entities"), "no entities");
        assert_eq!(unescape_entities("stray & ampersand"), "stray & ampersand");
    }
}
