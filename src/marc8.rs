//! ANSEL (MARC-8 extended Latin) character mappings.
//!
//! MARC-8 text mixes 7-bit ASCII with the ANSEL extended Latin set in the
//! high byte range. Spacing characters map directly to a Unicode code point;
//! combining diacritics precede their base character on the wire and map to
//! Unicode combining marks.

/// How a high ANSEL byte maps into Unicode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marc8Mapping {
    /// A spacing character.
    Spacing(char),
    /// A combining mark, to be emitted after its base character.
    Combining(char),
}

/// Look up a high byte (0x80-0xFF) in the ANSEL table.
#[must_use]
pub fn lookup(byte: u8) -> Option<Marc8Mapping> {
    use Marc8Mapping::{Combining, Spacing};
    let mapping = match byte {
        0xA1 => Spacing('\u{0141}'), // L with stroke
        0xA2 => Spacing('\u{00D8}'), // O with stroke
        0xA3 => Spacing('\u{0110}'), // D with stroke
        0xA4 => Spacing('\u{00DE}'), // Thorn
        0xA5 => Spacing('\u{00C6}'), // AE ligature
        0xA6 => Spacing('\u{0152}'), // OE ligature
        0xA7 => Spacing('\u{02B9}'), // soft sign
        0xA8 => Spacing('\u{00B7}'), // middle dot
        0xA9 => Spacing('\u{266D}'), // music flat
        0xAA => Spacing('\u{00AE}'), // registered
        0xAB => Spacing('\u{00B1}'), // plus-minus
        0xAC => Spacing('\u{01A0}'), // O with horn
        0xAD => Spacing('\u{01AF}'), // U with horn
        0xAE => Spacing('\u{02BC}'), // alif
        0xB0 => Spacing('\u{02BB}'), // ayn
        0xB1 => Spacing('\u{0142}'), // l with stroke
        0xB2 => Spacing('\u{00F8}'), // o with stroke
        0xB3 => Spacing('\u{0111}'), // d with stroke
        0xB4 => Spacing('\u{00FE}'), // thorn
        0xB5 => Spacing('\u{00E6}'), // ae ligature
        0xB6 => Spacing('\u{0153}'), // oe ligature
        0xB7 => Spacing('\u{02BA}'), // hard sign
        0xB8 => Spacing('\u{0131}'), // dotless i
        0xB9 => Spacing('\u{00A3}'), // pound
        0xBA => Spacing('\u{00F0}'), // eth
        0xBC => Spacing('\u{01A1}'), // o with horn
        0xBD => Spacing('\u{01B0}'), // u with horn
        0xC0 => Spacing('\u{00B0}'), // degree
        0xC1 => Spacing('\u{2113}'), // script l
        0xC2 => Spacing('\u{2117}'), // sound recording copyright
        0xC3 => Spacing('\u{00A9}'), // copyright
        0xC4 => Spacing('\u{266F}'), // music sharp
        0xC5 => Spacing('\u{00BF}'), // inverted question mark
        0xC6 => Spacing('\u{00A1}'), // inverted exclamation mark
        0xC7 => Spacing('\u{00DF}'), // sharp s
        0xC8 => Spacing('\u{20AC}'), // euro
        0xE0 => Combining('\u{0309}'), // hook above
        0xE1 => Combining('\u{0300}'), // grave
        0xE2 => Combining('\u{0301}'), // acute
        0xE3 => Combining('\u{0302}'), // circumflex
        0xE4 => Combining('\u{0303}'), // tilde
        0xE5 => Combining('\u{0304}'), // macron
        0xE6 => Combining('\u{0306}'), // breve
        0xE7 => Combining('\u{0307}'), // dot above
        0xE8 => Combining('\u{0308}'), // diaeresis
        0xE9 => Combining('\u{030C}'), // caron
        0xEA => Combining('\u{030A}'), // ring above
        0xEB => Combining('\u{FE20}'), // ligature left half
        0xEC => Combining('\u{FE21}'), // ligature right half
        0xED => Combining('\u{0315}'), // comma above right
        0xEE => Combining('\u{030B}'), // double acute
        0xEF => Combining('\u{0310}'), // candrabindu
        0xF0 => Combining('\u{0327}'), // cedilla
        0xF1 => Combining('\u{0328}'), // ogonek
        0xF2 => Combining('\u{0323}'), // dot below
        0xF3 => Combining('\u{0324}'), // double dot below
        0xF4 => Combining('\u{0325}'), // ring below
        0xF5 => Combining('\u{0333}'), // double underscore
        0xF6 => Combining('\u{0332}'), // underscore
        0xF7 => Combining('\u{0326}'), // comma below
        0xF8 => Combining('\u{031C}'), // right half ring below
        0xF9 => Combining('\u{032E}'), // breve below
        0xFA => Combining('\u{FE22}'), // double tilde left half
        0xFB => Combining('\u{FE23}'), // double tilde right half
        0xFE => Combining('\u{0313}'), // comma above
        _ => return None,
    };
    Some(mapping)
}
