//! MARC record leader parsing and manipulation.
//!
//! The MARC leader is a 24-byte fixed-length field at the start of every MARC record.
//! It contains metadata describing the record's structure, content type, and encoding.
//!
//! # Structure
//!
//! - Positions 0-4: Record length (5 digits)
//! - Position 5: Record status
//! - Position 6: Record type (a = language material, c = music, etc.)
//! - Position 7: Bibliographic level (m = monograph, s = serial, etc.)
//! - Position 8: Control record type
//! - Position 9: Character coding (space = MARC-8, a = UTF-8)
//! - Position 10: Indicator count (written as `2` on output)
//! - Position 11: Subfield code count (written as `2` on output)
//! - Positions 12-16: Base address of data (5 digits)
//! - Positions 17-19: Encoding level, cataloging form, multipart level
//! - Positions 20-23: Reserved (written as `4500` on output)
//!
//! Record length and base address are recomputed whenever a record is
//! serialized; the remaining positions of an input leader are retained.

use crate::error::{MarcError, Result};
use serde::{Deserialize, Serialize};

/// MARC Leader - 24 bytes at the start of every MARC record.
///
/// Contains metadata about the record structure and content.
/// All MARC records must begin with exactly 24 bytes of leader information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    /// Record length (5 digits) - positions 0-4
    pub record_length: u32,
    /// Record status (1 char) - position 5
    pub record_status: char,
    /// Type of record (1 char) - position 6
    pub record_type: char,
    /// Bibliographic level (1 char) - position 7
    pub bibliographic_level: char,
    /// Type of control record (1 char) - position 8
    pub control_record_type: char,
    /// Character coding scheme (1 char) - position 9
    pub character_coding: char,
    /// Indicator count (1 char) - position 10
    pub indicator_count: char,
    /// Subfield code count (1 char) - position 11
    pub subfield_code_count: char,
    /// Base address of data (5 digits) - positions 12-16
    pub base_address: u32,
    /// Encoding level (1 char) - position 17
    pub encoding_level: char,
    /// Cataloging form (1 char) - position 18
    pub cataloging_form: char,
    /// Multipart resource record level (1 char) - position 19
    pub multipart_level: char,
    /// Reserved (4 chars) - positions 20-23
    pub reserved: String,
}

impl Default for Leader {
    fn default() -> Self {
        Leader {
            record_length: 0,
            record_status: 'n',
            record_type: 'a',
            bibliographic_level: 'm',
            control_record_type: ' ',
            character_coding: 'a',
            indicator_count: '2',
            subfield_code_count: '2',
            base_address: 0,
            encoding_level: ' ',
            cataloging_form: ' ',
            multipart_level: ' ',
            reserved: "4500".to_string(),
        }
    }
}

impl Leader {
    /// Parse a leader from the first 24 bytes of a record.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::RecordLength`] if the length prefix is missing or
    /// non-numeric, [`MarcError::Leader`] if fewer than 24 bytes are given, and
    /// [`MarcError::BaseAddress`] if positions 12-16 are non-numeric or zero.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 5 {
            return Err(MarcError::RecordLength(format!(
                "expected a 5-digit length prefix, got {} bytes",
                bytes.len()
            )));
        }
        let record_length = parse_digits(&bytes[0..5])
            .ok_or_else(|| MarcError::RecordLength(lossy(&bytes[0..5])))?;

        if bytes.len() < 24 {
            return Err(MarcError::Leader(format!(
                "leader must be 24 bytes, got {}",
                bytes.len()
            )));
        }

        let base_address =
            parse_digits(&bytes[12..17]).ok_or_else(|| MarcError::BaseAddress(lossy(&bytes[12..17])))?;
        if base_address == 0 {
            return Err(MarcError::BaseAddress("base address is zero".to_string()));
        }

        Ok(Leader {
            record_length,
            record_status: bytes[5] as char,
            record_type: bytes[6] as char,
            bibliographic_level: bytes[7] as char,
            control_record_type: bytes[8] as char,
            character_coding: bytes[9] as char,
            indicator_count: bytes[10] as char,
            subfield_code_count: bytes[11] as char,
            base_address,
            encoding_level: bytes[17] as char,
            cataloging_form: bytes[18] as char,
            multipart_level: bytes[19] as char,
            reserved: String::from_utf8_lossy(&bytes[20..24]).to_string(),
        })
    }

    /// Parse a leader from its 24-character display form.
    ///
    /// Used by the line-form parsers, where numeric positions may hold
    /// placeholder values; unparsable length and base address fields fall
    /// back to zero since both are recomputed on output.
    #[must_use]
    pub fn from_display_str(s: &str) -> Self {
        let chars: Vec<char> = s.chars().chain(std::iter::repeat(' ')).take(24).collect();
        let digits = |range: std::ops::Range<usize>| -> u32 {
            chars[range]
                .iter()
                .collect::<String>()
                .parse::<u32>()
                .unwrap_or(0)
        };
        Leader {
            record_length: digits(0..5),
            record_status: chars[5],
            record_type: chars[6],
            bibliographic_level: chars[7],
            control_record_type: chars[8],
            character_coding: chars[9],
            indicator_count: chars[10],
            subfield_code_count: chars[11],
            base_address: digits(12..17),
            encoding_level: chars[17],
            cataloging_form: chars[18],
            multipart_level: chars[19],
            reserved: chars[20..24].iter().collect(),
        }
    }

    /// Serialize the leader to its 24-byte form.
    ///
    /// The current `record_length` and `base_address` values are written as
    /// zero-padded decimals; the binary writer sets both, together with the
    /// fixed `22` / `4500` positions, before calling this.
    #[must_use]
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(24);
        bytes.extend_from_slice(format!("{:05}", self.record_length).as_bytes());
        bytes.push(self.record_status as u8);
        bytes.push(self.record_type as u8);
        bytes.push(self.bibliographic_level as u8);
        bytes.push(self.control_record_type as u8);
        bytes.push(self.character_coding as u8);
        bytes.push(self.indicator_count as u8);
        bytes.push(self.subfield_code_count as u8);
        bytes.extend_from_slice(format!("{:05}", self.base_address).as_bytes());
        bytes.push(self.encoding_level as u8);
        bytes.push(self.cataloging_form as u8);
        bytes.push(self.multipart_level as u8);
        let mut reserved: String = self.reserved.chars().take(4).collect();
        while reserved.len() < 4 {
            reserved.push(' ');
        }
        bytes.extend_from_slice(reserved.as_bytes());
        bytes
    }

    /// Return a copy with the positions every encoded record carries:
    /// the given length and base address, indicator/subfield counts of `2`,
    /// and `4500` in the reserved block.
    #[must_use]
    pub fn for_output(&self, record_length: u32, base_address: u32) -> Self {
        let mut leader = self.clone();
        leader.record_length = record_length;
        leader.base_address = base_address;
        leader.indicator_count = '2';
        leader.subfield_code_count = '2';
        leader.reserved = "4500".to_string();
        leader
    }
}

impl std::fmt::Display for Leader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.as_bytes()))
    }
}

/// Parse a 5-digit ASCII number, `None` on any non-digit byte.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 5 {
        return None;
    }
    let mut result = 0u32;
    for &byte in bytes {
        if byte.is_ascii_digit() {
            result = result * 10 + u32::from(byte - b'0');
        } else {
            return None;
        }
    }
    Some(result)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}
